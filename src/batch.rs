//! One batch run: scan the input directory, dispatch each recognized file to
//! its pipeline, report per-file failures without stopping siblings, then
//! delete every scanned input file.

use std::fs;

use tracing::{info, warn};

use crate::error::{ConsolidatorError, Result};
use crate::pipeline::{self, PipelineContext};
use crate::sources::{
    END_USER_DEVICES, MOBILE_DEVICES, SERVERS, TERMINALS,
};

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub processed: usize,
    pub failed: usize,
    pub deleted: usize,
}

/// Scans `in_path` and runs every recognized source type found there.
///
/// All top-level `.csv`/`.xlsx` files take part in the batch and are deleted
/// afterwards whether their pipeline succeeded or not; a file nobody claims is
/// reported as an error and still deleted.
pub fn run_batch(ctx: &PipelineContext) -> Result<BatchOutcome> {
    let files = scan_input_files(ctx)?;
    if files.is_empty() {
        info!("no input files found, nothing to do");
        ctx.run_log.message("INFO", "No files found to process")?;
        return Ok(BatchOutcome::default());
    }

    let mut outcome = BatchOutcome::default();
    let mut network_na: Option<String> = None;
    let mut network_asia: Option<String> = None;

    for file in &files {
        match classify(ctx, file) {
            Classified::Single(def, out_file) => {
                match pipeline::run_single(ctx, def, file, &out_file) {
                    Ok(_) => outcome.processed += 1,
                    Err(e) => {
                        outcome.failed += 1;
                        report_failure(ctx, file, &e);
                    }
                }
            }
            Classified::Printers(out_file) => {
                match pipeline::run_printers(ctx, file, &out_file) {
                    Ok(_) => outcome.processed += 1,
                    Err(e) => {
                        outcome.failed += 1;
                        report_failure(ctx, file, &e);
                    }
                }
            }
            Classified::NetworkNa => network_na = Some(file.clone()),
            Classified::NetworkAsia => network_asia = Some(file.clone()),
            Classified::Unrecognized => {
                outcome.failed += 1;
                let e = ConsolidatorError::UnrecognizedFile(file.clone());
                report_failure(ctx, file, &e);
            }
        }

        // Run the joint network pipeline once both halves of the pair are in.
        if let (Some(na), Some(asia)) = (&network_na, &network_asia) {
            match pipeline::run_network(ctx, na, asia, &ctx.config.files.out_network) {
                Ok(_) => outcome.processed += 1,
                Err(e) => {
                    outcome.failed += 1;
                    // Either half of the pair may be at fault; name both.
                    report_failure(ctx, &format!("{na}, {asia}"), &e);
                }
            }
            network_na = None;
            network_asia = None;
        }
    }

    // A lone network file means its partner never arrived.
    if network_na.is_some() || network_asia.is_some() {
        outcome.failed += 1;
        let e = ConsolidatorError::MissingPairedFile("Network".to_string());
        let file = network_na.or(network_asia).unwrap_or_default();
        warn!(file = %file, "network file pair incomplete");
        ctx.notifier.notify_error("Network Devices", "Missing Network File");
        ctx.run_log.message("ERROR", &e.to_string())?;
    }

    outcome.deleted = delete_input_files(ctx, &files);
    Ok(outcome)
}

enum Classified<'a> {
    Single(&'a crate::sources::SourceDef, String),
    Printers(String),
    NetworkNa,
    NetworkAsia,
    Unrecognized,
}

/// Matches a file name against the configured name rules. Prefix rules use
/// starts-with; the network pair matches on contains so dated exports land on
/// the right side.
fn classify<'a>(ctx: &PipelineContext, file: &str) -> Classified<'a> {
    let files = &ctx.config.files;

    let starts = |prefix: &str| !prefix.is_empty() && file.starts_with(prefix);
    let contains = |needle: &str| !needle.is_empty() && file.contains(needle);

    if starts(&files.in_servers) {
        Classified::Single(&SERVERS, files.out_servers.clone())
    } else if starts(&files.in_eud) {
        Classified::Single(&END_USER_DEVICES, files.out_eud.clone())
    } else if starts(&files.in_mobile) {
        Classified::Single(&MOBILE_DEVICES, files.out_mobile.clone())
    } else if starts(&files.in_terminals) {
        Classified::Single(&TERMINALS, files.out_terminals.clone())
    } else if starts(&files.in_printer_na) {
        Classified::Printers(files.out_printer.clone())
    } else if contains(&files.in_network_na) {
        Classified::NetworkNa
    } else if contains(&files.in_network_asia) {
        Classified::NetworkAsia
    } else {
        Classified::Unrecognized
    }
}

/// Top-level `.csv`/`.xlsx` files only, sorted by name so runs are
/// deterministic. Subdirectories are left to the pipelines that scan them.
fn scan_input_files(ctx: &PipelineContext) -> Result<Vec<String>> {
    let in_path = &ctx.config.files.in_path;
    let mut files = Vec::new();
    for entry in fs::read_dir(in_path)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let lower = name.to_lowercase();
        if lower.ends_with(".csv") || lower.ends_with(".xlsx") {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

fn report_failure(ctx: &PipelineContext, file: &str, error: &ConsolidatorError) {
    warn!(file = %file, error = %error, "file failed");
    ctx.notifier.notify_error(file, &error.to_string());
    if let Err(log_err) = ctx
        .run_log
        .message("ERROR", &format!("{file}: {error}"))
    {
        warn!(error = %log_err, "failed to append to run log");
    }
}

/// Every scanned file is removed at the end of the batch, processed or not, so
/// the next run starts from a clean directory.
fn delete_input_files(ctx: &PipelineContext, files: &[String]) -> usize {
    let in_path = std::path::Path::new(&ctx.config.files.in_path);
    let mut deleted = 0;
    for file in files {
        match fs::remove_file(in_path.join(file)) {
            Ok(()) => deleted += 1,
            Err(e) => warn!(file = %file, error = %e, "failed to delete input file"),
        }
    }
    deleted
}
