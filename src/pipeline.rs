//! Per-source-type orchestration: read rows, map, dedup, merge when paired,
//! write the tabular output, report counts.
//!
//! Each run is sequential and self-contained; a failure aborts the current
//! source type only and is surfaced to the batch loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::archive;
use crate::config::Config;
use crate::constants::ASIA_PRINTER_DIR_PREFIX;
use crate::dedup::dedup;
use crate::error::{ConsolidatorError, Result};
use crate::mapper::{map_row, MapOutcome};
use crate::merge::merge;
use crate::notify::Notifier;
use crate::reader::{read_csv_rows, read_xlsx_rows, RowBatch};
use crate::run_log::RunLog;
use crate::schema::{Record, RecordSchema};
use crate::sink::write_table;
use crate::sources::{
    InputKind, SourceDef, SourceType, NETWORK_ASIA, NETWORK_NA, PRINTER_CHINA, PRINTER_JAPAN,
    PRINTER_NA,
};

/// Explicit logging/timing context for one batch, passed into every pipeline
/// invocation instead of living in process globals.
pub struct PipelineContext<'a> {
    pub config: &'a Config,
    pub run_log: &'a RunLog,
    pub notifier: &'a dyn Notifier,
}

impl PipelineContext<'_> {
    fn in_path(&self) -> &Path {
        Path::new(&self.config.files.in_path)
    }

    fn out_path(&self) -> &Path {
        Path::new(&self.config.files.out_path)
    }

    fn archive_path(&self) -> &Path {
        Path::new(&self.config.files.archive_path)
    }
}

#[derive(Debug)]
pub struct PipelineReport {
    pub process: &'static str,
    pub rows_read: usize,
    pub rows_written: usize,
    pub output_file: String,
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn duplicates_removed(&self) -> usize {
        self.rows_read.saturating_sub(self.rows_written)
    }
}

/// Runs the full pipeline for a single-file source type.
pub fn run_single(
    ctx: &PipelineContext,
    def: &SourceDef,
    in_file: &str,
    out_file: &str,
) -> Result<PipelineReport> {
    let started = Instant::now();
    info!(file = %in_file, process = def.source.process_name(), "processing file");

    check_extension(def.source, in_file)?;
    let archive_file = archive::copy_to_archive(ctx.in_path(), ctx.archive_path(), in_file)?;

    let batch = read_input(def, &ctx.in_path().join(in_file))?;
    let records = map_records(def.schema, &batch);
    let deduped = dedup(def.schema, &records);

    let titles = def.schema.titles();
    let rows_written = write_table(&def.output, &ctx.out_path().join(out_file), &titles, &deduped)?;

    let report = PipelineReport {
        process: def.source.process_name(),
        rows_read: batch.rows_read,
        rows_written,
        output_file: out_file.to_string(),
        elapsed: started.elapsed(),
    };

    finish(ctx, &report, in_file, &archive_file)?;
    Ok(report)
}

/// Runs the joint network pipeline over the paired NA (xlsx) and Asia (csv)
/// files. Each side is deduplicated on its own before the ordered merge;
/// cross-source duplicates are intentionally kept.
pub fn run_network(
    ctx: &PipelineContext,
    na_file: &str,
    asia_file: &str,
    out_file: &str,
) -> Result<PipelineReport> {
    let started = Instant::now();

    check_extension(SourceType::NetworkAsia, asia_file)?;
    check_extension(SourceType::NetworkNa, na_file)?;

    info!(file = %na_file, "processing file");
    let archive_na = archive::copy_to_archive(ctx.in_path(), ctx.archive_path(), na_file)?;
    let batch_na = read_input(&NETWORK_NA, &ctx.in_path().join(na_file))?;
    let records_na = map_records(NETWORK_NA.schema, &batch_na);

    info!(file = %asia_file, "processing file");
    let archive_asia = archive::copy_to_archive(ctx.in_path(), ctx.archive_path(), asia_file)?;
    let batch_asia = read_input(&NETWORK_ASIA, &ctx.in_path().join(asia_file))?;
    let records_asia = map_records(NETWORK_ASIA.schema, &batch_asia);

    let deduped_na = dedup(NETWORK_NA.schema, &records_na);
    let deduped_asia = dedup(NETWORK_ASIA.schema, &records_asia);
    let distinct_na = deduped_na.len();
    let distinct_asia = deduped_asia.len();

    let output = merge(vec![deduped_na, deduped_asia]);
    let titles = NETWORK_NA.schema.titles();
    let rows_written = write_table(
        &NETWORK_NA.output,
        &ctx.out_path().join(out_file),
        &titles,
        &output,
    )?;

    let report = PipelineReport {
        process: SourceType::NetworkNa.process_name(),
        rows_read: batch_na.rows_read + batch_asia.rows_read,
        rows_written,
        output_file: out_file.to_string(),
        elapsed: started.elapsed(),
    };
    log_report(&report);

    ctx.notifier.notify_success(
        report.process,
        report.rows_read,
        report.duplicates_removed(),
        &format_elapsed(report.elapsed),
    );
    // One summary line per input file, each against its own distinct count
    ctx.run_log.summary(
        na_file,
        out_file,
        &archive_na,
        batch_na.rows_read,
        batch_na.rows_read.saturating_sub(distinct_na),
    )?;
    ctx.run_log.summary(
        asia_file,
        out_file,
        &archive_asia,
        batch_asia.rows_read,
        batch_asia.rows_read.saturating_sub(distinct_asia),
    )?;

    Ok(report)
}

/// Runs the printer pipeline: the NA master list plus the consolidated Asia
/// exports gathered from `Asia Printers*` subdirectories of the input dir.
pub fn run_printers(ctx: &PipelineContext, na_file: &str, out_file: &str) -> Result<PipelineReport> {
    let started = Instant::now();
    info!(file = %na_file, "processing file");

    check_extension(SourceType::PrinterNa, na_file)?;
    let archive_file = archive::copy_to_archive(ctx.in_path(), ctx.archive_path(), na_file)?;

    let batch_na = read_input(&PRINTER_NA, &ctx.in_path().join(na_file))?;
    let records_na = map_records(PRINTER_NA.schema, &batch_na);

    let (records_asia, asia_rows_read) = consolidate_asia_printers(ctx)?;
    ctx.run_log
        .message("INFO", &format!("Printer Asia Count: {}", records_asia.len()))?;

    let deduped_na = dedup(PRINTER_NA.schema, &records_na);
    let deduped_asia = dedup(PRINTER_NA.schema, &records_asia);

    let output = merge(vec![deduped_na, deduped_asia]);
    let titles = PRINTER_NA.schema.titles();
    let rows_written = write_table(
        &PRINTER_NA.output,
        &ctx.out_path().join(out_file),
        &titles,
        &output,
    )?;

    let report = PipelineReport {
        process: SourceType::PrinterNa.process_name(),
        rows_read: batch_na.rows_read + asia_rows_read,
        rows_written,
        output_file: out_file.to_string(),
        elapsed: started.elapsed(),
    };

    finish(ctx, &report, na_file, &archive_file)?;
    Ok(report)
}

/// Walks the `Asia Printers*` subdirectories for regional exports. Files whose
/// name contains "China" or "Japan" (case-insensitive) are parsed with the
/// matching variant schema; anything else is skipped.
fn consolidate_asia_printers(ctx: &PipelineContext) -> Result<(Vec<Record>, usize)> {
    let mut files = Vec::new();
    for entry in fs::read_dir(ctx.in_path())? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.starts_with(&ASIA_PRINTER_DIR_PREFIX.to_lowercase()) {
            collect_data_files(&path, &mut files)?;
        }
    }
    files.sort();

    let mut records = Vec::new();
    let mut rows_read = 0;
    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let def = if name.contains("china") {
            &PRINTER_CHINA
        } else if name.contains("japan") {
            &PRINTER_JAPAN
        } else {
            continue;
        };

        ctx.run_log
            .message("INFO", &format!("Processing file: {}", name))?;
        let batch = read_input(def, file)?;
        rows_read += batch.rows_read;
        records.extend(map_records(def.schema, &batch));
    }

    Ok((records, rows_read))
}

fn collect_data_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_data_files(&path, out)?;
        } else {
            let name = path.file_name().map(|n| n.to_string_lossy().to_lowercase());
            if let Some(name) = name {
                if name.ends_with(".csv") || name.ends_with(".xlsx") {
                    out.push(path);
                }
            }
        }
    }
    Ok(())
}

fn read_input(def: &SourceDef, path: &Path) -> Result<RowBatch> {
    match def.input {
        InputKind::Csv { skip_header } => read_csv_rows(path, skip_header),
        InputKind::Xlsx { sheet, header_rows } => read_xlsx_rows(path, sheet, header_rows),
    }
}

fn map_records(schema: &RecordSchema, batch: &RowBatch) -> Vec<Record> {
    let mut records = Vec::new();
    let mut rejected = 0;
    for row in &batch.rows {
        match map_row(schema, row) {
            MapOutcome::Mapped(record) => records.push(record),
            MapOutcome::Rejected(reason) => {
                rejected += 1;
                debug!(kind = schema.kind, ?reason, "row rejected");
            }
        }
    }
    if rejected > 0 {
        debug!(kind = schema.kind, rejected, "rows excluded during mapping");
    }
    records
}

fn check_extension(source: SourceType, file: &str) -> Result<()> {
    let expected = source.allowed_extension();
    if !file.to_lowercase().ends_with(expected) {
        return Err(ConsolidatorError::InvalidFileType {
            process: source.process_name().to_string(),
            expected,
        });
    }
    Ok(())
}

fn finish(
    ctx: &PipelineContext,
    report: &PipelineReport,
    in_file: &str,
    archive_file: &str,
) -> Result<()> {
    log_report(report);
    ctx.notifier.notify_success(
        report.process,
        report.rows_read,
        report.duplicates_removed(),
        &format_elapsed(report.elapsed),
    );
    ctx.run_log.summary(
        in_file,
        &report.output_file,
        archive_file,
        report.rows_read,
        report.duplicates_removed(),
    )?;
    Ok(())
}

fn log_report(report: &PipelineReport) {
    info!(
        process = report.process,
        rows_read = report.rows_read,
        rows_written = report.rows_written,
        duplicates_removed = report.duplicates_removed(),
        output = %report.output_file,
        elapsed = %format_elapsed(report.elapsed),
        "pipeline finished"
    );
}

/// Formats a duration as `hh:mm:ss.mmm` for notifications.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let ms = total_ms % 1000;
    let seconds = (total_ms / 1000) % 60;
    let minutes = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{ms:03}")
}
