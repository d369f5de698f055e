use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use asset_consolidator::batch;
use asset_consolidator::config::Config;
use asset_consolidator::logging;
use asset_consolidator::notify::LogNotifier;
use asset_consolidator::pipeline::PipelineContext;
use asset_consolidator::run_log::RunLog;

#[derive(Parser)]
#[command(name = "asset_consolidator")]
#[command(about = "Consolidates asset inventory exports into deduplicated reports")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the input directory and process every recognized file
    Run,
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    let run_log = RunLog::new("logs");

    match cli.command {
        Commands::Run => {
            if let Err(e) = run(&cli.config, &run_log) {
                error!("batch run failed: {:#}", e);
                if let Err(log_err) = run_log.message("ERROR", &format!("{e:#}")) {
                    error!("failed to append to run log: {}", log_err);
                }
                println!("❌ Batch run failed: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(config_path: &Path, run_log: &RunLog) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading configuration from '{}'", config_path.display()))?;
    config.validate()?;

    fs::create_dir_all(&config.files.out_path)
        .with_context(|| format!("creating output directory '{}'", config.files.out_path))?;
    if !config.files.archive_path.is_empty() {
        fs::create_dir_all(&config.files.archive_path)
            .with_context(|| format!("creating archive directory '{}'", config.files.archive_path))?;
    }

    info!(input = %config.files.in_path, "starting batch run");
    println!("🔄 Processing files from {}...", config.files.in_path);

    let notifier = LogNotifier::new(config.email.clone());
    let ctx = PipelineContext {
        config: &config,
        run_log,
        notifier: &notifier,
    };

    let outcome = batch::run_batch(&ctx)?;

    info!(
        processed = outcome.processed,
        failed = outcome.failed,
        deleted = outcome.deleted,
        "batch run finished"
    );
    println!("\n📊 Batch results:");
    println!("   Processed: {}", outcome.processed);
    println!("   Failed: {}", outcome.failed);
    println!("   Inputs removed: {}", outcome.deleted);

    Ok(())
}
