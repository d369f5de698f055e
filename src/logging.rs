//! Tracing setup: console output plus a daily-rolling diagnostic file under
//! `logs/`, separate from the CSV run log.

use std::io;
use std::{fs, mem};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        "logs",
        "consolidator.log",
    ));

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("asset_consolidator=info".parse().unwrap()),
        )
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(fmt::layer().with_writer(io::stdout))
        .init();

    // Dropping the guard would stop the background writer; leak it so file
    // logging lasts for the whole process.
    mem::forget(guard);
}
