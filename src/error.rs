use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsolidatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook read failed: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),

    #[error("Workbook write failed: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid file type for {process}. Expected {expected}")]
    InvalidFileType {
        process: String,
        expected: &'static str,
    },

    #[error("Missing {0} file")]
    MissingPairedFile(String),

    #[error("Invalid Filename - {0}")]
    UnrecognizedFile(String),

    #[error("Source file not found: {0}")]
    ArchiveSourceMissing(PathBuf),

    #[error("Worksheet '{0}' not found")]
    MissingSheet(String),
}

pub type Result<T> = std::result::Result<T, ConsolidatorError>;
