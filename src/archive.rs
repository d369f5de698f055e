//! Archival collaborator: copies each input file, unmodified, to the archive
//! directory under a timestamped name before processing touches it.

use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::info;

use crate::error::{ConsolidatorError, Result};

/// Copies `in_file` from the input directory into the archive directory as
/// `{stem}_{yyyyMMdd_HHmmss}{ext}` and returns the archived file name.
/// Fails if the source file is missing.
pub fn copy_to_archive(in_path: &Path, archive_path: &Path, in_file: &str) -> Result<String> {
    let source = in_path.join(in_file);
    if !source.is_file() {
        return Err(ConsolidatorError::ArchiveSourceMissing(source));
    }

    fs::create_dir_all(archive_path)?;

    let name = Path::new(in_file);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| in_file.to_string());
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let archived = match name.extension() {
        Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{stamp}"),
    };

    fs::copy(&source, archive_path.join(&archived))?;
    info!(source = %in_file, archived = %archived, "archived input file");

    Ok(archived)
}
