//! Row sources: delimited-text files and workbook sheets.
//!
//! Both readers load the whole file before returning; batch sizes here are
//! small inventory exports, not unbounded streams. `rows_read` counts every
//! visited line/row, including headers, blanks, and rows the mapper later
//! rejects.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tracing::debug;

use crate::error::{ConsolidatorError, Result};
use crate::splitter::split_line;

/// Raw rows plus the visited-row count for reporting.
#[derive(Debug, Default)]
pub struct RowBatch {
    pub rows: Vec<Vec<String>>,
    pub rows_read: usize,
}

/// Which worksheet to read from a workbook.
#[derive(Debug, Clone, Copy)]
pub enum SheetRef {
    First,
    Named(&'static str),
}

/// Reads a delimited-text file line by line through the quoted-field
/// splitter. With `skip_header`, the first line is consumed before counting
/// starts. Empty lines count toward `rows_read` but produce no row.
pub fn read_csv_rows(path: &Path, skip_header: bool) -> Result<RowBatch> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut batch = RowBatch::default();
    let mut first_line = true;
    for line in reader.lines() {
        let line = line?;
        if first_line {
            first_line = false;
            if skip_header {
                continue;
            }
        }
        batch.rows_read += 1;
        if line.is_empty() {
            continue;
        }
        batch.rows.push(split_line(&line));
    }

    debug!(path = %path.display(), rows = batch.rows_read, "read delimited file");
    Ok(batch)
}

/// Reads one worksheet into string rows. The first `header_rows` rows are
/// counted but produce no data row, regardless of content.
pub fn read_xlsx_rows(path: &Path, sheet: SheetRef, header_rows: usize) -> Result<RowBatch> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = match sheet {
        SheetRef::First => {
            let name = workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ConsolidatorError::MissingSheet("<first>".to_string()))?;
            workbook.worksheet_range(&name)?
        }
        SheetRef::Named(name) => workbook
            .worksheet_range(name)
            .map_err(|_| ConsolidatorError::MissingSheet(name.to_string()))?,
    };

    let mut batch = RowBatch::default();
    for (i, row) in range.rows().enumerate() {
        batch.rows_read += 1;
        if i < header_rows {
            continue;
        }
        batch.rows.push(row.iter().map(cell_to_string).collect());
    }

    debug!(path = %path.display(), rows = batch.rows_read, "read worksheet");
    Ok(batch)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
