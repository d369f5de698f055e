//! Tabular output sinks. The pipeline treats these as black boxes: a header
//! row plus one row per record, either always-quoted CSV or a single-sheet
//! workbook with a bold gray header and auto-sized columns.

use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::error::Result;
use crate::schema::Record;

/// Output shape for one source type.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Csv,
    Xlsx { sheet: &'static str },
}

/// Writes the table and returns the number of data rows written.
pub fn write_table(
    format: &OutputFormat,
    path: &Path,
    titles: &[&'static str],
    records: &[Record],
) -> Result<usize> {
    match format {
        OutputFormat::Csv => write_csv(path, titles, records),
        OutputFormat::Xlsx { sheet } => write_xlsx(path, sheet, titles, records),
    }
}

fn write_csv(path: &Path, titles: &[&'static str], records: &[Record]) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;

    writer.write_record(titles)?;
    let mut written = 0;
    for record in records {
        writer.write_record(&record.values)?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

fn write_xlsx(
    path: &Path,
    sheet: &str,
    titles: &[&'static str],
    records: &[Record],
) -> Result<usize> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    let header_format = Format::new().set_bold().set_background_color(Color::Silver);
    for (col, title) in titles.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    let mut written = 0;
    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.values.iter().enumerate() {
            worksheet.write_string((row + 1) as u32, col as u16, value)?;
        }
        written += 1;
    }

    worksheet.autofit();
    workbook.save(path)?;

    Ok(written)
}
