//! Sheet export.
//!
//! Every report section exports as one named sheet. Sheet names are capped
//! at the spreadsheet limit of 31 characters; on disk each sheet becomes a
//! CSV file named after its snake_cased sheet name. Writing always quotes,
//! so an exported sheet re-reads to the exact same rows in the same order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use heck::ToSnakeCase;
use serde::Serialize;

use crate::io_utils;

pub const SHEET_NAME_MAX: usize = 31;

/// An ordered, rectangular section result ready for display or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: &str, headers: impl IntoIterator<Item = &'static str>) -> Sheet {
        Sheet {
            name: sheet_name(name),
            headers: headers.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// CSV file name for this sheet, e.g. "Delivery of Lecture" →
    /// `delivery_of_lecture.csv`.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name.to_snake_case())
    }
}

/// Truncates a raw sheet name to the 31-character spreadsheet limit.
pub fn sheet_name(raw: &str) -> String {
    raw.chars().take(SHEET_NAME_MAX).collect()
}

/// Writes the sheet as a CSV file under `dir` and returns the path.
pub fn write_sheet(dir: &Path, sheet: &Sheet) -> Result<PathBuf> {
    let path = dir.join(sheet.file_name());
    let mut writer = io_utils::open_csv_writer(&path)?;
    writer
        .write_record(&sheet.headers)
        .with_context(|| format!("Writing headers to {path:?}"))?;
    for row in &sheet.rows {
        writer
            .write_record(row)
            .with_context(|| format!("Writing row to {path:?}"))?;
    }
    writer.flush()?;
    Ok(path)
}

/// Reads an exported sheet back. The name is recovered from the file stem.
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let mut reader =
        io_utils::open_csv_reader_from_path(path, io_utils::DEFAULT_CSV_DELIMITER)?;
    let headers = reader
        .headers()
        .with_context(|| format!("Reading headers from {path:?}"))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Reading record from {path:?}"))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Sheet {
        name,
        headers,
        rows,
    })
}
