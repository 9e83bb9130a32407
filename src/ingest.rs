//! Source loading and normalization.
//!
//! Each input file becomes one [`SourceTable`]: headers are trimmed and
//! case-folded to lowercase, blank cells become missing, and every record is
//! tagged with the file name it came from. CSV/TSV files go through the
//! `csv` crate, spreadsheet files through `calamine`; the extension decides.
//! A file that cannot be parsed fails on its own — the failure is collected
//! and reported, and the remaining sources still load.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Reader, open_workbook_auto};
use encoding_rs::Encoding;
use log::{info, warn};

use crate::{
    dataset::{SourceTable, UnifiedTable},
    io_utils,
};

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb"];

/// A source that could not be parsed as tabular data.
#[derive(Debug)]
pub struct LoadFailure {
    pub origin: String,
    pub error: anyhow::Error,
}

/// Result of loading a batch of inputs: the unified table built from the
/// sources that parsed, plus one failure entry per source that did not.
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: UnifiedTable,
    pub failures: Vec<LoadFailure>,
}

/// Normalizes a raw header to its canonical identifier.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Loads every input, batching successes and failures separately.
pub fn load_sources(
    paths: &[PathBuf],
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> LoadOutcome {
    let mut sources = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        let origin = origin_of(path);
        match load_single(path, &origin, delimiter, encoding) {
            Ok(source) => {
                info!(
                    "Loaded {} row(s) x {} column(s) from '{origin}'",
                    source.rows.len(),
                    source.columns.len()
                );
                sources.push(source);
            }
            Err(error) => {
                warn!("Skipping '{origin}': {error:#}");
                failures.push(LoadFailure { origin, error });
            }
        }
    }
    LoadOutcome {
        table: UnifiedTable::concat(sources),
        failures,
    }
}

fn origin_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_excel(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXCEL_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn load_single(
    path: &Path,
    origin: &str,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> Result<SourceTable> {
    if is_excel(path) {
        load_excel(path, origin)
    } else {
        load_csv(path, origin, delimiter, encoding)
    }
}

/// Two headers folding to the same identifier would silently overwrite each
/// other downstream, so the whole source is rejected instead.
fn check_header_collisions(columns: &[String], origin: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            bail!("header '{column}' appears more than once after normalization in '{origin}'");
        }
    }
    Ok(())
}

fn normalize_cell(raw: String) -> Option<String> {
    if raw.trim().is_empty() { None } else { Some(raw) }
}

fn load_csv(
    path: &Path,
    origin: &str,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> Result<SourceTable> {
    let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    let columns: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    check_header_collisions(&columns, origin)?;

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        let mut row: Vec<Option<String>> = decoded.into_iter().map(normalize_cell).collect();
        // Ragged rows are padded or clipped to the header width.
        row.resize(columns.len(), None);
        rows.push(row);
    }
    Ok(SourceTable {
        origin: origin.to_string(),
        columns,
        rows,
    })
}

fn load_excel(path: &Path, origin: &str) -> Result<SourceTable> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("Workbook {path:?} has no worksheets"))?
        .with_context(|| format!("Reading first worksheet of {path:?}"))?;

    let mut row_iter = range.rows();
    let header_row = row_iter
        .next()
        .ok_or_else(|| anyhow!("First worksheet of {path:?} is empty"))?;
    let columns: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell_text(cell)))
        .collect();
    check_header_collisions(&columns, origin)?;

    let rows = row_iter
        .map(|row| {
            (0..columns.len())
                .map(|idx| row.get(idx).and_then(cell_value))
                .collect()
        })
        .collect();
    Ok(SourceTable {
        origin: origin.to_string(),
        columns,
        rows,
    })
}

fn cell_text(cell: &Data) -> String {
    calamine::DataType::as_string(cell).unwrap_or_else(|| cell.to_string())
}

fn cell_value(cell: &Data) -> Option<String> {
    if matches!(cell, Data::Empty) {
        return None;
    }
    normalize_cell(cell_text(cell))
}
