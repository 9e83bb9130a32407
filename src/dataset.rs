//! Unified table model.
//!
//! All sources are concatenated into one [`UnifiedTable`] whose column set is
//! the superset of every source's normalized headers, in first-seen order.
//! Cells a source never had are missing for its records. Records carry their
//! `origin` and a `mode` derived from it at construction time; the table is
//! immutable afterwards, and filtering produces a fresh snapshot.

use std::collections::BTreeSet;

use crate::mode::Mode;

/// One row of unified data. Cells are untyped text, parallel to the owning
/// table's column list; `None` marks an absent or blank cell.
#[derive(Debug, Clone)]
pub struct Record {
    pub origin: String,
    pub mode: Mode,
    cells: Vec<Option<String>>,
}

impl Record {
    pub fn cell(&self, column_index: usize) -> Option<&str> {
        self.cells.get(column_index).and_then(|c| c.as_deref())
    }
}

/// Rows from one parsed source, before unification. Headers are already
/// normalized (trimmed, lower-cased) and collision-free.
#[derive(Debug)]
pub struct SourceTable {
    pub origin: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Default)]
pub struct UnifiedTable {
    columns: Vec<String>,
    records: Vec<Record>,
}

/// Row selection supplied by the shell. `None` leaves a dimension
/// unrestricted; an explicitly empty set selects zero rows.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub modes: Option<BTreeSet<Mode>>,
    pub origins: Option<BTreeSet<String>>,
}

impl RowFilter {
    fn accepts(&self, record: &Record) -> bool {
        if let Some(modes) = &self.modes
            && !modes.contains(&record.mode)
        {
            return false;
        }
        if let Some(origins) = &self.origins
            && !origins.contains(&record.origin)
        {
            return false;
        }
        true
    }
}

impl UnifiedTable {
    /// Concatenates source tables in the order given. Row order within each
    /// source is preserved; no deduplication, no sorting. Each record's mode
    /// is derived from its origin here, once.
    pub fn concat(sources: Vec<SourceTable>) -> UnifiedTable {
        let mut columns: Vec<String> = Vec::new();
        for source in &sources {
            for column in &source.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut records = Vec::new();
        for source in sources {
            let mode = Mode::detect(&source.origin);
            // Map source-local cell positions onto the unified column order.
            let mapping: Vec<usize> = source
                .columns
                .iter()
                .map(|c| columns.iter().position(|u| u == c).unwrap_or(usize::MAX))
                .collect();
            for row in source.rows {
                let mut cells: Vec<Option<String>> = vec![None; columns.len()];
                for (local_idx, cell) in row.into_iter().enumerate() {
                    if let Some(&unified_idx) = mapping.get(local_idx)
                        && unified_idx != usize::MAX
                    {
                        cells[unified_idx] = cell;
                    }
                }
                records.push(Record {
                    origin: source.origin.clone(),
                    mode,
                    cells,
                });
            }
        }

        UnifiedTable { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell values of one column in row order.
    pub fn column_values(&self, column_index: usize) -> impl Iterator<Item = Option<&str>> {
        self.records.iter().map(move |r| r.cell(column_index))
    }

    /// Snapshot containing only the rows the filter accepts. Column order is
    /// retained even when a column loses all of its values.
    pub fn filtered(&self, filter: &RowFilter) -> UnifiedTable {
        UnifiedTable {
            columns: self.columns.clone(),
            records: self
                .records
                .iter()
                .filter(|r| filter.accepts(r))
                .cloned()
                .collect(),
        }
    }

}
