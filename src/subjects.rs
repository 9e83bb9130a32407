//! Subject block detection.
//!
//! Feedback exports place one column per subject immediately after the
//! delivery-of-lecture anchor, with no naming convention to key on. The
//! block is discovered positionally: scan columns after the anchor in table
//! order and keep the maximal contiguous prefix of columns holding at least
//! one coercible numeric value. The first column with none terminates the
//! scan, so a numeric column past a gap is never detected. That matches the
//! export layouts seen so far; see DESIGN.md for the recorded decision.

use log::debug;

use crate::{dataset::UnifiedTable, error::SectionError, numeric, roles::RoleRules};

/// One discovered subject column.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectColumn {
    /// Normalized identifier of the underlying column.
    pub column: String,
    /// Display name: the first non-missing cell in the column.
    pub name: String,
    /// Mean of the column's coercible values.
    pub average: Option<f64>,
}

/// Detects the subject block relative to the anchor column.
///
/// Fails with [`SectionError::MissingColumn`] when no anchor exists in the
/// filtered schema and [`SectionError::EmptyResult`] when no column after
/// the anchor has any numeric value.
pub fn detect(table: &UnifiedTable, rules: &RoleRules) -> Result<Vec<SubjectColumn>, SectionError> {
    let anchor = rules
        .anchor_column(table.columns())
        .ok_or_else(|| SectionError::missing(rules.anchor_label()))?;

    let mut block = Vec::new();
    for idx in anchor + 1..table.columns().len() {
        let has_numeric = table
            .column_values(idx)
            .any(|cell| numeric::coerce(cell).is_some());
        if !has_numeric {
            debug!(
                "subject scan stopped at column '{}' (no numeric values)",
                table.columns()[idx]
            );
            break;
        }
        block.push(idx);
    }

    if block.is_empty() {
        let after_anchor = table
            .columns()
            .get(anchor + 1)
            .cloned()
            .unwrap_or_else(|| table.columns()[anchor].clone());
        return Err(SectionError::empty(after_anchor));
    }

    Ok(block
        .into_iter()
        .map(|idx| {
            let column = table.columns()[idx].clone();
            let name = table
                .column_values(idx)
                .flatten()
                .next()
                .map(|cell| cell.to_string())
                .unwrap_or_else(|| column.clone());
            let average = numeric::mean(table.column_values(idx).map(numeric::coerce));
            SubjectColumn {
                column,
                name,
                average,
            }
        })
        .collect())
}
