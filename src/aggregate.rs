//! Stateless rollups over the filtered unified table.
//!
//! Each aggregator reads the same immutable snapshot, converts its own
//! failure mode into a [`SectionError`], and tolerates zero-row input by
//! producing an empty or explicitly undefined result.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{dataset::UnifiedTable, error::SectionError, mode::Mode, numeric, roles::RoleRules};

/// One result line of a report section.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: String,
    pub average: Option<f64>,
    pub responses: Option<usize>,
}

/// Headline metrics for the overview section.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// Row count of the filtered table, not the size of the value pool.
    pub responses: usize,
    /// Mean over every coercible value across all rating columns.
    pub average: Option<f64>,
}

/// Pools all rating-column values into one mean. Never fails: an empty
/// table or a schema without rating columns yields an undefined average.
pub fn overview(table: &UnifiedTable, rules: &RoleRules) -> Overview {
    let rating = rules.rating_columns(table.columns());
    let pooled = rating
        .iter()
        .flat_map(|&idx| table.column_values(idx))
        .map(numeric::coerce);
    Overview {
        responses: table.len(),
        average: numeric::mean(pooled),
    }
}

/// Mean of the anchor column per origin, keys ascending. A group with no
/// numeric values keeps an undefined average rather than dropping out.
pub fn per_origin_average(
    table: &UnifiedTable,
    rules: &RoleRules,
) -> Result<Vec<AggregateRow>, SectionError> {
    let anchor = rules
        .anchor_column(table.columns())
        .ok_or_else(|| SectionError::missing(rules.anchor_label()))?;

    let mut groups: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for record in table.records() {
        groups
            .entry(record.origin.as_str())
            .or_default()
            .push(numeric::coerce(record.cell(anchor)));
    }

    Ok(groups
        .into_iter()
        .map(|(origin, values)| AggregateRow {
            key: origin.to_string(),
            average: numeric::mean(values),
            responses: None,
        })
        .collect())
}

/// Occurrence counts of the designated frequency column, restricted to
/// Distance-mode rows. Values are trimmed but case is preserved, so "X" and
/// "x" count separately. Ordered by descending count, ties by value.
pub fn value_frequencies(
    table: &UnifiedTable,
    rules: &RoleRules,
) -> Result<Vec<AggregateRow>, SectionError> {
    let idx = rules
        .frequency_column(table)
        .ok_or_else(|| SectionError::missing(rules.frequency_column.clone()))?;

    let values = table
        .records()
        .iter()
        .filter(|r| r.mode == Mode::Distance)
        .filter_map(|r| r.cell(idx))
        .map(|v| v.trim().to_string())
        .collect::<Vec<_>>();
    if values.is_empty() {
        return Err(SectionError::empty(rules.frequency_column.clone()));
    }

    Ok(values
        .into_iter()
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(value, count)| AggregateRow {
            key: value,
            average: None,
            responses: Some(count),
        })
        .collect())
}

/// Mean of each parameter column, in table-column order. Columns whose name
/// matches but whose data never coerces were already excluded by the rule
/// table, so every row here has a defined average.
pub fn parameter_averages(table: &UnifiedTable, rules: &RoleRules) -> Vec<AggregateRow> {
    rules
        .parameter_columns(table)
        .into_iter()
        .map(|idx| AggregateRow {
            key: table.columns()[idx].clone(),
            average: numeric::mean(table.column_values(idx).map(numeric::coerce)),
            responses: None,
        })
        .collect()
}
