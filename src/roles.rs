//! Column role inference.
//!
//! Incoming schemas are unknown in advance, so semantic roles are assigned
//! by an explicit keyword table evaluated against the normalized column
//! identifiers. The defaults mirror the feedback exports this tool was built
//! for and can be overridden from a YAML config (see [`crate::config`]) so
//! the heuristic stays auditable and testable in isolation.

use serde::{Deserialize, Serialize};

use crate::{dataset::UnifiedTable, numeric};

pub const DEFAULT_RATING_KEYWORDS: &[&str] = &["rate", "rating"];
pub const DEFAULT_ANCHOR_KEYWORDS: &[&str] = &["delivery of lecture"];
pub const DEFAULT_PARAMETER_KEYWORDS: &[&str] = &[
    "ease",
    "admission",
    "support",
    "syllabus",
    "curriculum",
    "self-learning",
    "quality",
];
pub const DEFAULT_FREQUENCY_COLUMN: &str = "learner support centre";

/// Keyword table mapping column-name substrings to semantic roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RoleRules {
    /// Substrings marking rating columns pooled by the overview.
    pub rating_keywords: Vec<String>,
    /// Substrings marking the anchor column; the first column matching any
    /// of them, in table order, is the anchor.
    pub anchor_keywords: Vec<String>,
    /// Substrings marking candidate parameter columns.
    pub parameter_keywords: Vec<String>,
    /// Exact normalized name of the column tallied by the frequency section.
    pub frequency_column: String,
}

impl Default for RoleRules {
    fn default() -> Self {
        RoleRules {
            rating_keywords: owned(DEFAULT_RATING_KEYWORDS),
            anchor_keywords: owned(DEFAULT_ANCHOR_KEYWORDS),
            parameter_keywords: owned(DEFAULT_PARAMETER_KEYWORDS),
            frequency_column: DEFAULT_FREQUENCY_COLUMN.to_string(),
        }
    }
}

fn owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

fn matches_any(column: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| column.contains(k.as_str()))
}

impl RoleRules {
    /// Indices of columns whose identifier contains a rating keyword.
    pub fn rating_columns(&self, columns: &[String]) -> Vec<usize> {
        columns
            .iter()
            .enumerate()
            .filter(|(_, c)| matches_any(c, &self.rating_keywords))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// First column, in table order, containing an anchor keyword.
    pub fn anchor_column(&self, columns: &[String]) -> Option<usize> {
        columns
            .iter()
            .position(|c| matches_any(c, &self.anchor_keywords))
    }

    /// Name-matched parameter columns that also hold at least one coercible
    /// numeric value in the current table. A column whose name matches but
    /// whose data never coerces is excluded.
    pub fn parameter_columns(&self, table: &UnifiedTable) -> Vec<usize> {
        table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| matches_any(c, &self.parameter_keywords))
            .filter(|(idx, _)| {
                table
                    .column_values(*idx)
                    .any(|cell| numeric::coerce(cell).is_some())
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Index of the designated frequency column, by exact normalized name.
    pub fn frequency_column(&self, table: &UnifiedTable) -> Option<usize> {
        table.column_index(&self.frequency_column)
    }

    /// Human-readable anchor description for section error messages.
    pub fn anchor_label(&self) -> String {
        self.anchor_keywords.join(" / ")
    }
}
