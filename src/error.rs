use thiserror::Error;

/// Failure modes scoped to a single report section.
///
/// These never abort a whole run: each section catches its own condition and
/// the shell renders whichever sections succeeded alongside a message for
/// those that did not.
#[derive(Debug, Error)]
pub enum SectionError {
    /// No column in the filtered schema matches the required keyword.
    #[error("no column matching '{keyword}' found")]
    MissingColumn { keyword: String },

    /// The column exists but holds no usable values under the current
    /// filters. Distinguished from [`SectionError::MissingColumn`]: the
    /// schema has the column, the data does not.
    #[error("column '{column}' has no usable values after filtering")]
    EmptyResult { column: String },
}

impl SectionError {
    pub fn missing(keyword: impl Into<String>) -> Self {
        SectionError::MissingColumn {
            keyword: keyword.into(),
        }
    }

    pub fn empty(column: impl Into<String>) -> Self {
        SectionError::EmptyResult {
            column: column.into(),
        }
    }
}
