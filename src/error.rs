// Error taxonomy for the analysis core.
//
// Only usage errors live here. Missing corpora, missing columns, empty cells
// and unparseable dates are normal data variability and flow through as empty
// results instead.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors reported by the analysis and comparison entry points.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Comparison needs at least two conditions to intersect.
    #[error("comparison needs at least 2 conditions, got {given}")]
    TooFewConditions { given: usize },

    /// Two conditions share a name, so their columns in the common table would collide.
    #[error("duplicate condition name: {0}")]
    DuplicateConditionName(String),

    /// `top_n` must be at least 1.
    #[error("top_n must be at least 1, got {0}")]
    InvalidTopN(usize),

    /// The start of a date range falls after its end.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// The caller cancelled the run through its `CancelToken`.
    #[error("analysis cancelled")]
    Cancelled,

    /// CSV input could not be parsed into a corpus.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A concurrent worker panicked or was aborted.
    #[error("worker failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::Join(err.to_string())
    }
}
