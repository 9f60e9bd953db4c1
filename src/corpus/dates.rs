// Date-range row selection.
//
// Rows whose date cell parses and falls inside [start, end] (inclusive on
// both ends) are kept; rows with unparseable dates are dropped one by one.
// When filtering is impossible altogether (no rows, no date column, or not a
// single parseable date) every row is returned and the report says so, so
// callers can tell "filtered" apart from "could not filter".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Corpus;
use crate::error::AnalysisError;

/// Date-only formats tried in order after trimming.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y",
];

/// Timestamp formats without an offset; only the calendar date is used.
/// `%.f` also matches when there is no fractional part.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Timestamps with a numeric offset that RFC 3339 parsing does not cover
/// (space separator, `+0900` without a colon).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalysisError> {
        if start > end {
            return Err(AnalysisError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Why a corpus could not be date-filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnfilteredReason {
    EmptyCorpus,
    MissingDateColumn,
    NoParseableDates,
}

/// What the date filter actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DateFilterReport {
    /// Dates were applied.
    Applied {
        kept: usize,
        excluded_out_of_range: usize,
        excluded_invalid: usize,
    },
    /// No filtering was possible; all rows were passed through.
    Unavailable { reason: UnfilteredReason, rows: usize },
}

impl DateFilterReport {
    /// Number of rows handed on to extraction.
    pub fn rows_kept(&self) -> usize {
        match *self {
            DateFilterReport::Applied { kept, .. } => kept,
            DateFilterReport::Unavailable { rows, .. } => rows,
        }
    }

    pub fn was_applied(&self) -> bool {
        matches!(self, DateFilterReport::Applied { .. })
    }
}

/// Indices of the surviving rows plus the filter report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRows {
    pub rows: Vec<usize>,
    pub report: DateFilterReport,
}

/// Parse a date cell. Returns `None` for anything not in a recognised format.
///
/// Offset timestamps keep the calendar date of their own offset. A bare
/// year or year-month means the first day of that period.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // Korean exports often write "2023.01.15."
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .or_else(|| {
                    OFFSET_FORMATS
                        .iter()
                        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
                })
                .map(|dt| dt.date_naive())
        })
        .or_else(|| parse_period_start(trimmed))
}

/// `2023` -> 2023-01-01, `2023-07` / `2023.07` / `2023/07` -> 2023-07-01.
fn parse_period_start(value: &str) -> Option<NaiveDate> {
    let (year, month) = match value.split_once(|c: char| matches!(c, '-' | '.' | '/')) {
        Some((year, month)) => (year, month),
        None => (value, "1"),
    };
    if year.len() != 4 || !all_ascii_digits(year) {
        return None;
    }
    if !(1..=2).contains(&month.len()) || !all_ascii_digits(month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn all_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Select the rows of `corpus` whose `date_column` falls inside `range`.
pub fn filter(corpus: &Corpus, date_column: &str, range: DateRange) -> FilteredRows {
    let all_rows = || (0..corpus.len()).collect::<Vec<_>>();

    if corpus.is_empty() {
        return FilteredRows {
            rows: Vec::new(),
            report: DateFilterReport::Unavailable {
                reason: UnfilteredReason::EmptyCorpus,
                rows: 0,
            },
        };
    }

    let Some(column) = corpus.column_index(date_column) else {
        warn!(
            column = date_column,
            rows = corpus.len(),
            "Date column missing, passing all rows through unfiltered"
        );
        return FilteredRows {
            rows: all_rows(),
            report: DateFilterReport::Unavailable {
                reason: UnfilteredReason::MissingDateColumn,
                rows: corpus.len(),
            },
        };
    };

    let mut rows = Vec::new();
    let mut out_of_range = 0;
    let mut invalid = 0;

    for row in 0..corpus.len() {
        match corpus.cell(row, column).and_then(parse_date) {
            Some(date) if range.contains(date) => rows.push(row),
            Some(_) => out_of_range += 1,
            None => invalid += 1,
        }
    }

    if invalid == corpus.len() {
        warn!(
            column = date_column,
            rows = corpus.len(),
            "No parseable dates, passing all rows through unfiltered"
        );
        return FilteredRows {
            rows: all_rows(),
            report: DateFilterReport::Unavailable {
                reason: UnfilteredReason::NoParseableDates,
                rows: corpus.len(),
            },
        };
    }

    debug!(
        column = date_column,
        kept = rows.len(),
        out_of_range,
        invalid,
        "Date filter applied"
    );

    FilteredRows {
        report: DateFilterReport::Applied {
            kept: rows.len(),
            excluded_out_of_range: out_of_range,
            excluded_invalid: invalid,
        },
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_date("2023-01-15"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date(" 2023.01.15. "), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("2023/1/5"), Some(d(2023, 1, 5)));
        assert_eq!(parse_date("20230115"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15 13:45:00"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15T13:45:00"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15 13:45:00.123"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("01/15/2023"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_offset_timestamps() {
        assert_eq!(parse_date("2023-01-15T13:45:00Z"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15T13:45:00.5+09:00"), Some(d(2023, 1, 15)));
        assert_eq!(parse_date("2023-01-15 23:30:00+0900"), Some(d(2023, 1, 15)));
        // Calendar date of the stated offset, not converted to UTC
        assert_eq!(parse_date("2023-01-01T02:00:00+09:00"), Some(d(2023, 1, 1)));
    }

    #[test]
    fn test_parse_partial_dates() {
        assert_eq!(parse_date("2023"), Some(d(2023, 1, 1)));
        assert_eq!(parse_date("2023-07"), Some(d(2023, 7, 1)));
        assert_eq!(parse_date("2023.7"), Some(d(2023, 7, 1)));
        assert_eq!(parse_date("2023-13"), None);
        assert_eq!(parse_date("202"), None);
        assert_eq!(parse_date("23-07"), None);
    }

    #[test]
    fn test_range_rejects_inverted() {
        assert!(DateRange::new(d(2024, 1, 1), d(2023, 1, 1)).is_err());
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_filter_counts() {
        let corpus = Corpus::new(["date"])
            .with_row([Some("2023-01-01")])
            .with_row([Some("2022-12-31")])
            .with_row([Some("garbage")])
            .with_row([None::<&str>]);
        let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

        let out = filter(&corpus, "date", range);
        assert_eq!(out.rows, vec![0]);
        assert_eq!(
            out.report,
            DateFilterReport::Applied {
                kept: 1,
                excluded_out_of_range: 1,
                excluded_invalid: 2,
            }
        );
    }
}
