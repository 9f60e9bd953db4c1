// Unit tests for date-range filtering.
//
// Covers inclusive bounds, row-by-row exclusion of malformed dates, and the
// explicit "could not filter" outcomes.

use chrono::NaiveDate;

use keyword_trends::corpus::dates::{filter, DateFilterReport, DateRange, UnfilteredReason};
use keyword_trends::corpus::Corpus;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dated(dates: &[Option<&str>]) -> Corpus {
    dates
        .iter()
        .fold(Corpus::new(["출원일", "요약(영문)"]), |corpus, date| {
            corpus.with_row([*date, Some("text")])
        })
}

#[test]
fn bounds_are_inclusive() {
    let corpus = dated(&[
        Some("2023-01-01"),
        Some("2023-12-31"),
        Some("2022-12-31"),
        Some("2024-01-01"),
        Some("2023-12-31 23:59:59"),
    ]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert_eq!(out.rows, vec![0, 1, 4]);
    assert!(out.report.was_applied());
}

#[test]
fn single_day_range() {
    let corpus = dated(&[Some("2023.06.15"), Some("2023.06.16")]);
    let range = DateRange::new(d(2023, 6, 15), d(2023, 6, 15)).unwrap();
    assert_eq!(filter(&corpus, "출원일", range).rows, vec![0]);
}

#[test]
fn malformed_dates_excluded_not_fatal() {
    let corpus = dated(&[Some("2023-03-01"), Some("2023-13-01"), Some("TBD"), None]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert_eq!(out.rows, vec![0]);
    assert_eq!(
        out.report,
        DateFilterReport::Applied {
            kept: 1,
            excluded_out_of_range: 0,
            excluded_invalid: 3,
        }
    );
}

#[test]
fn zero_rows_in_range_is_applied_and_empty() {
    let corpus = dated(&[Some("2019-01-01")]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert!(out.rows.is_empty());
    assert_eq!(out.report.rows_kept(), 0);
    assert!(out.report.was_applied());
}

#[test]
fn utc_timestamp_column_is_filtered() {
    let corpus = dated(&[Some("2023-01-15T09:00:00Z"), Some("2019-06-30T09:00:00Z")]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert_eq!(out.rows, vec![0]);
    assert_eq!(
        out.report,
        DateFilterReport::Applied {
            kept: 1,
            excluded_out_of_range: 1,
            excluded_invalid: 0,
        }
    );
}

#[test]
fn common_export_formats_are_filtered() {
    let corpus = dated(&[
        Some("2023-05-02 10:15:30.250"),
        Some("2023-05-02T10:15:30+09:00"),
        Some("05/02/2023"),
        Some("2023-05"),
        Some("2023"),
        Some("2022-12-31T23:59:59.999Z"),
    ]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert_eq!(out.rows, vec![0, 1, 2, 3, 4]);
    assert!(out.report.was_applied());
}

#[test]
fn missing_date_column_passes_rows_through() {
    let corpus = dated(&[Some("2019-01-01"), Some("2030-01-01")]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "게시 날짜", range);
    assert_eq!(out.rows, vec![0, 1]);
    assert_eq!(
        out.report,
        DateFilterReport::Unavailable {
            reason: UnfilteredReason::MissingDateColumn,
            rows: 2,
        }
    );
}

#[test]
fn unparseable_column_passes_rows_through() {
    let corpus = dated(&[Some("soon"), Some("later"), None]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert_eq!(out.rows, vec![0, 1, 2]);
    assert!(!out.report.was_applied());
    assert_eq!(
        out.report,
        DateFilterReport::Unavailable {
            reason: UnfilteredReason::NoParseableDates,
            rows: 3,
        }
    );
}

#[test]
fn empty_corpus_reports_empty() {
    let corpus = Corpus::new(["출원일"]);
    let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31)).unwrap();

    let out = filter(&corpus, "출원일", range);
    assert!(out.rows.is_empty());
    assert_eq!(
        out.report,
        DateFilterReport::Unavailable {
            reason: UnfilteredReason::EmptyCorpus,
            rows: 0,
        }
    );
}

#[test]
fn report_serializes_with_status_tag() {
    let report = DateFilterReport::Unavailable {
        reason: UnfilteredReason::MissingDateColumn,
        rows: 4,
    };
    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["status"], "unavailable");
    assert_eq!(json["reason"], "missing_date_column");
    assert_eq!(json["rows"], 4);
}
