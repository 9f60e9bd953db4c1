// Colored terminal output for keyword rankings and comparisons.
//
// This module handles all terminal-specific formatting: colors, bars and
// tables. main.rs delegates here once the core has produced its results.

use colored::Colorize;

use crate::compare::engine::ComparisonResult;
use crate::corpus::dates::{DateFilterReport, UnfilteredReason};
use crate::pipeline::analysis::AnalysisResult;

use super::truncate_chars;

/// Width of the frequency bar next to each keyword.
const BAR_WIDTH: usize = 20;
/// Widest condition name shown as a table column.
const CONDITION_COLUMN_CHARS: usize = 14;

/// Display a single analysis: summary metrics, then the ranked keyword table.
pub fn display_analysis(result: &AnalysisResult, limit: usize) {
    println!(
        "\n{}",
        format!("=== Keywords: {} ===", result.condition.label()).bold()
    );
    display_filter_warnings(result);

    if !result.has_data() {
        println!("  No data for the selected period and corpus.");
        return;
    }

    println!(
        "  Total tokens: {}  |  Unique tokens: {}  |  Top keywords: {}  |  Max frequency: {}",
        result.total_tokens,
        result.unique_tokens,
        result.top_keyword_count(),
        result.max_frequency()
    );
    println!();

    let max = result.max_frequency().max(1);
    for row in result.keyword_shares().iter().take(limit) {
        let filled = (row.count * BAR_WIDTH).div_ceil(max);
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(BAR_WIDTH.saturating_sub(filled))
        );
        println!(
            "  {:>4}. {:<24} {} {:>6}  {}",
            row.rank,
            truncate_chars(&row.token, 24),
            bar.bright_blue(),
            row.count,
            format!("{:.2}%", row.share_percent).dimmed()
        );
    }
    println!();
}

/// Display a comparison: per-condition statistics, then the common keywords.
pub fn display_comparison(result: &ComparisonResult, common_limit: usize) {
    println!(
        "\n{}",
        format!("=== Comparison ({} conditions) ===", result.conditions.len()).bold()
    );
    println!();

    println!(
        "  {:<32} {:>10} {:>10} {:>8} {:>8}",
        "Condition".dimmed(),
        "Total".dimmed(),
        "Unique".dimmed(),
        "Top".dimmed(),
        "Max".dimmed(),
    );
    println!("  {}", "-".repeat(72).dimmed());
    for stats in result.stats() {
        println!(
            "  {:<32} {:>10} {:>10} {:>8} {:>8}",
            truncate_chars(&stats.name, 29),
            stats.total_tokens,
            stats.unique_tokens,
            stats.top_keywords,
            stats.max_frequency,
        );
    }

    for condition in &result.conditions {
        display_filter_warnings(&condition.result);
        if !condition.result.has_data() {
            println!("  {} {}: no data", "~".yellow(), condition.name);
        }
    }

    println!("\n{}", "=== Common Keywords ===".bold());
    if result.common.is_empty() {
        println!("  No keyword appears in the top list of more than one condition.");
        return;
    }

    let mut header = format!("  {:<24}", "Keyword");
    for name in &result.common.conditions {
        header.push_str(&format!(
            " {:>width$}",
            truncate_chars(name, CONDITION_COLUMN_CHARS - 3),
            width = CONDITION_COLUMN_CHARS
        ));
    }
    header.push_str(&format!(" {:>8}", "Total"));
    println!("{}", header.dimmed());

    for row in result.common.top(common_limit) {
        let mut line = format!("  {:<24}", truncate_chars(&row.token, 24));
        for count in &row.counts {
            let cell = format!("{:>width$}", count.count, width = CONDITION_COLUMN_CHARS);
            if count.count == 0 {
                line.push_str(&format!(" {}", cell.dimmed()));
            } else {
                line.push_str(&format!(" {cell}"));
            }
        }
        line.push_str(&format!(" {:>8}", row.total.to_string().bold()));
        println!("{line}");
    }

    if result.common.len() > common_limit {
        println!(
            "  {}",
            format!("... {} more (use --json for the full table)", result.common.len() - common_limit)
                .dimmed()
        );
    }
    println!();
}

/// Warn when a corpus could not be date-filtered and all rows were used.
fn display_filter_warnings(result: &AnalysisResult) {
    for filter in &result.date_filters {
        if let Some(DateFilterReport::Unavailable { reason, rows }) = filter.report {
            let why = match reason {
                UnfilteredReason::EmptyCorpus => continue,
                UnfilteredReason::MissingDateColumn => "date column missing",
                UnfilteredReason::NoParseableDates => "no parseable dates",
            };
            println!(
                "  {} {} corpus: {}, using all {} rows unfiltered",
                "!".bright_red(),
                filter.kind,
                why,
                rows
            );
        }
    }
}
