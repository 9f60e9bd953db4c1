// Single-condition analysis: the text-to-frequency pipeline.
//
// For each corpus kind the condition selects: filter rows by date, extract
// tokens from the kind's text columns, then count everything together. The
// run is a pure function of (corpora, condition, top_n); nothing is retained
// between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::dates::{DateFilterReport, DateRange};
use crate::corpus::extractor::CorpusTextExtractor;
use crate::corpus::{CorpusKind, CorpusSelector, CorpusSources};
use crate::error::AnalysisError;
use crate::frequency::aggregator::aggregate_with_cancel;
use crate::frequency::{FrequencyMap, KeywordShare};
use crate::text::tokenizer::Tokenizer;
use crate::text::traits::TextTokenizer;

use super::cancel::CancelToken;

/// Which corpora to read and which dates to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisCondition {
    pub selector: CorpusSelector,
    pub range: DateRange,
}

impl AnalysisCondition {
    pub fn new(selector: CorpusSelector, range: DateRange) -> Self {
        Self { selector, range }
    }

    /// Validate the date range and build a condition.
    pub fn from_dates(
        selector: CorpusSelector,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, AnalysisError> {
        Ok(Self::new(selector, DateRange::new(start, end)?))
    }

    /// Human-readable label, e.g. `patent(2023-01-01~2024-12-31)`.
    pub fn label(&self) -> String {
        format!("{}({}~{})", self.selector, self.range.start, self.range.end)
    }
}

/// Date-filter outcome for one corpus kind within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusFilterReport {
    pub kind: CorpusKind,
    /// `None` when the corpus was not supplied.
    pub report: Option<DateFilterReport>,
}

/// Output of a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub condition: AnalysisCondition,
    pub top_n: usize,
    pub frequencies: FrequencyMap,
    pub total_tokens: usize,
    pub unique_tokens: usize,
    pub date_filters: Vec<CorpusFilterReport>,
}

impl AnalysisResult {
    /// False when no tokens survived (no corpus, no rows in range, or all stop words).
    pub fn has_data(&self) -> bool {
        !self.frequencies.is_empty()
    }

    /// Count of the most frequent keyword.
    pub fn max_frequency(&self) -> usize {
        self.frequencies.max_frequency()
    }

    /// Number of keywords kept after top-N truncation.
    pub fn top_keyword_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Ranked keyword table with share of all tokens.
    pub fn keyword_shares(&self) -> Vec<KeywordShare> {
        self.frequencies.shares(self.total_tokens)
    }

    /// True if any selected corpus fell back to unfiltered rows.
    pub fn used_unfiltered_rows(&self) -> bool {
        self.date_filters
            .iter()
            .filter_map(|f| f.report)
            .any(|r| !r.was_applied() && r.rows_kept() > 0)
    }
}

/// Runs the pipeline with a given tokenizer.
#[derive(Debug, Clone, Default)]
pub struct Analyzer<T: TextTokenizer = Tokenizer> {
    tokenizer: T,
}

impl Analyzer {
    pub fn standard() -> Self {
        Self::new(Tokenizer::default())
    }
}

impl<T: TextTokenizer> Analyzer<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    pub fn analyze(
        &self,
        sources: &CorpusSources,
        condition: &AnalysisCondition,
        top_n: usize,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_cancel(sources, condition, top_n, &CancelToken::never())
    }

    pub fn analyze_with_cancel(
        &self,
        sources: &CorpusSources,
        condition: &AnalysisCondition,
        top_n: usize,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        if top_n == 0 {
            return Err(AnalysisError::InvalidTopN(top_n));
        }

        let extractor = CorpusTextExtractor::new(&self.tokenizer);
        let mut sequences = Vec::new();
        let mut date_filters = Vec::new();

        for &kind in condition.selector.kinds() {
            let extraction =
                extractor.extract_with_cancel(sources.get(kind), kind, condition.range, cancel)?;
            date_filters.push(CorpusFilterReport {
                kind,
                report: extraction.date_filter,
            });
            sequences.push(extraction.tokens);
        }

        let aggregate =
            aggregate_with_cancel(sequences.iter().map(Vec::as_slice), top_n, cancel)?;

        info!(
            condition = %condition.label(),
            total_tokens = aggregate.total_tokens,
            unique_tokens = aggregate.unique_tokens,
            top_keywords = aggregate.frequencies.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            condition: *condition,
            top_n,
            frequencies: aggregate.frequencies,
            total_tokens: aggregate.total_tokens,
            unique_tokens: aggregate.unique_tokens,
            date_filters,
        })
    }
}

/// Analyze one condition with the default stop-word tokenizer.
pub fn analyze(
    sources: &CorpusSources,
    condition: &AnalysisCondition,
    top_n: usize,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::standard().analyze(sources, condition, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sources() -> CorpusSources {
        let patents = Corpus::new(["출원일", "발명의명칭(영문)"])
            .with_row([Some("2023-05-01"), Some("Lithium anode coating")])
            .with_row([Some("2021-05-01"), Some("Obsolete anode")]);
        let papers = Corpus::new(["게시 날짜", "제목"])
            .with_row([Some("2023-06-01"), Some("Anode degradation in lithium cells")]);
        CorpusSources::new(Some(patents), Some(papers))
    }

    #[test]
    fn test_both_concatenates_corpora() {
        let condition =
            AnalysisCondition::from_dates(CorpusSelector::Both, d(2023, 1, 1), d(2023, 12, 31))
                .unwrap();
        let result = analyze(&sources(), &condition, 10).unwrap();

        assert_eq!(result.frequencies.get("anode"), Some(2));
        assert_eq!(result.frequencies.get("lithium"), Some(2));
        assert_eq!(result.frequencies.get("obsolete"), None);
        // lithium, anode, coating, anode, degradation, lithium ("in" and "cells" dropped)
        assert_eq!(result.total_tokens, 6);
        assert_eq!(result.unique_tokens, 4);
        assert_eq!(result.date_filters.len(), 2);
        assert!(!result.used_unfiltered_rows());
    }

    #[test]
    fn test_missing_corpus_is_no_data() {
        let condition =
            AnalysisCondition::from_dates(CorpusSelector::Paper, d(2023, 1, 1), d(2023, 12, 31))
                .unwrap();
        let result = analyze(&CorpusSources::default(), &condition, 10).unwrap();
        assert!(!result.has_data());
        assert_eq!(result.max_frequency(), 0);
        assert_eq!(result.date_filters[0].report, None);
    }

    #[test]
    fn test_label() {
        let condition =
            AnalysisCondition::from_dates(CorpusSelector::Patent, d(2023, 1, 1), d(2024, 12, 31))
                .unwrap();
        assert_eq!(condition.label(), "patent(2023-01-01~2024-12-31)");
    }
}
