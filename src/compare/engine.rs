// Comparison engine.
//
// Every named condition is analyzed on its own with the shared top N; no
// counts or state cross between conditions, so they can run in any order or
// in parallel (see `pipeline::concurrent`). The per-condition maps are then
// reduced into the common-keyword table.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::CommonKeywordTable;
use crate::corpus::dates::parse_date;
use crate::corpus::{CorpusSelector, CorpusSources};
use crate::error::AnalysisError;
use crate::pipeline::analysis::{AnalysisCondition, AnalysisResult, Analyzer};
use crate::pipeline::cancel::CancelToken;
use crate::text::tokenizer::Tokenizer;
use crate::text::traits::TextTokenizer;

/// Minimum number of conditions a comparison accepts.
pub const MIN_CONDITIONS: usize = 2;

/// An analysis condition with a caller-chosen name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCondition {
    pub name: String,
    pub condition: AnalysisCondition,
}

impl NamedCondition {
    pub fn new(name: impl Into<String>, condition: AnalysisCondition) -> Self {
        Self {
            name: name.into(),
            condition,
        }
    }

    /// Name the condition after its corpus selection and dates.
    pub fn labelled(condition: AnalysisCondition) -> Self {
        Self::new(condition.label(), condition)
    }
}

/// Parses `NAME=KIND:START:END` or `KIND:START:END` (named after its label).
impl FromStr for NamedCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, body) = match s.rsplit_once('=') {
            Some((name, body)) => (Some(name.trim()), body),
            None => (None, s),
        };

        let parts: Vec<&str> = body.split(':').map(str::trim).collect();
        let [kind, start, end] = parts.as_slice() else {
            return Err(format!("condition '{s}' must look like NAME=KIND:START:END"));
        };

        let selector: CorpusSelector = kind.parse()?;
        let start = parse_date(start).ok_or_else(|| format!("invalid start date '{start}'"))?;
        let end = parse_date(end).ok_or_else(|| format!("invalid end date '{end}'"))?;
        let condition =
            AnalysisCondition::from_dates(selector, start, end).map_err(|e| e.to_string())?;

        Ok(match name {
            Some(name) if !name.is_empty() => Self::new(name, condition),
            _ => Self::labelled(condition),
        })
    }
}

/// One condition's analysis inside a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub name: String,
    pub result: AnalysisResult,
}

/// Summary row for the per-condition statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionStats {
    pub name: String,
    pub total_tokens: usize,
    pub unique_tokens: usize,
    pub top_keywords: usize,
    pub max_frequency: usize,
}

/// Everything a comparison produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub conditions: Vec<ConditionResult>,
    pub common: CommonKeywordTable,
}

impl ComparisonResult {
    /// Pair condition names with their results (in the same order) and build
    /// the common-keyword table.
    pub fn assemble(conditions: &[NamedCondition], results: Vec<AnalysisResult>) -> Self {
        let conditions: Vec<ConditionResult> = conditions
            .iter()
            .zip(results)
            .map(|(named, result)| ConditionResult {
                name: named.name.clone(),
                result,
            })
            .collect();

        let common = CommonKeywordTable::build(
            conditions
                .iter()
                .map(|c| (c.name.as_str(), &c.result.frequencies)),
        );

        info!(
            conditions = conditions.len(),
            common_keywords = common.len(),
            "Comparison complete"
        );

        Self { conditions, common }
    }

    pub fn stats(&self) -> Vec<ConditionStats> {
        self.conditions
            .iter()
            .map(|c| ConditionStats {
                name: c.name.clone(),
                total_tokens: c.result.total_tokens,
                unique_tokens: c.result.unique_tokens,
                top_keywords: c.result.top_keyword_count(),
                max_frequency: c.result.max_frequency(),
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&AnalysisResult> {
        self.conditions
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.result)
    }
}

/// Runs a set of named conditions and reduces them.
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine<T: TextTokenizer = Tokenizer> {
    analyzer: Analyzer<T>,
}

impl ComparisonEngine {
    /// An engine using the standard Korean + English stop-word tokenizer.
    pub fn standard() -> Self {
        Self::new(Analyzer::standard())
    }
}

impl<T: TextTokenizer> ComparisonEngine<T> {
    pub fn new(analyzer: Analyzer<T>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &Analyzer<T> {
        &self.analyzer
    }

    /// Reject comparisons that cannot produce a meaningful common table.
    pub fn validate(conditions: &[NamedCondition], top_n: usize) -> Result<(), AnalysisError> {
        if conditions.len() < MIN_CONDITIONS {
            return Err(AnalysisError::TooFewConditions {
                given: conditions.len(),
            });
        }
        if top_n == 0 {
            return Err(AnalysisError::InvalidTopN(top_n));
        }

        let mut names = HashSet::new();
        for named in conditions {
            if !names.insert(named.name.as_str()) {
                return Err(AnalysisError::DuplicateConditionName(named.name.clone()));
            }
        }
        Ok(())
    }

    /// Run every condition sequentially, in the order given.
    pub fn compare(
        &self,
        sources: &CorpusSources,
        conditions: &[NamedCondition],
        top_n: usize,
    ) -> Result<ComparisonResult, AnalysisError> {
        self.compare_with_cancel(sources, conditions, top_n, &CancelToken::never())
    }

    pub fn compare_with_cancel(
        &self,
        sources: &CorpusSources,
        conditions: &[NamedCondition],
        top_n: usize,
        cancel: &CancelToken,
    ) -> Result<ComparisonResult, AnalysisError> {
        Self::validate(conditions, top_n)?;

        let results = conditions
            .iter()
            .map(|named| {
                self.analyzer
                    .analyze_with_cancel(sources, &named.condition, top_n, cancel)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComparisonResult::assemble(conditions, results))
    }
}
