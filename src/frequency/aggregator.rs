// Frequency aggregation over one or more token sequences.
//
// Sequences are concatenated (patent tokens then paper tokens for "both"),
// counted, and ranked by a stable descending sort so equal counts keep the
// order in which tokens were first seen. Totals cover every token, not just
// the top N that survive truncation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FrequencyMap, TokenCount};
use crate::error::AnalysisError;
use crate::pipeline::cancel::CancelToken;
use crate::text::Token;

/// How many tokens to count between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Ranked top-N counts plus corpus-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub frequencies: FrequencyMap,
    /// Every token counted, including those outside the top N
    pub total_tokens: usize,
    /// Distinct tokens seen, including those outside the top N
    pub unique_tokens: usize,
}

/// Count tokens across `sequences` and keep the `top_n` most frequent.
pub fn aggregate<'a, I>(sequences: I, top_n: usize) -> Result<Aggregate, AnalysisError>
where
    I: IntoIterator<Item = &'a [Token]>,
{
    aggregate_with_cancel(sequences, top_n, &CancelToken::never())
}

/// Like [`aggregate`], checking `cancel` while counting.
pub fn aggregate_with_cancel<'a, I>(
    sequences: I,
    top_n: usize,
    cancel: &CancelToken,
) -> Result<Aggregate, AnalysisError>
where
    I: IntoIterator<Item = &'a [Token]>,
{
    if top_n == 0 {
        return Err(AnalysisError::InvalidTopN(top_n));
    }

    // Index into `counts` per token; `counts` is in first-seen order.
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut total = 0usize;

    for sequence in sequences {
        for token in sequence {
            if total % CANCEL_CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            total += 1;
            match index.get(token.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.as_str(), counts.len());
                    counts.push((token.as_str(), 1));
                }
            }
        }
    }

    let unique = counts.len();

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    let entries = counts
        .into_iter()
        .map(|(token, count)| TokenCount {
            token: token.to_string(),
            count,
        })
        .collect();

    Ok(Aggregate {
        frequencies: FrequencyMap::from_ranked(entries),
        total_tokens: total,
        unique_tokens: unique,
    })
}
