// Token frequency aggregation and the ranked frequency map.

pub mod aggregator;

use serde::{Deserialize, Serialize};

use crate::text::Token;

/// One ranked entry of a frequency map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: Token,
    pub count: usize,
}

/// Token counts ordered by descending count, ties in first-seen order.
///
/// Serialized as a list so rank order survives a JSON round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    entries: Vec<TokenCount>,
}

/// A row of the ranked keyword table shown to users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordShare {
    /// 1-based rank
    pub rank: usize,
    pub token: Token,
    pub count: usize,
    /// `count / total * 100`, rounded to two decimals
    pub share_percent: f64,
}

impl FrequencyMap {
    /// Build from entries that are already ranked.
    pub(crate) fn from_ranked(entries: Vec<TokenCount>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenCount> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[TokenCount] {
        &self.entries
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.count)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Count of the top-ranked token, 0 when empty.
    pub fn max_frequency(&self) -> usize {
        self.entries.first().map(|e| e.count).unwrap_or(0)
    }

    /// Entries whose token contains `needle`, case-insensitively, in rank order.
    pub fn search(&self, needle: &str) -> Vec<&TokenCount> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.token.to_lowercase().contains(&needle))
            .collect()
    }

    /// Ranked table rows with each token's share of `total_tokens`.
    pub fn shares(&self, total_tokens: usize) -> Vec<KeywordShare> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| KeywordShare {
                rank: i + 1,
                token: e.token.clone(),
                count: e.count,
                share_percent: share_percent(e.count, total_tokens),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = &'a TokenCount;
    type IntoIter = std::slice::Iter<'a, TokenCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn share_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}
