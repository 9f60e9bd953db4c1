// Common-keyword table across comparison conditions.
//
// Only each condition's top-N keywords take part: a token ranked outside a
// condition's top N is invisible here. A token is kept when it appears in at
// least two conditions; its row lists a count per condition (0 when absent)
// and the sum, and rows are ordered by that sum with a stable sort.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyMap;
use crate::text::Token;

/// Minimum number of conditions a keyword must appear in.
pub const MIN_SHARED_CONDITIONS: usize = 2;

/// A keyword's count under one condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCount {
    pub condition: String,
    pub count: usize,
}

/// One row of the common-keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonKeyword {
    pub token: Token,
    /// One entry per condition, in condition order
    pub counts: Vec<ConditionCount>,
    pub total: usize,
}

impl CommonKeyword {
    pub fn count_for(&self, condition: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.condition == condition)
            .map(|c| c.count)
    }

    /// Number of conditions where this keyword made the top N.
    pub fn condition_hits(&self) -> usize {
        self.counts.iter().filter(|c| c.count > 0).count()
    }
}

/// Keywords shared by two or more conditions, highest total first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonKeywordTable {
    pub conditions: Vec<String>,
    pub rows: Vec<CommonKeyword>,
}

impl CommonKeywordTable {
    /// Build the table from (condition name, top-N map) pairs in condition order.
    pub fn build<'a, I>(maps: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a FrequencyMap)>,
    {
        let maps: Vec<(&str, &FrequencyMap)> = maps.into_iter().collect();
        let conditions: Vec<String> = maps.iter().map(|(name, _)| name.to_string()).collect();

        // token -> per-condition counts, kept in first-seen order
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut seen: Vec<(&str, Vec<usize>)> = Vec::new();

        for (slot, &(_, map)) in maps.iter().enumerate() {
            for entry in map.iter() {
                let i = *index.entry(entry.token.as_str()).or_insert_with(|| {
                    seen.push((entry.token.as_str(), vec![0; maps.len()]));
                    seen.len() - 1
                });
                seen[i].1[slot] = entry.count;
            }
        }

        let mut rows: Vec<CommonKeyword> = seen
            .into_iter()
            .filter(|(_, counts)| {
                counts.iter().filter(|&&c| c > 0).count() >= MIN_SHARED_CONDITIONS
            })
            .map(|(token, counts)| CommonKeyword {
                token: token.to_string(),
                total: counts.iter().sum(),
                counts: conditions
                    .iter()
                    .zip(counts)
                    .map(|(name, count)| ConditionCount {
                        condition: name.clone(),
                        count,
                    })
                    .collect(),
            })
            .collect();

        rows.sort_by(|a, b| b.total.cmp(&a.total));

        Self { conditions, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<&CommonKeyword> {
        self.rows.iter().find(|r| r.token == token)
    }

    /// The first `n` rows.
    pub fn top(&self, n: usize) -> &[CommonKeyword] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::TokenCount;

    fn map(pairs: &[(&str, usize)]) -> FrequencyMap {
        FrequencyMap::from_ranked(
            pairs
                .iter()
                .map(|&(token, count)| TokenCount {
                    token: token.to_string(),
                    count,
                })
                .collect(),
        )
    }

    #[test]
    fn test_single_condition_tokens_are_dropped() {
        let a = map(&[("foo", 5), ("bar", 3)]);
        let b = map(&[("bar", 2), ("baz", 1)]);
        let table = CommonKeywordTable::build([("A", &a), ("B", &b)]);

        assert_eq!(table.len(), 1);
        let bar = table.get("bar").unwrap();
        assert_eq!(bar.count_for("A"), Some(3));
        assert_eq!(bar.count_for("B"), Some(2));
        assert_eq!(bar.total, 5);
        assert!(table.get("foo").is_none());
        assert!(table.get("baz").is_none());
    }

    #[test]
    fn test_absent_condition_counts_zero() {
        let a = map(&[("cell", 4), ("anode", 2)]);
        let b = map(&[("anode", 1)]);
        let c = map(&[("cell", 3), ("anode", 1)]);
        let table = CommonKeywordTable::build([("a", &a), ("b", &b), ("c", &c)]);

        let cell = table.get("cell").unwrap();
        assert_eq!(cell.count_for("b"), Some(0));
        assert_eq!(cell.condition_hits(), 2);
        assert_eq!(cell.total, 7);
        assert_eq!(table.get("anode").unwrap().condition_hits(), 3);
    }

    #[test]
    fn test_rows_sorted_by_total_with_stable_ties() {
        let a = map(&[("alpha", 2), ("beta", 2), ("gamma", 1)]);
        let b = map(&[("gamma", 9), ("beta", 1), ("alpha", 1)]);
        let table = CommonKeywordTable::build([("a", &a), ("b", &b)]);

        let order: Vec<&str> = table.rows.iter().map(|r| r.token.as_str()).collect();
        assert_eq!(order, vec!["gamma", "alpha", "beta"]);
        assert_eq!(table.top(2).len(), 2);
        assert_eq!(table.top(10).len(), 3);
    }
}
