use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default number of keywords for a single analysis.
pub const DEFAULT_TOP_N: usize = 100;
/// Default number of keywords per condition in a comparison.
pub const DEFAULT_COMPARE_TOP_N: usize = 50;
/// Default number of comparison conditions analyzed in parallel.
pub const DEFAULT_CONCURRENCY: usize = 4;

const TOP_N_KEY: &str = "KEYWORD_TRENDS_TOP_N";
const COMPARE_TOP_N_KEY: &str = "KEYWORD_TRENDS_COMPARE_TOP_N";
const CONCURRENCY_KEY: &str = "KEYWORD_TRENDS_CONCURRENCY";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Numeric settings are kept
/// as raw strings and only validated when no command-line flag overrides
/// them, so a bad value for one setting never blocks a run that doesn't use it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    top_n: Option<String>,
    compare_top_n: Option<String>,
    concurrency: Option<String>,
    /// Patent CSV used when `--patents` is not given
    pub patent_csv: Option<PathBuf>,
    /// Paper CSV used when `--papers` is not given
    pub paper_csv: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            top_n: raw(&lookup, TOP_N_KEY),
            compare_top_n: raw(&lookup, COMPARE_TOP_N_KEY),
            concurrency: raw(&lookup, CONCURRENCY_KEY),
            patent_csv: raw(&lookup, "KEYWORD_TRENDS_PATENT_CSV").map(PathBuf::from),
            paper_csv: raw(&lookup, "KEYWORD_TRENDS_PAPER_CSV").map(PathBuf::from),
        }
    }

    /// Keywords for a single analysis: the flag, else the environment, else 100.
    pub fn top_n(&self, flag: Option<usize>) -> Result<usize> {
        resolve(flag, TOP_N_KEY, self.top_n.as_deref(), DEFAULT_TOP_N)
    }

    /// Keywords per comparison condition: the flag, else the environment, else 50.
    pub fn compare_top_n(&self, flag: Option<usize>) -> Result<usize> {
        resolve(
            flag,
            COMPARE_TOP_N_KEY,
            self.compare_top_n.as_deref(),
            DEFAULT_COMPARE_TOP_N,
        )
    }

    /// Parallel comparison workers: the flag, else the environment, else 4.
    pub fn concurrency(&self, flag: Option<usize>) -> Result<usize> {
        resolve(
            flag,
            CONCURRENCY_KEY,
            self.concurrency.as_deref(),
            DEFAULT_CONCURRENCY,
        )
    }

    /// Check that at least one corpus is available before running anything.
    pub fn require_corpus(patents: Option<&PathBuf>, papers: Option<&PathBuf>) -> Result<()> {
        if patents.is_none() && papers.is_none() {
            anyhow::bail!(
                "No corpus given. Pass --patents and/or --papers, or set\n\
                 KEYWORD_TRENDS_PATENT_CSV / KEYWORD_TRENDS_PAPER_CSV in your .env file."
            );
        }
        Ok(())
    }
}

fn raw<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn resolve(flag: Option<usize>, key: &str, raw: Option<&str>, default: usize) -> Result<usize> {
    if let Some(value) = flag {
        return Ok(value);
    }
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value: usize = raw
        .parse()
        .with_context(|| format!("{key} must be a positive integer, got '{raw}'"))?;
    if value == 0 {
        anyhow::bail!("{key} must be at least 1");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.top_n(None).unwrap(), DEFAULT_TOP_N);
        assert_eq!(config.compare_top_n(None).unwrap(), DEFAULT_COMPARE_TOP_N);
        assert_eq!(config.concurrency(None).unwrap(), DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("KEYWORD_TRENDS_TOP_N", "150"),
            ("KEYWORD_TRENDS_CONCURRENCY", " 8 "),
            ("KEYWORD_TRENDS_PAPER_CSV", "papers.csv"),
        ]));
        assert_eq!(config.top_n(None).unwrap(), 150);
        assert_eq!(config.top_n(Some(20)).unwrap(), 20);
        assert_eq!(config.compare_top_n(None).unwrap(), DEFAULT_COMPARE_TOP_N);
        assert_eq!(config.concurrency(None).unwrap(), 8);
        assert_eq!(config.paper_csv, Some(PathBuf::from("papers.csv")));
        assert_eq!(config.patent_csv, None);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let zero = Config::from_lookup(lookup(&[("KEYWORD_TRENDS_TOP_N", "0")]));
        assert!(zero.top_n(None).is_err());

        let garbage = Config::from_lookup(lookup(&[("KEYWORD_TRENDS_TOP_N", "many")]));
        assert!(garbage.top_n(None).is_err());
    }

    #[test]
    fn test_bad_value_only_fails_when_used() {
        let config = Config::from_lookup(lookup(&[
            ("KEYWORD_TRENDS_TOP_N", "many"),
            ("KEYWORD_TRENDS_CONCURRENCY", "-1"),
        ]));

        // The flag wins, so the malformed environment value is never parsed
        assert_eq!(config.top_n(Some(25)).unwrap(), 25);
        assert_eq!(config.concurrency(Some(2)).unwrap(), 2);
        // Settings without a bad value are unaffected
        assert_eq!(config.compare_top_n(None).unwrap(), DEFAULT_COMPARE_TOP_N);
        assert!(config.concurrency(None).is_err());
    }

    #[test]
    fn test_require_corpus() {
        assert!(Config::require_corpus(None, None).is_err());
        assert!(Config::require_corpus(Some(&PathBuf::from("p.csv")), None).is_ok());
    }
}
