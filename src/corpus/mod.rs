// Tabular corpora: patent and paper records already loaded into memory.
//
// A corpus is a header row plus string cells. Each corpus kind knows which
// column holds its date and which columns carry text; columns missing from a
// particular table are tolerated everywhere.

pub mod dates;
pub mod extractor;
pub mod loader;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two record types the tool analyzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    Patent,
    Paper,
}

/// Date column and ordered text columns for a corpus kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusLayout {
    pub date_column: &'static str,
    pub text_columns: &'static [&'static str],
}

const PATENT_LAYOUT: CorpusLayout = CorpusLayout {
    // Application date
    date_column: "출원일",
    // Title, abstract and representative claim, each in Korean then English
    text_columns: &[
        "발명의명칭(국문)",
        "발명의명칭(영문)",
        "요약(국문)",
        "요약(영문)",
        "대표청구항(국문)",
        "대표청구항(영문)",
    ],
};

const PAPER_LAYOUT: CorpusLayout = CorpusLayout {
    // Publication date
    date_column: "게시 날짜",
    // Title, abstract, keywords
    text_columns: &["제목", "초록", "키워드"],
};

impl CorpusKind {
    pub fn layout(self) -> &'static CorpusLayout {
        match self {
            CorpusKind::Patent => &PATENT_LAYOUT,
            CorpusKind::Paper => &PAPER_LAYOUT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorpusKind::Patent => "patent",
            CorpusKind::Paper => "paper",
        }
    }
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which corpora a condition draws its tokens from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusSelector {
    Patent,
    Paper,
    Both,
}

impl CorpusSelector {
    /// The corpus kinds to extract, in concatenation order (patents first).
    pub fn kinds(self) -> &'static [CorpusKind] {
        match self {
            CorpusSelector::Patent => &[CorpusKind::Patent],
            CorpusSelector::Paper => &[CorpusKind::Paper],
            CorpusSelector::Both => &[CorpusKind::Patent, CorpusKind::Paper],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorpusSelector::Patent => "patent",
            CorpusSelector::Paper => "paper",
            CorpusSelector::Both => "both",
        }
    }
}

impl fmt::Display for CorpusSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorpusSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patent" | "patents" => Ok(CorpusSelector::Patent),
            "paper" | "papers" => Ok(CorpusSelector::Paper),
            "both" => Ok(CorpusSelector::Both),
            other => Err(format!(
                "unknown corpus kind '{other}' (expected patent, paper or both)"
            )),
        }
    }
}

/// An in-memory table of records.
///
/// Cells are optional strings; an empty string is stored as `None` so that
/// "missing" and "blank" behave the same during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Corpus {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with `None`, long rows truncated,
    /// so every row lines up with the header.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: impl IntoIterator<Item = Option<S>>) {
        let mut row: Vec<Option<String>> = cells
            .into_iter()
            .take(self.columns.len())
            .map(|cell| {
                cell.map(|c| c.as_ref().to_string())
                    .filter(|c| !c.is_empty())
            })
            .collect();
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Builder-style helper for tests and small fixtures.
    pub fn with_row<S: AsRef<str>>(mut self, cells: impl IntoIterator<Item = Option<S>>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value at (row, column), `None` when missing or blank.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }
}

/// The two optional corpora an analysis draws from.
#[derive(Debug, Clone, Default)]
pub struct CorpusSources {
    pub patents: Option<Corpus>,
    pub papers: Option<Corpus>,
}

impl CorpusSources {
    pub fn new(patents: Option<Corpus>, papers: Option<Corpus>) -> Self {
        Self { patents, papers }
    }

    pub fn get(&self, kind: CorpusKind) -> Option<&Corpus> {
        match kind {
            CorpusKind::Patent => self.patents.as_ref(),
            CorpusKind::Paper => self.papers.as_ref(),
        }
    }
}
