// Corpus text extraction: date filter, then tokenize every text column.
//
// Tokens come out column-major: all rows of the first configured column, then
// all rows of the second, and so on. Columns the table lacks and blank cells
// contribute nothing. A missing or empty corpus is a valid "no data" result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dates::{self, DateFilterReport, DateRange};
use super::{Corpus, CorpusKind};
use crate::error::AnalysisError;
use crate::pipeline::cancel::CancelToken;
use crate::text::traits::TextTokenizer;
use crate::text::Token;

/// How many rows to tokenize between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 256;

/// Tokens pulled from one corpus, plus how the date filter behaved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub tokens: Vec<Token>,
    /// `None` when no corpus was supplied at all.
    pub date_filter: Option<DateFilterReport>,
}

/// Extracts tokens from a corpus according to its kind's column layout.
pub struct CorpusTextExtractor<'a> {
    tokenizer: &'a dyn TextTokenizer,
}

impl<'a> CorpusTextExtractor<'a> {
    pub fn new(tokenizer: &'a dyn TextTokenizer) -> Self {
        Self { tokenizer }
    }

    /// Extract without cancellation.
    pub fn extract(&self, corpus: Option<&Corpus>, kind: CorpusKind, range: DateRange) -> Extraction {
        // A token that never fires cannot produce an error
        self.extract_with_cancel(corpus, kind, range, &CancelToken::never())
            .unwrap_or_default()
    }

    /// Extract, checking `cancel` periodically while tokenizing.
    pub fn extract_with_cancel(
        &self,
        corpus: Option<&Corpus>,
        kind: CorpusKind,
        range: DateRange,
        cancel: &CancelToken,
    ) -> Result<Extraction, AnalysisError> {
        let Some(corpus) = corpus else {
            return Ok(Extraction::default());
        };

        let layout = kind.layout();
        let filtered = dates::filter(corpus, layout.date_column, range);

        if filtered.rows.is_empty() {
            return Ok(Extraction {
                tokens: Vec::new(),
                date_filter: Some(filtered.report),
            });
        }

        let mut tokens = Vec::new();
        for name in layout.text_columns {
            let Some(column) = corpus.column_index(name) else {
                continue;
            };
            for (i, &row) in filtered.rows.iter().enumerate() {
                if i % CANCEL_CHECK_INTERVAL == 0 {
                    cancel.check()?;
                }
                if let Some(text) = corpus.cell(row, column) {
                    tokens.extend(self.tokenizer.tokenize(Some(text)));
                }
            }
        }

        debug!(
            kind = %kind,
            rows = filtered.rows.len(),
            tokens = tokens.len(),
            "Extracted corpus text"
        );

        Ok(Extraction {
            tokens,
            date_filter: Some(filtered.report),
        })
    }
}
