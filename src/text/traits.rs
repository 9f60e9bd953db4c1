// Tokenizer trait: swap-ready abstraction.
//
// Corpus extraction only needs "text in, tokens out", so it depends on this
// trait rather than the concrete stop-word tokenizer. Tests use it to feed
// predictable tokens through the extractor.

use super::Token;

/// Turns one cell of raw text into an ordered sequence of tokens.
pub trait TextTokenizer: Send + Sync {
    /// Tokenize a single cell. `None` (a missing cell) yields no tokens.
    fn tokenize(&self, text: Option<&str>) -> Vec<Token>;
}
