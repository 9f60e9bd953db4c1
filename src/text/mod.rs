// Text normalization: stop-word exclusion and tokenization.

pub mod stopwords;
pub mod tokenizer;
pub mod traits;

/// A cleaned, stop-word-filtered unit of text used for frequency counting.
pub type Token = String;
