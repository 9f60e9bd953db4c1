// Stop-word aware tokenizer for bilingual (Korean/English) patent and paper text.
//
// Pipeline per cell: lowercase -> replace every non-word character with a
// space -> split on whitespace -> keep candidates that are longer than two
// characters, not purely digits, not a short ASCII word, and not stop-listed.
// Order and duplicates are preserved because downstream counting depends on them.

use super::stopwords::StopwordFilter;
use super::traits::TextTokenizer;
use super::Token;

/// Minimum number of characters (exclusive) a token must have.
const MIN_TOKEN_CHARS: usize = 2;

/// The default tokenizer, backed by a shared stop-word filter.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    stopwords: &'static StopwordFilter,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            stopwords: StopwordFilter::standard(),
        }
    }
}

impl Tokenizer {
    pub fn with_stopwords(stopwords: &'static StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Tokenize a string slice. Empty input yields an empty sequence.
    pub fn tokenize_str(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }

        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| if is_word_char(c) { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .map(str::trim)
            .filter(|word| self.keeps(word))
            .map(str::to_string)
            .collect()
    }

    fn keeps(&self, word: &str) -> bool {
        word.chars().count() > MIN_TOKEN_CHARS
            && !is_all_digits(word)
            && !is_short_ascii_word(word)
            && self.stopwords.accepts(word)
    }
}

impl TextTokenizer for Tokenizer {
    fn tokenize(&self, text: Option<&str>) -> Vec<Token> {
        match text {
            Some(text) => self.tokenize_str(text),
            None => Vec::new(),
        }
    }
}

/// Unicode word characters (letters, digits, underscore) plus Hangul syllables.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_hangul_syllable(c)
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// First code point of each Unicode block of ten decimal digits (0-9).
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0,
    0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x16A60, 0x16B50, 0x1D7CE, 0x1D7D8,
    0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E950, 0x1FBF0,
];

/// Digits that are not decimal: superscripts, subscripts, circled and
/// parenthesized forms. A string of these still counts as a number.
const OTHER_DIGITS: &[(char, char)] = &[
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{1F100}', '\u{1F10A}'),
];

/// Decimal digits in any script plus digit forms like '²' and '①'.
/// Roman numerals and fractions are numeric but not digits.
fn is_digit(c: char) -> bool {
    let code = c as u32;
    DECIMAL_ZEROS
        .iter()
        .any(|&zero| (zero..zero + 10).contains(&code))
        || OTHER_DIGITS
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

fn is_all_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_digit)
}

/// One or two lowercase ASCII letters, e.g. "of", "x".
fn is_short_ascii_word(word: &str) -> bool {
    (1..=2).contains(&word.len()) && word.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(text: &str) -> Vec<Token> {
        Tokenizer::default().tokenize_str(text)
    }

    #[test]
    fn test_empty_and_missing() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize(None).is_empty());
        assert!(tokenizer.tokenize(Some("")).is_empty());
        assert!(tokenizer.tokenize(Some("   \n\t")).is_empty());
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Graphene-based ANODE, (lithium)!"),
            vec!["graphene", "anode", "lithium"]
        );
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        assert_eq!(
            tokenize("anode cathode anode"),
            vec!["anode", "cathode", "anode"]
        );
    }

    #[test]
    fn test_drops_short_and_numeric() {
        assert_eq!(tokenize("ab 12 2023 x3y anode"), vec!["x3y", "anode"]);
    }

    #[test]
    fn test_keeps_hangul() {
        assert_eq!(
            tokenize("리튬이온 배터리의 전해질 시스템"),
            vec!["리튬이온", "배터리의", "전해질"]
        );
    }

    #[test]
    fn test_underscore_is_word_char() {
        assert_eq!(tokenize("snake_case"), vec!["snake_case"]);
    }

    #[test]
    fn test_stopwords_removed() {
        assert!(tokenize("method method device").is_empty());
    }

    #[test]
    fn test_only_pure_digits_are_dropped() {
        // Roman numerals and fractions are numeric but not digits, so they stay
        assert_eq!(tokenize("ⅻⅻⅻ ½½½ ²²² ①②③ １２３"), vec!["ⅻⅻⅻ", "½½½"]);
    }

    #[test]
    fn test_helpers() {
        assert!(is_all_digits("2024"));
        assert!(is_all_digits("٢٠٢٤"));
        assert!(!is_all_digits("20a4"));
        assert!(is_short_ascii_word("ab"));
        assert!(!is_short_ascii_word("abc"));
        assert!(!is_short_ascii_word("가나"));
        assert!(is_hangul_syllable('힣'));
        assert!(!is_hangul_syllable('ㄱ'));
    }
}
