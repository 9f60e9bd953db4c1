// CSV -> Corpus parsing for the command-line shell.
//
// The analysis core never touches files; this is the boundary where exported
// patent/paper spreadsheets become in-memory tables. Input is UTF-8 with an
// optional byte-order mark (Excel exports carry one).

use std::io::Read;

use csv::ReaderBuilder;
use tracing::info;

use super::Corpus;
use crate::error::AnalysisError;

const UTF8_BOM: char = '\u{FEFF}';

/// Read a headed CSV stream into a corpus.
///
/// Ragged rows are accepted: short rows are padded, long rows truncated.
pub fn read_corpus<R: Read>(reader: R) -> Result<Corpus, AnalysisError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut corpus = Corpus::new(headers);
    for record in reader.records() {
        let record = record?;
        corpus.push_row(record.iter().map(Some));
    }

    info!(rows = corpus.len(), columns = corpus.columns().len(), "Loaded CSV corpus");
    Ok(corpus)
}

/// Convenience wrapper for in-memory CSV text.
pub fn read_corpus_from_str(csv: &str) -> Result<Corpus, AnalysisError> {
    read_corpus(csv.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_headers_and_rows() {
        let corpus = read_corpus_from_str("\u{FEFF}게시 날짜,제목\n2023-01-01,\"Hello, world\"\n2023-02-01,\n")
            .unwrap();
        assert_eq!(corpus.columns(), &["게시 날짜".to_string(), "제목".to_string()]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.cell(0, 1), Some("Hello, world"));
        assert_eq!(corpus.cell(1, 1), None);
    }

    #[test]
    fn test_ragged_rows() {
        let corpus = read_corpus_from_str("a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.cell(0, 2), None);
        assert_eq!(corpus.cell(1, 2), Some("3"));
    }
}
