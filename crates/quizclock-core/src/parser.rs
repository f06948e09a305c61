//! Question file parser.
//!
//! Loads questions from comma-separated text: one record per line, the first
//! field is the prompt, the second the answer, anything after is ignored.
//! There is no header row.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{QuizError, Result};
use crate::model::{Question, QuestionSet};

/// Open and parse a question file.
pub fn load_questions(path: &Path) -> Result<QuestionSet> {
    let file = File::open(path).map_err(|source| QuizError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_questions(file)?;
    tracing::debug!("loaded {} questions from {}", set.len(), path.display());
    Ok(set)
}

/// Parse questions from any reader (useful for testing).
///
/// Records with fewer than two fields are skipped. Input with no records at
/// all is an error.
pub fn parse_questions<R: Read>(reader: R) -> Result<QuestionSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = 0usize;
    let mut questions = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records += 1;
        match (record.get(0), record.get(1)) {
            (Some(prompt), Some(answer)) => questions.push(Question::new(prompt, answer)),
            _ => {
                tracing::trace!("skipping short record {records}");
            }
        }
    }

    if records == 0 {
        return Err(QuizError::NoQuestions);
    }
    Ok(QuestionSet::new(questions))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBLEMS: &str = "\
5+5,10
7+3,10
1+1,2
8+3,11
1+2,3
8+6,14
3+1,4
1+4,5
5+1,6
2+3,5
3+3,6
2+4,6
5+2,7
";

    #[test]
    fn parse_keeps_file_order() {
        let set = parse_questions(PROBLEMS.as_bytes()).unwrap();
        assert_eq!(set.len(), 13);
        assert_eq!(set.questions()[0], Question::new("5+5", "10"));
        assert_eq!(set.questions()[12], Question::new("5+2", "7"));
    }

    #[test]
    fn short_records_are_skipped() {
        let input = "lonely\n2+2,4\nalso lonely\n";
        let set = parse_questions(input.as_bytes()).unwrap();
        assert_eq!(set.questions(), &[Question::new("2+2", "4")]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let input = "Capital of France,Paris,geography,easy\n";
        let set = parse_questions(input.as_bytes()).unwrap();
        assert_eq!(set.questions()[0].answer, "Paris");
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let input = "\"what is 1,000 + 1?\",1001\n";
        let set = parse_questions(input.as_bytes()).unwrap();
        assert_eq!(set.questions()[0].prompt, "what is 1,000 + 1?");
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = parse_questions("".as_bytes());
        assert!(matches!(result, Err(QuizError::NoQuestions)));
    }

    #[test]
    fn only_short_records_yields_empty_set() {
        let set = parse_questions("a\nb\n".as_bytes()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let input: &[u8] = b"2+2,4\n\xff\xfe,oops\n";
        let result = parse_questions(input);
        assert!(matches!(result, Err(QuizError::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        std::fs::write(&path, PROBLEMS).unwrap();

        let set = load_questions(&path).unwrap();
        assert_eq!(set.len(), 13);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_questions(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(QuizError::Open { .. })));
    }
}
