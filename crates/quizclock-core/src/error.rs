//! Quiz error types.
//!
//! Setup failures (the question file, the question count, configuration) are
//! reported before anything is asked. Input failures happen mid-run and are
//! fatal, since no further answers can ever be collected.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing or running a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question file could not be opened.
    #[error("failed to open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The question file is not valid delimited text.
    #[error("error reading questions: {0}")]
    Parse(#[from] csv::Error),

    /// The question file contained no records at all.
    #[error("no questions found in question file")]
    NoQuestions,

    /// Fewer questions were loaded than the quiz needs.
    #[error("not enough questions in the file: found {found}, need {needed}")]
    NotEnoughQuestions { found: usize, needed: usize },

    /// The configuration file or an override could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The input stream ended while an answer was awaited.
    #[error("input stream closed")]
    InputClosed,

    /// Reading from the input stream failed.
    #[error("failed to read input: {0}")]
    InputFailed(#[source] std::io::Error),
}

impl QuizError {
    /// Returns `true` if the run never started because of this error.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            QuizError::Open { .. }
                | QuizError::Parse(_)
                | QuizError::NoQuestions
                | QuizError::NotEnoughQuestions { .. }
                | QuizError::Config(_)
        )
    }
}

pub type Result<T, E = QuizError> = std::result::Result<T, E>;
