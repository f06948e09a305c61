//! Core data model types for quizclock.
//!
//! Questions are loaded once and never mutated; verdicts and outcomes are
//! produced by the runner as the quiz progresses.

use std::fmt;
use std::time::Duration;

use crate::error::{QuizError, Result};

/// Number of questions asked in one run.
pub const QUIZ_LENGTH: usize = 10;

/// A single prompt and its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Text shown to the user.
    pub prompt: String,
    /// Expected answer, compared case-insensitively.
    pub answer: String,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// An ordered collection of questions. Order is presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The first `count` questions, or a count mismatch if fewer exist.
    pub fn select(&self, count: usize) -> Result<&[Question]> {
        if self.questions.len() < count {
            return Err(QuizError::NotEnoughQuestions {
                found: self.questions.len(),
                needed: count,
            });
        }
        Ok(&self.questions[..count])
    }
}

impl FromIterator<Question> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The classified outcome of one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Wrong answer. Not fatal; the run continues.
    Incorrect { answer: String, expected: String },
    /// The deadline fired before any answer arrived. Halts the run.
    TimedOut,
}

impl Verdict {
    /// Contribution of this verdict to the score.
    pub fn points(&self) -> usize {
        match self {
            Verdict::Correct => 1,
            Verdict::Incorrect { .. } | Verdict::TimedOut => 0,
        }
    }

    /// Returns `true` if the remaining questions must be skipped.
    pub fn halts_run(&self) -> bool {
        matches!(self, Verdict::TimedOut)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect { answer, expected } => {
                write!(f, "incorrect: answered {answer:?}, expected {expected:?}")
            }
            Verdict::TimedOut => write!(f, "timeout"),
        }
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    /// Asking the question at `index` (zero-based).
    Running { index: usize },
    Completed,
    HaltedByTimeout,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::HaltedByTimeout)
    }
}

/// The result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    /// Number of correct answers.
    pub score: usize,
    /// Fixed denominator, the configured quiz length.
    pub total: usize,
    /// One verdict per question actually asked, in order.
    pub verdicts: Vec<Verdict>,
    /// Terminal state of the run.
    pub state: RunState,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl QuizOutcome {
    /// Number of questions that were prompted.
    pub fn asked(&self) -> usize {
        self.verdicts.len()
    }

    pub fn timed_out(&self) -> bool {
        self.state == RunState::HaltedByTimeout
    }
}

impl fmt::Display for QuizOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your Score {}/{}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> QuestionSet {
        (0..count)
            .map(|i| Question::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn select_takes_first_n_in_order() {
        let set = numbered(12);
        let picked = set.select(QUIZ_LENGTH).unwrap();
        assert_eq!(picked.len(), 10);
        assert_eq!(picked[0].prompt, "q0");
        assert_eq!(picked[9].prompt, "q9");
    }

    #[test]
    fn select_rejects_short_sets() {
        let set = numbered(7);
        match set.select(QUIZ_LENGTH) {
            Err(QuizError::NotEnoughQuestions { found, needed }) => {
                assert_eq!(found, 7);
                assert_eq!(needed, 10);
            }
            other => panic!("expected count mismatch, got {other:?}"),
        }
    }

    #[test]
    fn verdict_points_and_halting() {
        let wrong = Verdict::Incorrect {
            answer: "5".into(),
            expected: "4".into(),
        };
        assert_eq!(Verdict::Correct.points(), 1);
        assert_eq!(wrong.points(), 0);
        assert_eq!(Verdict::TimedOut.points(), 0);
        assert!(Verdict::TimedOut.halts_run());
        assert!(!wrong.halts_run());
        assert!(wrong.to_string().contains("expected \"4\""));
    }

    #[test]
    fn outcome_display_uses_fixed_denominator() {
        let outcome = QuizOutcome {
            score: 2,
            total: 10,
            verdicts: vec![Verdict::Correct, Verdict::Correct, Verdict::TimedOut],
            state: RunState::HaltedByTimeout,
            elapsed: Duration::ZERO,
        };
        assert_eq!(outcome.to_string(), "Your Score 2/10");
        assert_eq!(outcome.asked(), 3);
        assert!(outcome.timed_out());
    }
}
