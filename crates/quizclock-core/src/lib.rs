//! quizclock-core — Timed question loop, deadlines, and scoring.
//!
//! A background reader hands typed lines to whichever question is waiting;
//! each question races that handoff against its own deadline, and the runner
//! tallies the verdicts.

pub mod arbiter;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod reporter;
pub mod runner;
pub mod timer;

pub use error::{QuizError, Result};
pub use model::{Question, QuestionSet, QuizOutcome, RunState, Verdict, QUIZ_LENGTH};
pub use runner::{QuizRunner, RunnerConfig};
