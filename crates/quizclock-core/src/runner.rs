//! Quiz runner.
//!
//! Drives a fixed number of questions in file order, one fresh deadline per
//! question, and stops at the first timeout.

use std::io::BufRead;
use std::time::Duration;

use tokio::time::Instant;

use crate::arbiter::arbitrate;
use crate::config::StaleInputPolicy;
use crate::error::Result;
use crate::input::{spawn_input_reader, AnswerSource};
use crate::model::{Question, QuestionSet, QuizOutcome, RunState, Verdict, QUIZ_LENGTH};
use crate::reporter::QuizReporter;
use crate::timer::Deadline;

/// Configuration for a quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Questions asked per run; also the score denominator.
    pub quiz_length: usize,
    /// Time allowed for each question.
    pub time_limit: Duration,
    /// Handling of lines typed before a question is shown.
    pub stale_input: StaleInputPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            quiz_length: QUIZ_LENGTH,
            time_limit: Duration::from_secs(10),
            stale_input: StaleInputPolicy::Deliver,
        }
    }
}

/// Runs one quiz. Consumed by the run, so a halted quiz cannot be resumed.
#[derive(Debug)]
pub struct QuizRunner {
    config: RunnerConfig,
    state: RunState,
}

impl QuizRunner {
    pub fn new(config: RunnerConfig) -> Self {
        if config.time_limit.is_zero() {
            tracing::warn!("time limit is zero, every question will time out immediately");
        }
        Self {
            config,
            state: RunState::NotStarted,
        }
    }

    /// Run the quiz reading answers line by line from `input`.
    ///
    /// The question count is checked before the input reader is started, so
    /// a short question set fails without asking anything.
    pub async fn run<R>(
        self,
        questions: &QuestionSet,
        input: R,
        reporter: &dyn QuizReporter,
    ) -> Result<QuizOutcome>
    where
        R: BufRead + Send + 'static,
    {
        let selected = questions.select(self.config.quiz_length)?;
        let mut answers = spawn_input_reader(input);
        self.drive(questions.len(), selected, &mut answers, reporter)
            .await
    }

    /// Run the quiz against an already running answer source.
    pub async fn run_with<A>(
        self,
        questions: &QuestionSet,
        answers: &mut A,
        reporter: &dyn QuizReporter,
    ) -> Result<QuizOutcome>
    where
        A: AnswerSource + ?Sized,
    {
        let selected = questions.select(self.config.quiz_length)?;
        self.drive(questions.len(), selected, answers, reporter)
            .await
    }

    async fn drive<A>(
        mut self,
        loaded: usize,
        selected: &[Question],
        answers: &mut A,
        reporter: &dyn QuizReporter,
    ) -> Result<QuizOutcome>
    where
        A: AnswerSource + ?Sized,
    {
        let start = Instant::now();
        reporter.on_quiz_start(loaded, self.config.time_limit);

        let mut score = 0usize;
        let mut verdicts: Vec<Verdict> = Vec::with_capacity(selected.len());

        for (index, question) in selected.iter().enumerate() {
            self.state = RunState::Running { index };

            let mut deadline = Deadline::start(self.config.time_limit);
            let verdict = arbitrate(
                index,
                question,
                &mut deadline,
                answers,
                self.config.stale_input,
                reporter,
            )
            .await;
            deadline.cancel();
            let verdict = verdict?;

            score += verdict.points();
            reporter.on_verdict(index, &verdict);

            let halts = verdict.halts_run();
            verdicts.push(verdict);
            if halts {
                self.state = RunState::HaltedByTimeout;
                break;
            }
        }

        if !self.state.is_terminal() {
            self.state = RunState::Completed;
        }

        let outcome = QuizOutcome {
            score,
            total: self.config.quiz_length,
            verdicts,
            state: self.state,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            score = outcome.score,
            asked = outcome.asked(),
            state = ?outcome.state,
            "quiz finished"
        );
        reporter.on_complete(&outcome);
        Ok(outcome)
    }
}
