//! Progress reporting for a quiz run.
//!
//! The runner never writes to the terminal directly; everything the user
//! sees goes through a [`QuizReporter`].

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use crate::model::{Question, QuizOutcome, Verdict};

/// Progress reporting trait.
pub trait QuizReporter: Send + Sync {
    fn on_quiz_start(&self, loaded: usize, time_limit: Duration);
    fn on_prompt(&self, index: usize, question: &Question);
    fn on_verdict(&self, index: usize, verdict: &Verdict);
    fn on_complete(&self, outcome: &QuizOutcome);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_quiz_start(&self, _: usize, _: Duration) {}
    fn on_prompt(&self, _: usize, _: &Question) {}
    fn on_verdict(&self, _: usize, _: &Verdict) {}
    fn on_complete(&self, _: &QuizOutcome) {}
}

/// Writes the interactive transcript to a terminal-like sink.
///
/// Write failures are logged and otherwise ignored; a broken stdout should
/// not abort a quiz in progress.
pub struct ConsoleReporter<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the underlying sink.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, text: std::fmt::Arguments<'_>) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = out.write_fmt(text).and_then(|()| out.flush()) {
            tracing::warn!("failed to write quiz output: {e}");
        }
    }
}

impl<W: Write + Send> QuizReporter for ConsoleReporter<W> {
    fn on_quiz_start(&self, loaded: usize, time_limit: Duration) {
        self.emit(format_args!(
            "Loaded {loaded} questions. You have {} seconds per question.\n",
            time_limit.as_secs()
        ));
    }

    fn on_prompt(&self, _index: usize, question: &Question) {
        self.emit(format_args!("Question: {} = ", question.prompt));
    }

    fn on_verdict(&self, _index: usize, verdict: &Verdict) {
        match verdict {
            Verdict::Correct => {}
            Verdict::Incorrect { .. } => self.emit(format_args!("{verdict}\n")),
            Verdict::TimedOut => self.emit(format_args!("\nTime's up!\n")),
        }
    }

    fn on_complete(&self, outcome: &QuizOutcome) {
        self.emit(format_args!("{outcome}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunState;

    fn transcript(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn prompt_has_no_newline() {
        let reporter = ConsoleReporter::new(Vec::new());
        reporter.on_prompt(0, &Question::new("2+2", "4"));
        assert_eq!(transcript(reporter), "Question: 2+2 = ");
    }

    #[test]
    fn full_transcript() {
        let reporter = ConsoleReporter::new(Vec::new());
        reporter.on_quiz_start(12, Duration::from_secs(10));
        reporter.on_prompt(0, &Question::new("2+2", "4"));
        reporter.on_verdict(
            0,
            &Verdict::Incorrect {
                answer: "5".into(),
                expected: "4".into(),
            },
        );
        reporter.on_prompt(1, &Question::new("3+3", "6"));
        reporter.on_verdict(1, &Verdict::TimedOut);
        reporter.on_complete(&QuizOutcome {
            score: 0,
            total: 10,
            verdicts: vec![],
            state: RunState::HaltedByTimeout,
            elapsed: Duration::ZERO,
        });

        let text = transcript(reporter);
        assert!(text.starts_with("Loaded 12 questions. You have 10 seconds per question.\n"));
        assert!(text.contains("incorrect: answered \"5\", expected \"4\"\n"));
        assert!(text.contains("Question: 3+3 = \nTime's up!\n"));
        assert!(text.ends_with("Your Score 0/10\n"));
    }
}
