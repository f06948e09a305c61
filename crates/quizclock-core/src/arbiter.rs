//! Resolves one question by racing the next answer against its deadline.

use crate::config::StaleInputPolicy;
use crate::error::Result;
use crate::input::{AnswerSource, InputEvent};
use crate::model::{Question, Verdict};
use crate::reporter::QuizReporter;
use crate::timer::Deadline;

/// Lower-case and trim a typed answer.
pub fn normalize_answer(input: &str) -> String {
    input.to_lowercase().trim().to_string()
}

/// Compare a typed answer with the expected one.
///
/// The expected answer is lower-cased but not trimmed.
pub fn answers_match(input: &str, expected: &str) -> bool {
    normalize_answer(input) == expected.to_lowercase()
}

/// Classify an answer that arrived before the deadline.
pub fn judge(input: &str, expected: &str) -> Verdict {
    if answers_match(input, expected) {
        Verdict::Correct
    } else {
        Verdict::Incorrect {
            answer: normalize_answer(input),
            expected: expected.to_string(),
        }
    }
}

/// Ask `question` and wait for whichever comes first: an answer or the
/// deadline. Exactly one of the two resolves the question.
///
/// With [`StaleInputPolicy::Discard`], lines read before this question was
/// opened are dropped instead of answering it.
///
/// Errors only if the answer source has failed or closed.
pub async fn arbitrate<A>(
    index: usize,
    question: &Question,
    deadline: &mut Deadline,
    answers: &mut A,
    stale_input: StaleInputPolicy,
    reporter: &dyn QuizReporter,
) -> Result<Verdict>
where
    A: AnswerSource + ?Sized,
{
    let epoch = answers.open_question();
    let accept_from = match stale_input {
        StaleInputPolicy::Deliver => None,
        StaleInputPolicy::Discard => Some(epoch),
    };
    reporter.on_prompt(index, question);

    tokio::select! {
        () = &mut *deadline => {
            tracing::debug!(index, "deadline fired");
            Ok(Verdict::TimedOut)
        }
        answer = next_answer_from(answers, accept_from) => {
            let answer = answer?;
            let verdict = judge(answer.as_str(), &question.answer);
            tracing::debug!(index, %verdict, "answer received");
            Ok(verdict)
        }
    }
}

/// Next line read in `accept_from` or later; older lines are dropped.
async fn next_answer_from<A>(answers: &mut A, accept_from: Option<u64>) -> Result<InputEvent>
where
    A: AnswerSource + ?Sized,
{
    loop {
        let event = answers.next_answer().await?;
        match accept_from {
            Some(epoch) if event.epoch() < epoch => {
                tracing::debug!(
                    epoch = event.epoch(),
                    "discarding stale input {:?}",
                    event.as_str()
                );
            }
            _ => return Ok(event),
        }
    }
}
