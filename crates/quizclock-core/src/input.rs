//! Background line reader and the answer handoff.
//!
//! One reader is started per run. It reads whole lines from the input stream
//! and hands each one over a capacity-1 channel to whichever question is
//! currently waiting. If nobody is waiting the reader blocks on the
//! handoff, so lines stay in typing order.
//!
//! Every line is stamped with the question epoch current when it was read.
//! The consumer opens a new epoch before each question, so a line read while
//! an earlier question was on screen can be told apart from a fresh one even
//! if it only reaches the handoff later.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{QuizError, Result};

/// One line of raw text typed by the user, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    line: String,
    epoch: u64,
}

impl InputEvent {
    pub fn new(line: impl Into<String>, epoch: u64) -> Self {
        Self {
            line: line.into(),
            epoch,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The question epoch that was open when the line was read.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Where the arbiter takes answers from.
#[async_trait]
pub trait AnswerSource: Send {
    /// Wait for the next line.
    ///
    /// Must be cancel-safe: if the returned future is dropped before it
    /// completes, no line is lost.
    async fn next_answer(&mut self) -> Result<InputEvent>;

    /// Start a new question epoch and return it. Lines read from now on carry
    /// this epoch or a later one.
    fn open_question(&mut self) -> u64;
}

type Handoff = io::Result<InputEvent>;

/// Consumer side of the handoff.
#[derive(Debug)]
pub struct InputEvents {
    rx: mpsc::Receiver<Handoff>,
    epoch: Arc<AtomicU64>,
    pending_error: Option<io::Error>,
}

/// Producer side of the handoff, for feeding answers without a reader thread.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::Sender<Handoff>,
    epoch: Arc<AtomicU64>,
}

impl InputSender {
    /// Hand over a line, stamped with the epoch open right now. Returns
    /// `false` once the consumer is gone.
    pub async fn send_line(&self, line: impl Into<String>) -> bool {
        let event = self.stamp(line);
        self.tx.send(Ok(event)).await.is_ok()
    }

    /// Report a read failure to the consumer.
    pub async fn send_error(&self, error: io::Error) -> bool {
        self.tx.send(Err(error)).await.is_ok()
    }

    fn stamp(&self, line: impl Into<String>) -> InputEvent {
        InputEvent::new(line, self.epoch.load(Ordering::Acquire))
    }
}

impl InputEvents {
    /// A connected sender/consumer pair with the standard capacity of one.
    pub fn channel() -> (InputSender, InputEvents) {
        let (tx, rx) = mpsc::channel(1);
        let epoch = Arc::new(AtomicU64::new(0));
        (
            InputSender {
                tx,
                epoch: Arc::clone(&epoch),
            },
            InputEvents {
                rx,
                epoch,
                pending_error: None,
            },
        )
    }
}

#[async_trait]
impl AnswerSource for InputEvents {
    async fn next_answer(&mut self) -> Result<InputEvent> {
        if let Some(error) = self.pending_error.take() {
            return Err(QuizError::InputFailed(error));
        }
        match self.rx.recv().await {
            Some(Ok(event)) => Ok(event),
            Some(Err(error)) => Err(QuizError::InputFailed(error)),
            None => Err(QuizError::InputClosed),
        }
    }

    fn open_question(&mut self) -> u64 {
        self.epoch.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Start the background reader over `reader`.
///
/// Reads run on a dedicated thread so a blocked terminal read never holds up
/// the async runtime, including at shutdown. The thread runs until the stream
/// ends, a read fails, or the consumer is dropped. A read failure is
/// forwarded to the consumer; end of stream simply closes the handoff.
pub fn spawn_input_reader<R>(reader: R) -> InputEvents
where
    R: BufRead + Send + 'static,
{
    let (sender, mut events) = InputEvents::channel();
    let spawned = std::thread::Builder::new()
        .name("quizclock-input".into())
        .spawn(move || read_lines(reader, sender));
    if let Err(e) = spawned {
        tracing::error!("failed to start input reader: {e}");
        events.pending_error = Some(e);
    }
    events
}

fn read_lines<R: BufRead>(mut reader: R, sender: InputSender) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                tracing::debug!("input stream closed");
                return;
            }
            Ok(_) => {
                // Bytes that are not UTF-8 are still an answer, just a wrong one.
                let event = sender.stamp(String::from_utf8_lossy(&buf));
                tracing::trace!(epoch = event.epoch(), "read line {:?}", event.as_str());
                if sender.tx.blocking_send(Ok(event)).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::error!("input read failed: {e}");
                let _ = sender.tx.blocking_send(Err(e));
                return;
            }
        }
    }
}
