//! Per-question deadline.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::time::Sleep;

/// Where a deadline is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineState {
    Armed,
    Fired,
    Cancelled,
}

/// A one-shot countdown measured from creation.
///
/// Awaiting a `Deadline` resolves exactly once, when the limit elapses. Once
/// cancelled it never resolves, so a deadline left over from one question
/// cannot wake a later wait.
#[derive(Debug)]
pub struct Deadline {
    sleep: Pin<Box<Sleep>>,
    limit: Duration,
    state: DeadlineState,
}

impl Deadline {
    /// Arm a deadline `limit` from now. A zero limit fires on first poll.
    pub fn start(limit: Duration) -> Self {
        Self {
            sleep: Box::pin(tokio::time::sleep(limit)),
            limit,
            state: DeadlineState::Armed,
        }
    }

    /// Stop the deadline. Returns `true` if it was still armed.
    ///
    /// Safe to call any number of times, including after it fired.
    pub fn cancel(&mut self) -> bool {
        if self.state == DeadlineState::Armed {
            self.state = DeadlineState::Cancelled;
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> DeadlineState {
        self.state
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Future for Deadline {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        if this.state != DeadlineState::Armed {
            return Poll::Pending;
        }
        match this.sleep.as_mut().poll(cx) {
            Poll::Ready(()) => {
                this.state = DeadlineState::Fired;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
