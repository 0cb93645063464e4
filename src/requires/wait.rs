//! # Handles to in-flight waits.
//!
//! Every [`Poller::require`](crate::Poller::require) call returns a [`WaitHandle`].
//! The handle identifies the logical wait ([`WaitId`]), can cancel it, and can be
//! awaited for its [`WaitOutcome`].
//!
//! Dropping a handle does **not** cancel the wait; it keeps polling in the
//! background until it reaches a terminal state.

use std::fmt;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identity of one logical wait, stable across all its poll cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaitId(Uuid);

impl WaitId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for WaitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Terminal state of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Dependencies became available; `on_ready` ran.
    Ready,
    /// Attempt budget exhausted; `on_timeout` (or the console line) ran.
    TimedOut,
    /// Cancelled before reaching another state; no callback ran.
    Cancelled,
    /// A callback panicked.
    Panicked,
}

impl WaitOutcome {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            WaitOutcome::Ready => "wait_ready",
            WaitOutcome::TimedOut => "wait_timed_out",
            WaitOutcome::Cancelled => "wait_cancelled",
            WaitOutcome::Panicked => "wait_panicked",
        }
    }
}

enum State {
    /// Settled synchronously inside `require`.
    Done(WaitOutcome),
    /// Polling on the runtime.
    Polling(JoinHandle<WaitOutcome>),
}

/// Handle to one logical wait.
pub struct WaitHandle {
    id: WaitId,
    cancel: CancellationToken,
    state: State,
}

impl WaitHandle {
    pub(crate) fn done(id: WaitId, outcome: WaitOutcome) -> Self {
        Self {
            id,
            cancel: CancellationToken::new(),
            state: State::Done(outcome),
        }
    }

    pub(crate) fn polling(
        id: WaitId,
        cancel: CancellationToken,
        join: JoinHandle<WaitOutcome>,
    ) -> Self {
        Self {
            id,
            cancel,
            state: State::Polling(join),
        }
    }

    /// Identity of this wait.
    pub fn id(&self) -> WaitId {
        self.id
    }

    /// Stops the wait before its next check.
    ///
    /// No-op if the wait already reached a terminal state.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once the wait reached a terminal state.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Done(_) => true,
            State::Polling(join) => join.is_finished(),
        }
    }

    /// Waits for the terminal state.
    pub async fn outcome(self) -> WaitOutcome {
        match self.state {
            State::Done(outcome) => outcome,
            State::Polling(join) => match join.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_panic() => {
                    tracing::error!(wait_id = %self.id, "wait callback panicked");
                    WaitOutcome::Panicked
                }
                Err(_) => WaitOutcome::Cancelled,
            },
        }
    }
}

impl fmt::Debug for WaitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitHandle")
            .field("id", &self.id)
            .field("finished", &self.is_finished())
            .finish()
    }
}
