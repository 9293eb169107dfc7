//! Suspension helpers: countdowns and animation-completion inboxes.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::host::{AnimationCompletion, AnimationTicket};

/// Monotonic countdown advanced by frame deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Countdown {
    limit: Duration,
    elapsed: Duration,
}

impl Countdown {
    pub(crate) fn new(limit: Duration) -> Self {
        Self {
            limit,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances by `dt`. Returns true once the limit has been reached.
    pub(crate) fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.is_expired()
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.elapsed >= self.limit
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Receiving end of a phase's completion channel.
///
/// Opened in `on_enter` and dropped in `on_exit`. Once dropped, every
/// [`AnimationCompletion`] handed out from it reports into the void.
#[derive(Debug)]
pub(crate) struct CompletionInbox {
    sender: UnboundedSender<AnimationTicket>,
    receiver: UnboundedReceiver<AnimationTicket>,
}

impl CompletionInbox {
    pub(crate) fn open() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    pub(crate) fn handle(&self, ticket: AnimationTicket) -> AnimationCompletion {
        AnimationCompletion::new(ticket, self.sender.clone())
    }

    /// Drains queued completions. Returns true if `ticket` was among them;
    /// any other ticket is stale and discarded.
    pub(crate) fn drain_for(&mut self, ticket: AnimationTicket) -> bool {
        let mut found = false;
        while let Ok(completed) = self.receiver.try_recv() {
            if completed == ticket {
                found = true;
            } else {
                tracing::debug!(%completed, expected = %ticket, "ignoring stale completion");
            }
        }
        found
    }
}

/// Outcome of polling an [`AnimationWait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WaitStatus {
    Pending,
    Completed,
    /// The failsafe fired; the caller synthesizes the completion.
    TimedOut,
}

/// One outstanding animation request guarded by a failsafe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct AnimationWait {
    ticket: AnimationTicket,
    failsafe: Countdown,
}

impl AnimationWait {
    pub(crate) fn new(ticket: AnimationTicket, failsafe: Duration) -> Self {
        Self {
            ticket,
            failsafe: Countdown::new(failsafe),
        }
    }

    pub(crate) fn ticket(&self) -> AnimationTicket {
        self.ticket
    }

    pub(crate) fn waited(&self) -> Duration {
        self.failsafe.elapsed()
    }

    pub(crate) fn matches(&self, ticket: AnimationTicket) -> bool {
        self.ticket == ticket
    }

    /// Checks the inbox first, then advances the failsafe by `dt`.
    pub(crate) fn poll(&mut self, inbox: Option<&mut CompletionInbox>, dt: Duration) -> WaitStatus {
        if inbox.is_some_and(|inbox| inbox.drain_for(self.ticket)) {
            return WaitStatus::Completed;
        }
        if self.failsafe.tick(dt) {
            WaitStatus::TimedOut
        } else {
            WaitStatus::Pending
        }
    }
}
