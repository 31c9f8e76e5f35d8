// Command bridge: bounded hand-off of throw requests from chat into the frame loop.
//
// Backed by a tokio mpsc channel used only through its non-blocking
// `try_send`/`try_recv` halves, so neither side ever waits on the other.

use super::types::ThrowSignal;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};
use tracing::{debug, warn};

const OVERFLOW_LOG_THROTTLE: Duration = Duration::from_secs(2);

/// Result of offering one throw to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueue {
    Queued,
    /// Queue full; the throw was discarded.
    Dropped,
    /// The frame loop stopped accepting throws; nothing will ever consume this one.
    Closed,
}

/// Producer half, held by the chat listener.
#[derive(Debug, Clone)]
pub struct ThrowSender {
    tx: mpsc::Sender<ThrowSignal>,
}

/// Consumer half, owned by the frame loop.
#[derive(Debug)]
pub struct ThrowReceiver {
    rx: mpsc::Receiver<ThrowSignal>,
}

pub fn command_bridge(capacity: usize) -> (ThrowSender, ThrowReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ThrowSender { tx }, ThrowReceiver { rx })
}

impl ThrowSender {
    /// Never blocks. A full queue silently drops the throw.
    pub fn try_throw(&self) -> Enqueue {
        match self.tx.try_send(ThrowSignal) {
            Ok(()) => Enqueue::Queued,
            Err(TrySendError::Full(_)) => Enqueue::Dropped,
            Err(TrySendError::Closed(_)) => Enqueue::Closed,
        }
    }

    /// `try_throw` that rate-limits its own overflow warning via `last_overflow_log`.
    pub fn try_throw_logged(&self, last_overflow_log: &mut Option<Instant>) -> Enqueue {
        let outcome = self.try_throw();
        match outcome {
            Enqueue::Queued => debug!("throw queued"),
            Enqueue::Dropped => {
                let due = last_overflow_log.is_none_or(|at| at.elapsed() >= OVERFLOW_LOG_THROTTLE);
                if due {
                    *last_overflow_log = Some(Instant::now());
                    warn!("throw queue full; dropping throw");
                }
            }
            Enqueue::Closed => debug!("throw intake closed; throw discarded"),
        }
        outcome
    }
}

impl ThrowReceiver {
    /// Takes at most one pending throw. Never blocks.
    pub fn try_take(&mut self) -> Option<ThrowSignal> {
        match self.rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Refuses further throws; producers see `Enqueue::Closed` from now on.
    pub fn close(&mut self) {
        self.rx.close();
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}
