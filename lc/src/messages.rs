//! Message types for the coordination task

use std::fmt;

use tokio::sync::oneshot;

/// A new value for the cell
///
/// The task fires `ack` once the value has replaced the current one, which
/// is what lets `put` return only after the handoff has happened.
#[derive(Debug)]
pub struct PutRequest<T> {
    pub value: T,
    pub ack: oneshot::Sender<()>,
}

/// A read of the current value
///
/// Dropping `reply` without sending tells the reader the cell is stopped.
#[derive(Debug)]
pub struct GetRequest<T> {
    pub reply: oneshot::Sender<T>,
}

/// Where the coordination task is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellPhase {
    /// No operation has been called yet
    NotStarted,
    /// Task is running but no value has been put
    WaitingForFirstValue,
    /// Task holds a value and answers reads
    Serving,
    /// Task has exited
    Stopped,
}

impl CellPhase {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            CellPhase::NotStarted => 0,
            CellPhase::WaitingForFirstValue => 1,
            CellPhase::Serving => 2,
            CellPhase::Stopped => 3,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => CellPhase::NotStarted,
            1 => CellPhase::WaitingForFirstValue,
            2 => CellPhase::Serving,
            _ => CellPhase::Stopped,
        }
    }
}

impl fmt::Display for CellPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellPhase::NotStarted => "not-started",
            CellPhase::WaitingForFirstValue => "waiting-for-first-value",
            CellPhase::Serving => "serving",
            CellPhase::Stopped => "stopped",
        };
        write!(f, "{}", name)
    }
}
