//! Request coordinator messages
//!
//! Commands for the actor pattern and the replies they resolve.

use tokio::sync::{mpsc, oneshot};

use crate::domain::{StudentId, StudentPayload};
use crate::error::ClientError;
use crate::state::{Action, UpsertMode};

/// Result of a whole coordinator operation, follow-up refresh included
pub type Completion = oneshot::Receiver<Result<(), ClientError>>;

/// Reply channel carried by a command
pub type Reply = oneshot::Sender<Result<(), ClientError>>;

/// Outbound channel of state transitions
pub type ActionSender = mpsc::UnboundedSender<Action>;

/// Commands sent to the coordinator actor
#[derive(Debug)]
pub enum CoordCommand {
    /// Re-fetch the whole collection
    FetchAll { reply: Option<Reply> },

    /// Create or update, then refresh on success
    Upsert {
        mode: UpsertMode,
        payload: StudentPayload,
        reply: Option<Reply>,
    },

    /// Delete, then refresh on success
    Remove { id: StudentId, reply: Option<Reply> },

    /// Stop processing commands
    Shutdown,
}

impl CoordCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchAll { .. } => "fetch_all",
            Self::Upsert { .. } => "upsert",
            Self::Remove { .. } => "remove",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Counters reported when the coordinator stops
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoordinatorMetrics {
    pub fetches: u64,
    pub fetch_failures: u64,
    pub upserts: u64,
    pub upsert_failures: u64,
    pub removes: u64,
    pub remove_failures: u64,
}
