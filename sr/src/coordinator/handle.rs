//! CoordinatorHandle - front door of the request coordinator
//!
//! The handle performs the synchronous part of every operation against the
//! caller's `Store` (guards, validation, start transitions) before queueing
//! the network part on the actor. Because the start transition is applied
//! before the method returns, a second submit issued right after the first
//! already sees `Submitting`.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::StudentId;
use crate::error::ClientError;
use crate::state::{Action, Store};

use super::messages::{CoordCommand, Completion};

/// Cloneable handle used by the UI and the batch session
#[derive(Clone, Debug)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<CoordCommand>,
}

impl CoordinatorHandle {
    pub(crate) fn new(tx: mpsc::Sender<CoordCommand>) -> Self {
        debug!("CoordinatorHandle::new: called");
        Self { tx }
    }

    /// Queue a refresh of the list snapshot
    pub async fn fetch_all(&self) -> Result<Completion, ClientError> {
        debug!("CoordinatorHandle::fetch_all: called");
        let (reply, completion) = oneshot::channel();
        self.send(CoordCommand::FetchAll { reply: Some(reply) }).await?;
        Ok(completion)
    }

    /// Submit the current draft as a create or an update
    ///
    /// Rejected with `AlreadySubmitting` while a submission is in flight and
    /// with `ValidationFailed` when a field is blank; neither sends a request.
    pub async fn upsert(&self, store: &mut Store) -> Result<Completion, ClientError> {
        debug!("CoordinatorHandle::upsert: called");
        if store.state().submission.is_submitting() {
            debug!("CoordinatorHandle::upsert: submission in flight, ignoring");
            return Err(ClientError::AlreadySubmitting);
        }
        store.validate()?;

        let draft = &store.state().draft;
        let mode = draft.mode();
        let payload = draft.payload();

        // Not corrected: the backend decides what an update of a vanished id means
        if let Some(id) = draft.editing_id
            && !store.state().list.contains(id)
        {
            warn!(%id, "Updating a student that is not in the current list");
        }

        store.dispatch(Action::SubmitStart);

        let (reply, completion) = oneshot::channel();
        let command = CoordCommand::Upsert {
            mode,
            payload,
            reply: Some(reply),
        };
        if let Err(e) = self.send(command).await {
            // Nothing will ever complete this submission; release the lock
            store.dispatch(Action::SubmitFailure { mode });
            return Err(e);
        }
        Ok(completion)
    }

    /// Delete a listed student
    ///
    /// Not guarded: repeated calls for the same id each send a request.
    pub async fn remove(&self, store: &mut Store, id: StudentId) -> Result<Completion, ClientError> {
        debug!(%id, "CoordinatorHandle::remove: called");
        store.dispatch(Action::DeleteStart { id });

        let (reply, completion) = oneshot::channel();
        if let Err(e) = self.send(CoordCommand::Remove { id, reply: Some(reply) }).await {
            store.dispatch(Action::DeleteFailure { id });
            return Err(e);
        }
        Ok(completion)
    }

    /// Stop the coordinator after the commands already queued
    pub async fn shutdown(&self) {
        debug!("CoordinatorHandle::shutdown: called");
        if self.send(CoordCommand::Shutdown).await.is_err() {
            debug!("CoordinatorHandle::shutdown: coordinator already stopped");
        }
    }

    async fn send(&self, command: CoordCommand) -> Result<(), ClientError> {
        self.tx.send(command).await.map_err(|_| {
            warn!("Request coordinator channel closed");
            ClientError::ChannelClosed
        })
    }
}
