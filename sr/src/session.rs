//! Batch session - drive the state machine one operation at a time
//!
//! Used by the `sr` subcommands: every call waits for the coordinator to
//! finish the whole operation (refresh included) and applies the resulting
//! transitions before returning.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::StudentApi;
use crate::coordinator::{Completion, CoordinatorHandle, RequestCoordinator};
use crate::domain::{Student, StudentId};
use crate::error::ClientError;
use crate::state::{Action, Field, Store, UiState};

/// Store, coordinator and action channel bundled for sequential use
pub struct Session {
    store: Store,
    handle: CoordinatorHandle,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Session {
    /// Spawn a coordinator for `api` on the current runtime
    pub fn new(api: Arc<dyn StudentApi>) -> Self {
        debug!("Session::new: called");
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = RequestCoordinator::spawn(api, tx);
        Self {
            store: Store::new(),
            handle,
            rx,
        }
    }

    pub fn state(&self) -> &UiState {
        self.store.state()
    }

    pub fn students(&self) -> &[Student] {
        self.store.state().list.visible()
    }

    /// Fetch the list snapshot
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        debug!("Session::refresh: called");
        let completion = self.handle.fetch_all().await?;
        self.settle(completion).await
    }

    /// Fill the form for a new student and submit it
    pub async fn add(&mut self, name: &str, address: &str) -> Result<(), ClientError> {
        debug!(%name, %address, "Session::add: called");
        self.store.clear();
        self.store.set_field(Field::Name, name);
        self.store.set_field(Field::Address, address);
        self.submit().await
    }

    /// Edit a listed student, overwriting only the given fields
    ///
    /// The student must be present in the current snapshot, as when editing
    /// from a list row.
    pub async fn update(
        &mut self,
        id: StudentId,
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<(), ClientError> {
        debug!(%id, ?name, ?address, "Session::update: called");
        let student = self
            .store
            .state()
            .list
            .get(id)
            .cloned()
            .ok_or(ClientError::NotFound(id))?;

        self.store.begin_edit(&student);
        if let Some(name) = name {
            self.store.set_field(Field::Name, name);
        }
        if let Some(address) = address {
            self.store.set_field(Field::Address, address);
        }
        self.submit().await
    }

    /// Submit the current draft
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        debug!("Session::submit: called");
        let completion = self.handle.upsert(&mut self.store).await?;
        self.settle(completion).await
    }

    /// Delete a student
    pub async fn remove(&mut self, id: StudentId) -> Result<(), ClientError> {
        debug!(%id, "Session::remove: called");
        let completion = self.handle.remove(&mut self.store, id).await?;
        self.settle(completion).await
    }

    /// Stop the coordinator
    pub async fn close(self) {
        debug!("Session::close: called");
        self.handle.shutdown().await;
    }

    async fn settle(&mut self, completion: Completion) -> Result<(), ClientError> {
        // Replies are sent after the operation's last action
        let result = completion.await.map_err(|_| ClientError::ChannelClosed)?;
        self.store.drain(&mut self.rx);
        result
    }
}
