//! RequestCoordinator - actor that owns the backend client
//!
//! Commands are processed strictly one at a time, so the state transitions
//! of overlapping operations are applied in the order the operations were
//! issued. Within one operation the sequence is fixed: outcome first, then
//! the follow-up refresh.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::StudentApi;
use crate::domain::{StudentId, StudentPayload};
use crate::error::ClientError;
use crate::state::{Action, UpsertMode};

use super::config::CoordinatorConfig;
use super::handle::CoordinatorHandle;
use super::messages::{ActionSender, CoordCommand, CoordinatorMetrics, Reply};

/// Serializes list, upsert and delete requests against the backend
pub struct RequestCoordinator {
    api: Arc<dyn StudentApi>,
    actions: ActionSender,
    tx: mpsc::Sender<CoordCommand>,
    rx: mpsc::Receiver<CoordCommand>,
    metrics: CoordinatorMetrics,
}

impl RequestCoordinator {
    /// Create a coordinator emitting state transitions on `actions`
    pub fn new(api: Arc<dyn StudentApi>, actions: ActionSender, config: CoordinatorConfig) -> Self {
        debug!(?config, "RequestCoordinator::new: called");
        let (tx, rx) = mpsc::channel(config.channel_buffer);
        Self {
            api,
            actions,
            tx,
            rx,
            metrics: CoordinatorMetrics::default(),
        }
    }

    /// Create a coordinator and spawn it on the current runtime
    pub fn spawn(api: Arc<dyn StudentApi>, actions: ActionSender) -> CoordinatorHandle {
        let coordinator = Self::new(api, actions, CoordinatorConfig::default());
        let handle = coordinator.handle();
        tokio::spawn(coordinator.run());
        handle
    }

    /// Get a handle for submitting work
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle::new(self.tx.clone())
    }

    /// Run the actor loop until a shutdown command arrives
    pub async fn run(mut self) -> CoordinatorMetrics {
        info!("RequestCoordinator started");

        while let Some(command) = self.rx.recv().await {
            debug!(command = command.name(), "RequestCoordinator::run: received command");
            match command {
                CoordCommand::FetchAll { reply } => {
                    let result = self.fetch_all().await;
                    Self::respond(reply, result);
                }
                CoordCommand::Upsert { mode, payload, reply } => {
                    let result = self.upsert(mode, payload).await;
                    Self::respond(reply, result);
                }
                CoordCommand::Remove { id, reply } => {
                    let result = self.remove(id).await;
                    Self::respond(reply, result);
                }
                CoordCommand::Shutdown => {
                    debug!("RequestCoordinator::run: shutdown requested");
                    break;
                }
            }
        }

        info!(metrics = ?self.metrics, "RequestCoordinator stopped");
        self.metrics
    }

    fn emit(&self, action: Action) {
        debug!(action = action.name(), "RequestCoordinator::emit: called");
        if self.actions.send(action).is_err() {
            debug!("RequestCoordinator::emit: action receiver dropped");
        }
    }

    fn respond(reply: Option<Reply>, result: Result<(), ClientError>) {
        if let Some(reply) = reply
            && reply.send(result).is_err()
        {
            debug!("RequestCoordinator::respond: caller stopped waiting");
        }
    }

    /// Replace the snapshot with the backend's current collection
    async fn fetch_all(&mut self) -> Result<(), ClientError> {
        debug!("RequestCoordinator::fetch_all: called");
        self.metrics.fetches += 1;
        self.emit(Action::FetchStart);

        match self.api.list().await {
            Ok(students) => {
                debug!(count = students.len(), "RequestCoordinator::fetch_all: loaded");
                self.emit(Action::FetchSuccess(students));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch students");
                self.metrics.fetch_failures += 1;
                self.emit(Action::FetchFailure);
                Err(ClientError::FetchFailed(e))
            }
        }
    }

    /// Create or update, then refresh
    ///
    /// A failing refresh does not turn a successful upsert into a failure.
    async fn upsert(&mut self, mode: UpsertMode, payload: StudentPayload) -> Result<(), ClientError> {
        debug!(%mode, ?payload, "RequestCoordinator::upsert: called");
        self.metrics.upserts += 1;

        let result = match mode {
            UpsertMode::Create => self.api.create(&payload).await,
            UpsertMode::Update(id) => self.api.update(id, &payload).await,
        };

        match result {
            Ok(()) => {
                info!(%mode, "Student upsert succeeded");
                self.emit(Action::SubmitSuccess { mode });
                if let Err(e) = self.fetch_all().await {
                    debug!(error = %e, "RequestCoordinator::upsert: refresh after upsert failed");
                }
                Ok(())
            }
            Err(e) => {
                warn!(%mode, error = %e, "Student upsert failed");
                self.metrics.upsert_failures += 1;
                self.emit(Action::SubmitFailure { mode });
                Err(ClientError::UpsertFailed { mode, source: e })
            }
        }
    }

    /// Delete, then refresh; the snapshot is left alone on failure
    async fn remove(&mut self, id: StudentId) -> Result<(), ClientError> {
        debug!(%id, "RequestCoordinator::remove: called");
        self.metrics.removes += 1;

        match self.api.delete(id).await {
            Ok(()) => {
                info!(%id, "Student deleted");
                self.emit(Action::DeleteSuccess { id });
                if let Err(e) = self.fetch_all().await {
                    debug!(error = %e, "RequestCoordinator::remove: refresh after delete failed");
                }
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "Student delete failed");
                self.metrics.remove_failures += 1;
                self.emit(Action::DeleteFailure { id });
                Err(ClientError::DeleteFailed { id, source: e })
            }
        }
    }
}
