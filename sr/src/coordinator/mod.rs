//! Request coordinator
//!
//! Sequences the three network operations against the backend:
//! - **fetch_all:** replace the list snapshot
//! - **upsert:** create or update from the form draft, then refresh
//! - **remove:** delete a listed student, then refresh
//!
//! Completions are reported as `Action`s on an unbounded channel that the
//! owner of the `Store` drains.

mod config;
mod core;
mod handle;
mod messages;

pub use config::CoordinatorConfig;
pub use core::RequestCoordinator;
pub use handle::CoordinatorHandle;
pub use messages::{ActionSender, Completion, CoordCommand, CoordinatorMetrics};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;
    use crate::api::client::mock::MockStudentApi;
    use crate::domain::{Student, StudentId};
    use crate::error::ClientError;
    use crate::state::model::{ADD_FAILED, ADDED, DELETE_FAILED, DELETED, LOAD_FAILED, UPDATED};
    use crate::state::{Action, Field, ListStatus, Store, SubmissionState};

    struct Harness {
        api: Arc<MockStudentApi>,
        handle: CoordinatorHandle,
        store: Store,
        rx: mpsc::UnboundedReceiver<Action>,
    }

    impl Harness {
        fn new(api: MockStudentApi) -> Self {
            let api = Arc::new(api);
            let (tx, rx) = mpsc::unbounded_channel();
            let handle = RequestCoordinator::spawn(api.clone(), tx);
            Self {
                api,
                handle,
                store: Store::new(),
                rx,
            }
        }

        async fn settle(&mut self, completion: Completion) -> Result<(), ClientError> {
            let result = completion.await.expect("coordinator dropped the reply");
            self.store.drain(&mut self.rx);
            result
        }

        async fn load(&mut self) {
            let completion = self.handle.fetch_all().await.unwrap();
            self.settle(completion).await.unwrap();
        }

        fn fill(&mut self, name: &str, address: &str) {
            self.store.set_field(Field::Name, name);
            self.store.set_field(Field::Address, address);
        }
    }

    fn bob() -> Student {
        Student::new(StudentId::new(7), "Bob", "X")
    }

    #[tokio::test]
    async fn test_fresh_load_empty_list() {
        let mut h = Harness::new(MockStudentApi::new());
        h.load().await;

        let state = h.store.state();
        assert_eq!(state.list.status, ListStatus::Loaded);
        assert!(state.list.students.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_create_adds_record_and_clears_form() {
        let mut h = Harness::new(MockStudentApi::new());
        h.load().await;
        h.fill("Alice", "1 Main St");

        let completion = h.handle.upsert(&mut h.store).await.unwrap();
        assert_eq!(h.store.state().submission, SubmissionState::Submitting);
        h.settle(completion).await.unwrap();

        let state = h.store.state();
        assert_eq!(state.success_message.as_deref(), Some(ADDED));
        assert!(state.draft.is_empty());
        assert!(state.draft.editing_id.is_none());
        assert_eq!(state.submission, SubmissionState::Idle);
        assert_eq!(state.list.students.len(), 1);
        assert_eq!(state.list.students[0].name, "Alice");
        assert_eq!(state.list.students[0].address, "1 Main St");
        assert_eq!(h.api.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_sends_put_for_editing_id() {
        let mut h = Harness::new(MockStudentApi::with_students(vec![bob()]));
        h.load().await;
        h.store.begin_edit(&bob());
        h.store.set_field(Field::Address, "Y");

        let completion = h.handle.upsert(&mut h.store).await.unwrap();
        h.settle(completion).await.unwrap();

        let (id, payload) = h.api.last_update().expect("update was sent");
        assert_eq!(id, StudentId::new(7));
        assert_eq!(payload.name, "Bob");
        assert_eq!(payload.address, "Y");

        let state = h.store.state();
        assert_eq!(state.success_message.as_deref(), Some(UPDATED));
        assert_eq!(state.list.get(StudentId::new(7)).unwrap().address, "Y");
        assert!(state.draft.is_empty());
        assert_eq!(h.api.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_backend() {
        let mut h = Harness::new(MockStudentApi::new());
        h.fill("Alice", "   ");

        let result = h.handle.upsert(&mut h.store).await;
        assert!(matches!(result, Err(ClientError::ValidationFailed)));
        assert!(h.store.state().form_error.is_some());
        assert_eq!(h.store.state().submission, SubmissionState::Idle);

        h.load().await;
        assert_eq!(h.api.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_upsert_while_submitting_is_noop() {
        let mut h = Harness::new(MockStudentApi::new());
        h.fill("Alice", "1 Main St");

        let first = h.handle.upsert(&mut h.store).await.unwrap();
        let second = h.handle.upsert(&mut h.store).await;
        assert!(matches!(second, Err(ClientError::AlreadySubmitting)));

        h.settle(first).await.unwrap();
        assert_eq!(h.api.create_calls(), 1);
        assert_eq!(h.store.state().list.students.len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_draft() {
        let api = MockStudentApi::new();
        MockStudentApi::set_fail(&api.fail_create, true);
        let mut h = Harness::new(api);
        h.load().await;
        h.fill("Alice", "1 Main St");

        let completion = h.handle.upsert(&mut h.store).await.unwrap();
        let result = h.settle(completion).await;
        assert!(matches!(result, Err(ClientError::UpsertFailed { .. })));

        let state = h.store.state();
        assert_eq!(state.draft.name, "Alice");
        assert_eq!(state.draft.address, "1 Main St");
        assert_eq!(state.form_level_error(), Some(ADD_FAILED));
        assert_eq!(state.submission, SubmissionState::Idle);
        // No refresh after a failed upsert
        assert_eq!(h.api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_after_create_still_reports_success() {
        let mut h = Harness::new(MockStudentApi::new());
        h.load().await;
        MockStudentApi::set_fail(&h.api.fail_list, true);
        h.fill("Alice", "1 Main St");

        let completion = h.handle.upsert(&mut h.store).await.unwrap();
        h.settle(completion).await.unwrap();

        let state = h.store.state();
        assert_eq!(state.success_message.as_deref(), Some(ADDED));
        assert_eq!(state.list.status, ListStatus::Failed(LOAD_FAILED.to_string()));
        assert_eq!(state.submission, SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_remove_success_refreshes() {
        let mut h = Harness::new(MockStudentApi::with_students(vec![bob()]));
        h.load().await;

        let completion = h.handle.remove(&mut h.store, StudentId::new(7)).await.unwrap();
        h.settle(completion).await.unwrap();

        let state = h.store.state();
        assert!(!state.list.contains(StudentId::new(7)));
        assert_eq!(state.success_message.as_deref(), Some(DELETED));
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_snapshot() {
        let mut h = Harness::new(MockStudentApi::with_students(vec![bob()]));
        h.load().await;
        MockStudentApi::set_fail(&h.api.fail_delete, true);

        let completion = h.handle.remove(&mut h.store, StudentId::new(7)).await.unwrap();
        let result = h.settle(completion).await;
        assert!(matches!(result, Err(ClientError::DeleteFailed { .. })));

        let state = h.store.state();
        assert_eq!(state.list_level_error(), Some(DELETE_FAILED));
        assert!(state.list.contains(StudentId::new(7)));
        assert!(state.list.is_loaded());
    }

    #[tokio::test]
    async fn test_double_remove_applies_in_issue_order() {
        let mut h = Harness::new(MockStudentApi::with_students(vec![bob()]));
        h.load().await;

        let first = h.handle.remove(&mut h.store, StudentId::new(7)).await.unwrap();
        let second = h.handle.remove(&mut h.store, StudentId::new(7)).await.unwrap();

        assert!(first.await.unwrap().is_ok());
        assert!(second.await.unwrap().is_err());
        h.store.drain(&mut h.rx);

        // The second delete resolves last, so its failure wins
        let state = h.store.state();
        assert_eq!(h.api.delete_calls(), 2);
        assert_eq!(state.list_level_error(), Some(DELETE_FAILED));
        assert!(state.success_message.is_none());
        assert!(!state.list.contains(StudentId::new(7)));
    }

    #[tokio::test]
    async fn test_remove_of_record_being_edited_keeps_draft() {
        let mut h = Harness::new(MockStudentApi::with_students(vec![bob()]));
        h.load().await;
        h.store.begin_edit(&bob());

        let completion = h.handle.remove(&mut h.store, StudentId::new(7)).await.unwrap();
        h.settle(completion).await.unwrap();
        assert_eq!(h.store.state().draft.editing_id, Some(StudentId::new(7)));

        // The stale update is still sent and its failure reported
        let completion = h.handle.upsert(&mut h.store).await.unwrap();
        let result = h.settle(completion).await;
        assert!(result.is_err());
        assert_eq!(h.api.update_calls(), 1);
        assert_eq!(h.store.state().draft.editing_id, Some(StudentId::new(7)));
    }

    #[tokio::test]
    async fn test_shutdown_closes_channel() {
        let mut h = Harness::new(MockStudentApi::new());
        h.handle.shutdown().await;

        // Wait for the actor to drop its receiver
        for _ in 0..100 {
            if h.handle.fetch_all().await.is_err() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        h.fill("Alice", "1 Main St");
        let result = h.handle.upsert(&mut h.store).await;
        assert!(matches!(result, Err(ClientError::ChannelClosed)));
        // The submission lock is released when nothing can complete it
        assert_eq!(h.store.state().submission, SubmissionState::Idle);
        assert_eq!(h.store.state().draft.name, "Alice");
    }
}
