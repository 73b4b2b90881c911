//! StudentApi trait definition

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Student, StudentId, StudentPayload};

/// Backend contract for the student collection
///
/// Every call is independent; the client keeps no session with the backend.
/// Any non-2xx answer or transport failure is an error, and success bodies of
/// the mutating calls are ignored.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Fetch the whole collection (`GET /student/getAll`)
    async fn list(&self) -> Result<Vec<Student>, ApiError>;

    /// Create a student (`POST /student/add`)
    async fn create(&self, payload: &StudentPayload) -> Result<(), ApiError>;

    /// Update an existing student (`PUT /student/update/{id}`)
    async fn update(&self, id: StudentId, payload: &StudentPayload) -> Result<(), ApiError>;

    /// Delete a student (`DELETE /student/delete/{id}`)
    async fn delete(&self, id: StudentId) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tracing::debug;

    /// In-memory backend for unit tests
    ///
    /// Behaves like the reference backend: ids are assigned on create, update
    /// and delete of a missing id fail with 500. Each endpoint can be made to
    /// fail outright through the `fail_*` switches.
    #[derive(Default)]
    pub struct MockStudentApi {
        students: Mutex<Vec<Student>>,
        next_id: AtomicUsize,
        pub fail_list: AtomicBool,
        pub fail_create: AtomicBool,
        pub fail_update: AtomicBool,
        pub fail_delete: AtomicBool,
        list_calls: AtomicUsize,
        create_calls: AtomicUsize,
        update_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        last_update: Mutex<Option<(StudentId, StudentPayload)>>,
    }

    impl MockStudentApi {
        pub fn new() -> Self {
            debug!("MockStudentApi::new: called");
            Self {
                next_id: AtomicUsize::new(1),
                ..Default::default()
            }
        }

        pub fn with_students(students: Vec<Student>) -> Self {
            debug!(count = students.len(), "MockStudentApi::with_students: called");
            let next = students.iter().map(|s| s.id.value()).max().unwrap_or(0) + 1;
            Self {
                students: Mutex::new(students),
                next_id: AtomicUsize::new(next as usize),
                ..Default::default()
            }
        }

        pub fn students(&self) -> Vec<Student> {
            self.students.lock().unwrap().clone()
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        pub fn update_calls(&self) -> usize {
            self.update_calls.load(Ordering::SeqCst)
        }

        pub fn delete_calls(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }

        pub fn last_update(&self) -> Option<(StudentId, StudentPayload)> {
            self.last_update.lock().unwrap().clone()
        }

        pub fn set_fail(switch: &AtomicBool, fail: bool) {
            switch.store(fail, Ordering::SeqCst);
        }

        fn failing(switch: &AtomicBool) -> bool {
            switch.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StudentApi for MockStudentApi {
        async fn list(&self) -> Result<Vec<Student>, ApiError> {
            debug!("MockStudentApi::list: called");
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if Self::failing(&self.fail_list) {
                return Err(ApiError::Status { status: 503 });
            }
            Ok(self.students())
        }

        async fn create(&self, payload: &StudentPayload) -> Result<(), ApiError> {
            debug!(?payload, "MockStudentApi::create: called");
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if Self::failing(&self.fail_create) {
                return Err(ApiError::Status { status: 503 });
            }
            let id = StudentId::new(self.next_id.fetch_add(1, Ordering::SeqCst) as i64);
            self.students
                .lock()
                .unwrap()
                .push(Student::new(id, payload.name.clone(), payload.address.clone()));
            Ok(())
        }

        async fn update(&self, id: StudentId, payload: &StudentPayload) -> Result<(), ApiError> {
            debug!(%id, ?payload, "MockStudentApi::update: called");
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_update.lock().unwrap() = Some((id, payload.clone()));
            if Self::failing(&self.fail_update) {
                return Err(ApiError::Status { status: 503 });
            }
            let mut students = self.students.lock().unwrap();
            match students.iter_mut().find(|s| s.id == id) {
                Some(student) => {
                    student.name = payload.name.clone();
                    student.address = payload.address.clone();
                    Ok(())
                }
                None => Err(ApiError::Status { status: 500 }),
            }
        }

        async fn delete(&self, id: StudentId) -> Result<(), ApiError> {
            debug!(%id, "MockStudentApi::delete: called");
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if Self::failing(&self.fail_delete) {
                return Err(ApiError::Status { status: 503 });
            }
            let mut students = self.students.lock().unwrap();
            let before = students.len();
            students.retain(|s| s.id != id);
            if students.len() == before {
                return Err(ApiError::Status { status: 500 });
            }
            Ok(())
        }
    }
}
