//! Domain types shared by the client layers

mod student;

pub use student::{Student, StudentId, StudentPayload};
