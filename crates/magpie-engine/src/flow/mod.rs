pub mod employee;

pub use employee::{CleanupError, CreationOutcome, DuplicateClassifier};
