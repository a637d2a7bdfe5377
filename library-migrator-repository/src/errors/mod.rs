//! Error types for the library migrator repository.
//! Consolidates and re-exports error types related to source and target
//! store operations.
mod source;
mod target;

pub use source::SourceRepositoryError;
pub use target::TargetRepositoryError;
