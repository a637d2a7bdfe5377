//! Error types for the writer stage of the migration pipeline.
//! Defines specific errors that can occur while persisting a batch of
//! documents to the target store.
use library_migrator_repository::TargetRepositoryError;
use thiserror::Error;

/// Represents errors that can occur while writing documents.
///
/// A write error refers to the single document whose save failed; earlier
/// documents of the same batch stay persisted.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Target repository error: {0}")]
    Repository(#[from] TargetRepositoryError),
}
