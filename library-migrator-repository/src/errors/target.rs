//! Error types for the target document store.
//! Defines specific errors that can occur while persisting documents.
use thiserror::Error;

/// Represents errors that can occur within the target repository.
///
/// This enum consolidates error conditions raised while saving documents to
/// the document store.
#[derive(Debug, Error)]
pub enum TargetRepositoryError {
    #[error("Document store error: {0}")]
    Database(#[from] mongodb::error::Error),
}
