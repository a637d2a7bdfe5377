//! Error types for the relational source store.
//! Defines specific errors that can occur while streaming rows out of the
//! source database.
use thiserror::Error;

/// Represents errors that can occur within the source repository.
///
/// This enum consolidates error conditions raised while executing the source
/// queries or mapping their rows, such as SQLx errors during streaming.
#[derive(Debug, Error)]
pub enum SourceRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
