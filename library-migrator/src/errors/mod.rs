//! Error types for the library migrator application.
use thiserror::Error;

/// Represents errors that can occur while wiring up or running the
/// migration.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Document store error: {0}")]
    DocumentStore(#[from] mongodb::error::Error),
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Migration job failed (run {run_id})")]
    JobFailed { run_id: u64 },
}
