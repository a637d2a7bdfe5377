//! Error types for the reader stage of the migration pipeline.
//! Defines specific errors that can occur while reading records from the
//! source cursor.
use library_migrator_repository::SourceRepositoryError;
use thiserror::Error;

/// Represents errors that can occur while reading from a source cursor.
///
/// This enum consolidates error conditions raised by the source repository
/// while streaming rows, plus misuse of the cursor lifecycle itself.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Source repository error: {0}")]
    Repository(#[from] SourceRepositoryError),
    #[error("Cursor is not open")]
    CursorClosed,
    #[error("Cursor is already open")]
    CursorAlreadyOpen,
}
