//! Error types for the processor stage of the migration pipeline.
//! Defines specific errors that can occur while transforming a source
//! record into a target document.
use library_migrator_shared::types::{EntityKind, SourceId};
use thiserror::Error;

/// Represents errors that can occur while transforming a record.
///
/// The transforms are total for well-formed input, so this error is not
/// expected during normal operation; it exists so a transform failure is
/// still a distinguishable, propagatable condition.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Cannot transform {entity} record {id}: {reason}")]
    Unprocessable {
        entity: EntityKind,
        id: SourceId,
        reason: String,
    },
}
