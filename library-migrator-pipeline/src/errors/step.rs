//! Error types for the chunk-oriented step of the migration pipeline.
//! Consolidates the stage errors a step can fail with.
use thiserror::Error;

use crate::errors::{ProcessError, ReadError, WriteError};

/// Represents the unrecovered error that terminated a step.
///
/// None of the stage errors are retried or skipped: the first one aborts
/// the step and, through it, the enclosing job.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Read error: {0}")]
    Read(#[from] ReadError),
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}
