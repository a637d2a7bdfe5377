//! Trait interfaces for the two store boundaries of the migration.
mod source;
mod target;

pub use source::{SourceRecordStream, SourceRepository};
pub use target::TargetRepository;
