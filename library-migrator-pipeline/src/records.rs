//! Identity views over the shared types, used by the chunk orchestrator to
//! tag lifecycle events with record identifiers.
use library_migrator_shared::types::{
    AuthorDocument, BookDocument, GenreDocument, SourceAuthor, SourceBook, SourceGenre, SourceId,
};

/// Exposes the source-store identifier of a record read by the pipeline.
pub trait SourceRecord {
    fn record_id(&self) -> SourceId;
}

/// Exposes the target-store identifier of a document produced by the
/// pipeline.
pub trait TargetRecord {
    fn document_id(&self) -> &str;
}

impl SourceRecord for SourceGenre {
    fn record_id(&self) -> SourceId {
        self.id
    }
}

impl SourceRecord for SourceAuthor {
    fn record_id(&self) -> SourceId {
        self.id
    }
}

impl SourceRecord for SourceBook {
    fn record_id(&self) -> SourceId {
        self.id
    }
}

impl TargetRecord for GenreDocument {
    fn document_id(&self) -> &str {
        &self.id
    }
}

impl TargetRecord for AuthorDocument {
    fn document_id(&self) -> &str {
        &self.id
    }
}

impl TargetRecord for BookDocument {
    fn document_id(&self) -> &str {
        &self.id
    }
}
