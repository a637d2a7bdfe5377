//! This module defines the `SourceRepository` trait, which provides an
//! interface for streaming entity rows out of the relational source store.
use futures::stream::BoxStream;
use library_migrator_shared::types::{SourceAuthor, SourceBook, SourceGenre};

use crate::errors::SourceRepositoryError;

/// A forward-only, one-pass stream over the rows of a single source query.
///
/// The stream owns its connection resources: dropping it releases the
/// underlying cursor.
pub type SourceRecordStream<T> = BoxStream<'static, Result<T, SourceRepositoryError>>;

/// A trait that defines the interface for reading entities from the
/// relational source store.
///
/// Each method issues exactly one forward-only query and streams its rows
/// lazily; nothing is materialized up front. The streams are independent of
/// each other and of the repository value they were created from.
pub trait SourceRepository: Send + Sync {
    /// Streams all genre rows in the order returned by the source query.
    fn stream_genres(&self) -> SourceRecordStream<SourceGenre>;

    /// Streams all author rows in the order returned by the source query.
    fn stream_authors(&self) -> SourceRecordStream<SourceAuthor>;

    /// Streams all book rows in the order returned by the source query.
    ///
    /// Each yielded book is hydrated with its comments through one
    /// subordinate query per row, issued before the row is yielded. No
    /// ordering guarantee is made on the subordinate query beyond "all
    /// comments for that book".
    fn stream_books(&self) -> SourceRecordStream<SourceBook>;
}
