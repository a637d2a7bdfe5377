//! Reader module for the migration pipeline.
//!
//! Provides the `ItemReader` cursor contract and one reader per entity
//! type, each a thin forward-only cursor over the source repository's row
//! stream. Acts as the entry point of a step, feeding records to the
//! processing and writing components.
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use library_migrator_repository::{SourceRecordStream, SourceRepository};
use library_migrator_shared::types::{SourceAuthor, SourceBook, SourceGenre};

use crate::errors::ReadError;

/// A forward-only cursor over one entity type's source records.
///
/// `open` acquires the cursor, `next` advances it one record at a time
/// (`Ok(None)` is end-of-stream) and `close` releases the underlying
/// connection resource. A step must close its reader on every exit path.
#[async_trait]
pub trait ItemReader<T>: Send {
    /// Acquires the cursor. Opening an already-open reader is an error.
    async fn open(&mut self) -> Result<(), ReadError>;

    /// Returns the next record, or `Ok(None)` once the stream is exhausted.
    ///
    /// A row that cannot be read or mapped surfaces as a `ReadError`, never
    /// as a silently skipped record.
    async fn next(&mut self) -> Result<Option<T>, ReadError>;

    /// Releases the cursor and its connection resource.
    async fn close(&mut self) -> Result<(), ReadError>;
}

/// Streams genre rows from the source store.
pub struct GenreReader {
    source: Arc<dyn SourceRepository>,
    cursor: Option<SourceRecordStream<SourceGenre>>,
}

impl GenreReader {
    pub fn new(source: Arc<dyn SourceRepository>) -> Self {
        Self {
            source,
            cursor: None,
        }
    }
}

#[async_trait]
impl ItemReader<SourceGenre> for GenreReader {
    async fn open(&mut self) -> Result<(), ReadError> {
        if self.cursor.is_some() {
            return Err(ReadError::CursorAlreadyOpen);
        }
        self.cursor = Some(self.source.stream_genres());
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<SourceGenre>, ReadError> {
        let cursor = self.cursor.as_mut().ok_or(ReadError::CursorClosed)?;
        Ok(cursor.try_next().await?)
    }

    async fn close(&mut self) -> Result<(), ReadError> {
        self.cursor = None;
        Ok(())
    }
}

/// Streams author rows from the source store.
pub struct AuthorReader {
    source: Arc<dyn SourceRepository>,
    cursor: Option<SourceRecordStream<SourceAuthor>>,
}

impl AuthorReader {
    pub fn new(source: Arc<dyn SourceRepository>) -> Self {
        Self {
            source,
            cursor: None,
        }
    }
}

#[async_trait]
impl ItemReader<SourceAuthor> for AuthorReader {
    async fn open(&mut self) -> Result<(), ReadError> {
        if self.cursor.is_some() {
            return Err(ReadError::CursorAlreadyOpen);
        }
        self.cursor = Some(self.source.stream_authors());
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<SourceAuthor>, ReadError> {
        let cursor = self.cursor.as_mut().ok_or(ReadError::CursorClosed)?;
        Ok(cursor.try_next().await?)
    }

    async fn close(&mut self) -> Result<(), ReadError> {
        self.cursor = None;
        Ok(())
    }
}

/// Streams book rows from the source store, each hydrated with its
/// comments by the repository before it is returned.
pub struct BookReader {
    source: Arc<dyn SourceRepository>,
    cursor: Option<SourceRecordStream<SourceBook>>,
}

impl BookReader {
    pub fn new(source: Arc<dyn SourceRepository>) -> Self {
        Self {
            source,
            cursor: None,
        }
    }
}

#[async_trait]
impl ItemReader<SourceBook> for BookReader {
    async fn open(&mut self) -> Result<(), ReadError> {
        if self.cursor.is_some() {
            return Err(ReadError::CursorAlreadyOpen);
        }
        self.cursor = Some(self.source.stream_books());
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<SourceBook>, ReadError> {
        let cursor = self.cursor.as_mut().ok_or(ReadError::CursorClosed)?;
        Ok(cursor.try_next().await?)
    }

    async fn close(&mut self) -> Result<(), ReadError> {
        self.cursor = None;
        Ok(())
    }
}
