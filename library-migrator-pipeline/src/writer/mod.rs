//! Writer module for the migration pipeline.
//!
//! Provides the `ItemWriter` batch contract and one writer per target
//! collection. A writer persists its batch one store call per document, in
//! batch order, logging each record as it goes. Batches are not
//! transactional: the first failing document aborts the batch, is not
//! retried, and leaves the documents before it persisted.
use std::sync::Arc;

use async_trait::async_trait;
use library_migrator_repository::TargetRepository;
use library_migrator_shared::types::{AuthorDocument, BookDocument, GenreDocument};
use tracing::info;

use crate::errors::WriteError;

/// Persists a bounded, ordered batch of target documents.
#[async_trait]
pub trait ItemWriter<T>: Send + Sync {
    async fn write(&self, items: &[T]) -> Result<(), WriteError>;
}

/// Writes genre documents into the genres collection.
pub struct GenreWriter {
    target: Arc<dyn TargetRepository>,
}

impl GenreWriter {
    pub fn new(target: Arc<dyn TargetRepository>) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ItemWriter<GenreDocument> for GenreWriter {
    async fn write(&self, documents: &[GenreDocument]) -> Result<(), WriteError> {
        for document in documents {
            info!(id = %document.id, "writing genre document");
            self.target.save_genre(document).await?;
        }
        Ok(())
    }
}

/// Writes author documents into the authors collection.
pub struct AuthorWriter {
    target: Arc<dyn TargetRepository>,
}

impl AuthorWriter {
    pub fn new(target: Arc<dyn TargetRepository>) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ItemWriter<AuthorDocument> for AuthorWriter {
    async fn write(&self, documents: &[AuthorDocument]) -> Result<(), WriteError> {
        for document in documents {
            info!(id = %document.id, "writing author document");
            self.target.save_author(document).await?;
        }
        Ok(())
    }
}

/// Writes book documents into the books collection.
pub struct BookWriter {
    target: Arc<dyn TargetRepository>,
}

impl BookWriter {
    pub fn new(target: Arc<dyn TargetRepository>) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ItemWriter<BookDocument> for BookWriter {
    async fn write(&self, documents: &[BookDocument]) -> Result<(), WriteError> {
        for document in documents {
            info!(id = %document.id, "writing book document");
            self.target.save_book(document).await?;
        }
        Ok(())
    }
}
