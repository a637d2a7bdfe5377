//! This module defines the `TargetRepository` trait, which provides an
//! interface for persisting migrated documents to the target document store.
use library_migrator_shared::types::{AuthorDocument, BookDocument, GenreDocument};

use crate::errors::TargetRepositoryError;

/// A trait that defines the interface for saving documents to the target
/// document store.
///
/// Each save is an idempotent-by-id upsert of a single document into the
/// collection for its entity type. Saves are independent of each other:
/// there is no batching and no transaction at this boundary.
#[async_trait::async_trait]
pub trait TargetRepository: Send + Sync {
    /// Saves one genre document into the genres collection.
    async fn save_genre(&self, document: &GenreDocument) -> Result<(), TargetRepositoryError>;

    /// Saves one author document into the authors collection.
    async fn save_author(&self, document: &AuthorDocument) -> Result<(), TargetRepositoryError>;

    /// Saves one book document into the books collection.
    async fn save_book(&self, document: &BookDocument) -> Result<(), TargetRepositoryError>;
}
