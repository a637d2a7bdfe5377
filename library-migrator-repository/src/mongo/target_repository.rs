//! MongoDB implementation of the target repository.
//!
//! Persists migrated documents with one upsert per document, keyed on the
//! `_id` derived from the source row id, so re-running a migration replaces
//! documents instead of duplicating them.
use async_trait::async_trait;
use library_migrator_shared::types::{AuthorDocument, BookDocument, GenreDocument};
use mongodb::{Collection, Database, bson::doc};

use crate::errors::TargetRepositoryError;
use crate::interfaces::TargetRepository;

const GENRES_COLLECTION: &str = "genres";
const AUTHORS_COLLECTION: &str = "authors";
const BOOKS_COLLECTION: &str = "books";

/// MongoDB implementation of the target repository.
///
/// Holds one typed collection handle per entity type. Every save is a
/// `replace_one` upsert on the document id; saves are independent store
/// calls with no transaction spanning them.
pub struct MongoTargetRepository {
    genres: Collection<GenreDocument>,
    authors: Collection<AuthorDocument>,
    books: Collection<BookDocument>,
}

impl MongoTargetRepository {
    /// Creates a new MongoDB target repository instance.
    ///
    /// # Arguments
    ///
    /// * `database` - The target database holding the three entity collections
    ///
    /// # Returns
    ///
    /// A new `MongoTargetRepository` instance.
    pub fn new(database: &Database) -> Self {
        Self {
            genres: database.collection(GENRES_COLLECTION),
            authors: database.collection(AUTHORS_COLLECTION),
            books: database.collection(BOOKS_COLLECTION),
        }
    }
}

#[async_trait]
impl TargetRepository for MongoTargetRepository {
    async fn save_genre(&self, document: &GenreDocument) -> Result<(), TargetRepositoryError> {
        self.genres
            .replace_one(doc! { "_id": &document.id }, document)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn save_author(&self, document: &AuthorDocument) -> Result<(), TargetRepositoryError> {
        self.authors
            .replace_one(doc! { "_id": &document.id }, document)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn save_book(&self, document: &BookDocument) -> Result<(), TargetRepositoryError> {
        self.books
            .replace_one(doc! { "_id": &document.id }, document)
            .upsert(true)
            .await?;
        Ok(())
    }
}
