//! Processor module for the migration pipeline.
//!
//! Provides the `ItemProcessor` contract and the three pure transforms
//! from source records to target documents. Processors perform no I/O: by
//! the time a record reaches them, every required field has already been
//! read successfully.
use library_migrator_shared::types::{
    AuthorDocument, BookDocument, GenreDocument, SourceAuthor, SourceBook, SourceGenre,
};

use crate::errors::ProcessError;

/// Transforms one source record into one target document.
///
/// The mapping is pure and total for well-formed input; an error here is a
/// distinguishable, step-terminating condition rather than an expected
/// branch.
pub trait ItemProcessor<I, O>: Send + Sync {
    fn process(&self, item: &I) -> Result<O, ProcessError>;
}

/// Maps a genre row to its target document.
#[derive(Debug, Default)]
pub struct GenreProcessor;

impl ItemProcessor<SourceGenre, GenreDocument> for GenreProcessor {
    fn process(&self, genre: &SourceGenre) -> Result<GenreDocument, ProcessError> {
        Ok(GenreDocument {
            id: genre.id.to_string(),
            name: genre.name.clone(),
        })
    }
}

/// Maps an author row to its target document.
#[derive(Debug, Default)]
pub struct AuthorProcessor;

impl ItemProcessor<SourceAuthor, AuthorDocument> for AuthorProcessor {
    fn process(&self, author: &SourceAuthor) -> Result<AuthorDocument, ProcessError> {
        Ok(AuthorDocument {
            id: author.id.to_string(),
            name: author.name.clone(),
        })
    }
}

/// Maps a book row to its target document.
///
/// The hydrated comments are dropped here: the target book document
/// carries only id and name.
#[derive(Debug, Default)]
pub struct BookProcessor;

impl ItemProcessor<SourceBook, BookDocument> for BookProcessor {
    fn process(&self, book: &SourceBook) -> Result<BookDocument, ProcessError> {
        Ok(BookDocument {
            id: book.id.to_string(),
            name: book.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use library_migrator_shared::types::SourceComment;

    use super::*;

    fn book_with_comments(comments: Vec<SourceComment>) -> SourceBook {
        SourceBook {
            id: 42,
            name: "Dead Souls".to_string(),
            comments,
        }
    }

    fn comment(name: &str) -> SourceComment {
        SourceComment {
            name: name.to_string(),
            text: "text".to_string(),
            posted_at: NaiveDate::from_ymd_opt(2019, 6, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_genre_id_is_stringified_and_name_copied() {
        let genre = SourceGenre {
            id: 17,
            name: "Satire".to_string(),
        };

        let document = GenreProcessor.process(&genre).unwrap();

        assert_eq!(document.id, "17");
        assert_eq!(document.name, "Satire");
    }

    #[test]
    fn test_author_id_is_stringified_and_name_copied() {
        let author = SourceAuthor {
            id: 9,
            name: "Gogol".to_string(),
        };

        let document = AuthorProcessor.process(&author).unwrap();

        assert_eq!(document.id, "9");
        assert_eq!(document.name, "Gogol");
    }

    #[test]
    fn test_document_id_round_trips_to_source_id() {
        let genre = SourceGenre {
            id: 123_456,
            name: "History".to_string(),
        };

        let document = GenreProcessor.process(&genre).unwrap();

        assert_eq!(document.id.parse::<i64>().unwrap(), genre.id);
    }

    #[test]
    fn test_transform_is_idempotent_over_clones() {
        let genre = SourceGenre {
            id: 5,
            name: "Poetry".to_string(),
        };

        let first = GenreProcessor.process(&genre.clone()).unwrap();
        let second = GenreProcessor.process(&genre.clone()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_book_comments_are_discarded() {
        let book = book_with_comments(vec![comment("a"), comment("b"), comment("c")]);

        let document = BookProcessor.process(&book).unwrap();

        assert_eq!(document.id, "42");
        assert_eq!(document.name, "Dead Souls");
    }

    #[test]
    fn test_book_without_comments_transforms() {
        let book = book_with_comments(Vec::new());

        let document = BookProcessor.process(&book).unwrap();

        assert_eq!(document.id, "42");
    }
}
