//! PostgreSQL implementation of the source repository.
//!
//! Streams entity rows with a single forward-only query per entity type,
//! mapping each row through a typed row struct. Book rows are hydrated with
//! their comments by one subordinate query per row before being yielded.
use async_stream::try_stream;
use chrono::NaiveDateTime;
use futures::TryStreamExt;
use library_migrator_shared::types::{SourceAuthor, SourceBook, SourceComment, SourceGenre};
use sqlx::PgPool;

use crate::errors::SourceRepositoryError;
use crate::interfaces::{SourceRecordStream, SourceRepository};

const SELECT_GENRES_SQL: &str = "SELECT id, name FROM genre";
const SELECT_AUTHORS_SQL: &str = "SELECT id, name FROM authors";
const SELECT_BOOKS_SQL: &str = "SELECT id, name FROM books";
const SELECT_COMMENTS_SQL: &str = "SELECT name, comment, datetime FROM comments WHERE book_id = $1";

/// PostgreSQL implementation of the source repository.
///
/// Holds a connection pool and hands out lazy row streams. Each stream owns
/// a clone of the pool, so it stays valid for as long as the step that
/// opened it and releases its cursor when dropped.
pub struct PostgresSourceRepository {
    pool: PgPool,
}

impl PostgresSourceRepository {
    /// Creates a new PostgreSQL source repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool for the source schema
    ///
    /// # Returns
    ///
    /// A new `PostgresSourceRepository` instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One genre row of the `genre` table.
#[derive(Debug, sqlx::FromRow)]
struct GenreRow {
    id: i64,
    name: String,
}

impl From<GenreRow> for SourceGenre {
    fn from(row: GenreRow) -> Self {
        SourceGenre {
            id: row.id,
            name: row.name,
        }
    }
}

/// One author row of the `authors` table.
#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
}

impl From<AuthorRow> for SourceAuthor {
    fn from(row: AuthorRow) -> Self {
        SourceAuthor {
            id: row.id,
            name: row.name,
        }
    }
}

/// One book row of the `books` table, before comment hydration.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    name: String,
}

/// One comment row of the `comments` table.
#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    name: String,
    comment: String,
    datetime: NaiveDateTime,
}

impl From<CommentRow> for SourceComment {
    fn from(row: CommentRow) -> Self {
        SourceComment {
            name: row.name,
            text: row.comment,
            posted_at: row.datetime,
        }
    }
}

fn hydrate_book(row: BookRow, comments: Vec<CommentRow>) -> SourceBook {
    SourceBook {
        id: row.id,
        name: row.name,
        comments: comments.into_iter().map(SourceComment::from).collect(),
    }
}

impl SourceRepository for PostgresSourceRepository {
    fn stream_genres(&self) -> SourceRecordStream<SourceGenre> {
        let pool = self.pool.clone();
        Box::pin(try_stream! {
            let mut rows = sqlx::query_as::<_, GenreRow>(SELECT_GENRES_SQL).fetch(&pool);
            while let Some(row) = rows.try_next().await? {
                yield SourceGenre::from(row);
            }
        })
    }

    fn stream_authors(&self) -> SourceRecordStream<SourceAuthor> {
        let pool = self.pool.clone();
        Box::pin(try_stream! {
            let mut rows = sqlx::query_as::<_, AuthorRow>(SELECT_AUTHORS_SQL).fetch(&pool);
            while let Some(row) = rows.try_next().await? {
                yield SourceAuthor::from(row);
            }
        })
    }

    fn stream_books(&self) -> SourceRecordStream<SourceBook> {
        let pool = self.pool.clone();
        Box::pin(try_stream! {
            let mut rows = sqlx::query_as::<_, BookRow>(SELECT_BOOKS_SQL).fetch(&pool);
            while let Some(row) = rows.try_next().await? {
                let comments = sqlx::query_as::<_, CommentRow>(SELECT_COMMENTS_SQL)
                    .bind(row.id)
                    .fetch_all(&pool)
                    .await?;
                yield hydrate_book(row, comments);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_genre_row_maps_to_source_genre() {
        let row = GenreRow {
            id: 7,
            name: "Fantasy".to_string(),
        };

        let genre = SourceGenre::from(row);

        assert_eq!(genre.id, 7);
        assert_eq!(genre.name, "Fantasy");
    }

    #[test]
    fn test_comment_row_maps_text_and_timestamp() {
        let posted_at = NaiveDate::from_ymd_opt(2020, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap();
        let row = CommentRow {
            name: "reader".to_string(),
            comment: "a fine book".to_string(),
            datetime: posted_at,
        };

        let comment = SourceComment::from(row);

        assert_eq!(comment.name, "reader");
        assert_eq!(comment.text, "a fine book");
        assert_eq!(comment.posted_at, posted_at);
    }

    #[test]
    fn test_hydrate_book_preserves_comment_order() {
        let posted_at = NaiveDate::from_ymd_opt(2021, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let row = BookRow {
            id: 3,
            name: "War and Peace".to_string(),
        };
        let comments = vec![
            CommentRow {
                name: "first".to_string(),
                comment: "one".to_string(),
                datetime: posted_at,
            },
            CommentRow {
                name: "second".to_string(),
                comment: "two".to_string(),
                datetime: posted_at,
            },
        ];

        let book = hydrate_book(row, comments);

        assert_eq!(book.id, 3);
        assert_eq!(book.comments.len(), 2);
        assert_eq!(book.comments[0].name, "first");
        assert_eq!(book.comments[1].name, "second");
    }

    #[test]
    fn test_hydrate_book_with_no_comments() {
        let row = BookRow {
            id: 4,
            name: "Anna Karenina".to_string(),
        };

        let book = hydrate_book(row, Vec::new());

        assert!(book.comments.is_empty());
    }
}
