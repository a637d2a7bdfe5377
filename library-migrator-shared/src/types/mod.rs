mod author;
mod book;
mod comment;
mod entity;
mod genre;

pub use author::{AuthorDocument, SourceAuthor};
pub use book::{BookDocument, SourceBook};
pub use comment::SourceComment;
pub use entity::EntityKind;
pub use genre::{GenreDocument, SourceGenre};

/// Identifier of a row in the relational source store.
pub type SourceId = i64;

/// Identifier of a document in the target store, derived from the source id.
pub type DocumentId = String;
