use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, SourceComment, SourceId};

/// A book row as it exists in the relational source store, hydrated with
/// the comments owned by it.
///
/// Comments are fetched by a subordinate query keyed on the book id and are
/// only ever reachable through their parent book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBook {
    pub id: SourceId,
    pub name: String,
    pub comments: Vec<SourceComment>,
}

/// A book document as persisted in the target document store.
///
/// The source book's comments are not carried over: the observed mapping
/// hydrates them on read and discards them on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
}
