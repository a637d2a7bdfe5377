use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, SourceId};

/// An author row as it exists in the relational source store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAuthor {
    pub id: SourceId,
    pub name: String,
}

/// An author document as persisted in the target document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
}
