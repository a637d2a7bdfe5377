use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, SourceId};

/// A genre row as it exists in the relational source store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGenre {
    pub id: SourceId,
    pub name: String,
}

/// A genre document as persisted in the target document store.
///
/// The document id is the decimal string form of the source row id, so a
/// target document can always be traced back to the exact source row it
/// was migrated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
}
