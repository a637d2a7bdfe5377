use chrono::NaiveDateTime;

/// A reader comment attached to a book in the relational source store.
///
/// Comments exist only on the source side. They are read alongside their
/// parent book and are never persisted independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    pub name: String,
    pub text: String,
    pub posted_at: NaiveDateTime,
}
