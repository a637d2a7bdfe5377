use std::fmt;

/// Tags the entity type a pipeline stage or lifecycle event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Genre,
    Author,
    Book,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Genre => "genre",
            EntityKind::Author => "author",
            EntityKind::Book => "book",
        };
        f.write_str(name)
    }
}
