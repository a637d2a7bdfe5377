//! PostgreSQL implementations for the source side of the migration.
mod source_repository;

pub use source_repository::PostgresSourceRepository;
