//! MongoDB implementations for the target side of the migration.
mod target_repository;

pub use target_repository::MongoTargetRepository;
