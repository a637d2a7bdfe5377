//! # Library Migrator Repository
//! This crate provides traits and implementations for interacting with the
//! two stores involved in the migration. It includes definitions for errors,
//! interfaces, a concrete PostgreSQL source implementation and a concrete
//! MongoDB target implementation.
pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod postgres;

pub use errors::{SourceRepositoryError, TargetRepositoryError};
pub use interfaces::{SourceRecordStream, SourceRepository, TargetRepository};
pub use mongo::MongoTargetRepository;
pub use postgres::PostgresSourceRepository;
