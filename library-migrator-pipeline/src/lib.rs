//! # Library Migrator Pipeline
//! This crate defines the core traits and modules for migrating library
//! entities from the relational store to the document store.
//! It includes modules for reading, processing and writing records, for
//! composing chunk-oriented steps into a job, and for lifecycle events,
//! along with error handling.
pub mod events;
pub mod job;
pub mod processor;
pub mod reader;
pub mod records;
pub mod step;
pub mod writer;

pub mod errors;
