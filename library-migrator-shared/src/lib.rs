//! # Library Migrator Shared
//! This crate defines shared data structures and types used across the
//! library migrator ecosystem. It includes the source-side entities read
//! from the relational store and the target-side documents written to the
//! document store.
pub mod types;
