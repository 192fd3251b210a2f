//! Quarry Core - Shared types library.
//!
//! This crate provides common types used across all Quarry components:
//! - `api` - GraphQL server over the document store
//! - `cli` - Command-line tools for migrations, seeding and schema export
//!
//! # Architecture
//!
//! The core crate contains only types and pure conversions - no I/O, no
//! database access, no HTTP. The `graphql` feature binds the scalar codecs to
//! `async-graphql` so the server can use these types directly as field values.
//!
//! # Modules
//!
//! - [`types`] - Document ids, the `Email` and `Date` scalars, and their codec errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
