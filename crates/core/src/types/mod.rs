//! Core types for Quarry.
//!
//! This module provides type-safe wrappers for document ids and the two
//! custom GraphQL scalars.

pub mod email;
pub mod id;
pub mod scalar;
pub mod timestamp;

pub use email::{Email, EmailError};
pub use id::*;
pub use scalar::ScalarError;
pub use timestamp::Timestamp;
