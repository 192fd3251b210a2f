//! Quarry API library.
//!
//! A GraphQL API over a document store holding Users and Orders. The crate
//! is a library so the binary, the CLI, and the integration tests share one
//! schema, store layer, and router.
//!
//! # Layout
//!
//! - [`db`] - collections and repositories (`PostgreSQL` or in-memory)
//! - [`graphql`] - schema, resolvers, and HTTP handlers
//! - [`seed`] - synthetic data generation
//! - [`routes`] - axum router with health checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
