//! The `taskboard` library crate.
//!
//! Contains the domain models, the pure task-logic components (date-range
//! resolution, checklist merging, count aggregation, access policy),
//! storage access, authentication, routing configuration, and error
//! handling for the taskboard application. The binary in `main.rs`
//! assembles these into the running server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
