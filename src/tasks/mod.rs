//! Core task-domain logic: small pure components consulted by the route
//! handlers. Everything here operates on already-fetched data; persistence
//! stays in `crate::store`.

pub mod access;
pub mod checklist;
pub mod counts;
pub mod display;
pub mod filter;
