//! Storage access. Every function takes the connection pool explicitly;
//! the pool is constructed once in `main` and injected through actix
//! app data, never reached for as ambient state.

pub mod tasks;
pub mod users;
