//! Persistence layer — libSQL-backed storage for talent profiles and jobs.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::{JobStore, ProfileStore};
