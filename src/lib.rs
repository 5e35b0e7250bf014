//! itemd: minimal CRUD HTTP service for a single `Item` entity
//!
//! Exposes four routes over a SQLite-backed `items` table — list, create,
//! update-by-id, delete-by-id — plus a health check. No auth, no pagination,
//! no versioning: the database owns all state and every request round-trips
//! to it.

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use error::{AppError, AppResult};
