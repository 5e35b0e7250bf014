//! Request and response models for the items API

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored item. `description` is nullable in storage and in the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Input shape for both create and update. Updates overwrite both fields;
/// partial updates are not supported.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Confirmation body returned by delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
