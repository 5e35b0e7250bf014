//! SQLite data access layer
//!
//! Wraps a sqlx connection pool behind the four item operations. The pool is
//! constructed explicitly at startup and injected into the router state, so
//! tests can substitute an in-memory database. Connections return to the
//! pool on every exit path, including errors.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemCreate};

/// Kept low for single-user tooling.
const MAX_CONNECTIONS: u32 = 5;

/// Thread-safe handle to the items database
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create the database file at the given path and run migrations.
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))
            .context("invalid database path")?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .context("failed to open sqlite database")?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    ///
    /// A single connection is used: each pooled sqlite `:memory:` connection
    /// would otherwise see its own private database.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("failed to open in-memory database")?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT
            );
        "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create items table")?;

        info!("database migrations complete");
        Ok(())
    }

    /// Every stored item, in storage order. Unbounded: no pagination.
    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>("SELECT id, name, description FROM items")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Insert a new item and return it with its assigned id.
    pub async fn create_item(&self, item: &ItemCreate) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, description) VALUES (?, ?) RETURNING id, name, description",
        )
        .bind(&item.name)
        .bind(item.description.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Overwrite name and description of the item with the given id.
    pub async fn update_item(&self, id: i64, item: &ItemCreate) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            "UPDATE items SET name = ?, description = ? WHERE id = ? \
             RETURNING id, name, description",
        )
        .bind(&item.name)
        .bind(item.description.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
        Ok(updated)
    }

    /// Delete the item with the given id. Deletion is physical and immediate.
    pub async fn delete_item(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ItemCreate {
        ItemCreate {
            name: "Widget".to_string(),
            description: Some("A small widget".to_string()),
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let db = Database::connect_in_memory().await.unwrap();

        let first = db.create_item(&widget()).await.unwrap();
        let second = db.create_item(&widget()).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let db = Database::connect_in_memory().await.unwrap();

        let created = db.create_item(&widget()).await.unwrap();
        let items = db.list_items().await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, created.id);
        assert_eq!(items[0].name, "Widget");
        assert_eq!(items[0].description.as_deref(), Some("A small widget"));
    }

    #[tokio::test]
    async fn list_empty_table_is_empty() {
        let db = Database::connect_in_memory().await.unwrap();
        let items = db.list_items().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn create_accepts_null_description() {
        let db = Database::connect_in_memory().await.unwrap();

        let created = db
            .create_item(&ItemCreate {
                name: "Bare".to_string(),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(created.description, None);
    }

    #[tokio::test]
    async fn update_overwrites_both_fields() {
        let db = Database::connect_in_memory().await.unwrap();
        let created = db.create_item(&widget()).await.unwrap();

        let updated = db
            .update_item(
                created.id,
                &ItemCreate {
                    name: "Gadget".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.description, None);

        let items = db.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Gadget");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let db = Database::connect_in_memory().await.unwrap();
        db.create_item(&widget()).await.unwrap();

        let err = db.update_item(99999, &widget()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Table unchanged
        let items = db.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Widget");
    }

    #[tokio::test]
    async fn delete_removes_row_and_second_delete_fails() {
        let db = Database::connect_in_memory().await.unwrap();
        let created = db.create_item(&widget()).await.unwrap();

        db.delete_item(created.id).await.unwrap();
        assert!(db.list_items().await.unwrap().is_empty());

        let err = db.delete_item(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn file_backed_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.db");

        {
            let db = Database::connect(&path).await.unwrap();
            db.create_item(&widget()).await.unwrap();
        }

        let db = Database::connect(&path).await.unwrap();
        let items = db.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Widget");
    }
}
