//! SQLite-backed inventory store.
//!
//! The pool holds a single connection, so statements run one at a time and
//! each read sees every write that completed before it. That also keeps a
//! `sqlite::memory:` database alive and shared for the lifetime of the store.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::instrument;

use shelflife_calendar::JalaliDate;
use shelflife_core::ItemId;
use shelflife_inventory::{FoodItem, ItemName};

use super::{InventoryStore, StoreError};

#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
}

#[derive(Debug, FromRow)]
struct FoodItemRow {
    id: i64,
    name: String,
    expiry_date: String,
}

impl TryFrom<FoodItemRow> for FoodItem {
    type Error = StoreError;

    fn try_from(row: FoodItemRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StoreError::CorruptRow { id: row.id, reason };
        let name = ItemName::new(row.name.clone()).map_err(|e| corrupt(e.to_string()))?;
        let expiry_date = row
            .expiry_date
            .parse::<JalaliDate>()
            .map_err(|e| corrupt(e.to_string()))?;
        Ok(FoodItem::new(ItemId::new(row.id), name, expiry_date))
    }
}

fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |source| StoreError::Database { operation, source }
}

impl SqliteInventoryStore {
    /// Open (creating if needed) the database at `database_url` and make sure
    /// the `food_items` table exists.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid SQLite URL {database_url:?}"))?
            .create_if_missing(true);

        if let Some(parent) = options
            .get_filename()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create database directory at {:?}", parent))?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open SQLite database at {database_url:?}"))?;

        let store = Self { pool };
        store
            .migrate()
            .await
            .context("failed to create food_items table")?;

        tracing::debug!(database_url, "inventory store ready");
        Ok(store)
    }

    /// A private database that disappears when the store is dropped.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS food_items (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL UNIQUE,
                expiry_date TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error("migrate"))?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl InventoryStore for SqliteInventoryStore {
    #[instrument(skip_all, fields(name = %name))]
    async fn add_item(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO food_items (name, expiry_date)
            VALUES (?1, ?2)
            "#,
        )
        .bind(name.as_str())
        .bind(expiry_date.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("add_item"))?;

        let applied = result.rows_affected() == 1;
        tracing::debug!(applied, "add_item");
        Ok(applied)
    }

    #[instrument(skip_all)]
    async fn list_items(&self) -> Result<Vec<FoodItem>, StoreError> {
        let rows = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT id, name, expiry_date
            FROM food_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list_items"))?;

        rows.into_iter().map(FoodItem::try_from).collect()
    }

    #[instrument(skip_all, fields(name = %name))]
    async fn get_item(&self, name: &ItemName) -> Result<Option<FoodItem>, StoreError> {
        let row = sqlx::query_as::<_, FoodItemRow>(
            r#"
            SELECT id, name, expiry_date
            FROM food_items
            WHERE name = ?1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("get_item"))?;

        row.map(FoodItem::try_from).transpose()
    }

    #[instrument(skip_all, fields(current = %current, new_name = %new_name))]
    async fn rename_item(
        &self,
        current: &ItemName,
        new_name: &ItemName,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE OR IGNORE food_items
            SET name = ?2
            WHERE name = ?1
            "#,
        )
        .bind(current.as_str())
        .bind(new_name.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("rename_item"))?;

        let applied = result.rows_affected() == 1;
        tracing::debug!(applied, "rename_item");
        Ok(applied)
    }

    #[instrument(skip_all, fields(name = %name, expiry_date = %expiry_date))]
    async fn update_expiry(
        &self,
        name: &ItemName,
        expiry_date: JalaliDate,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE food_items
            SET expiry_date = ?2
            WHERE name = ?1
            "#,
        )
        .bind(name.as_str())
        .bind(expiry_date.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("update_expiry"))?;

        let applied = result.rows_affected() == 1;
        tracing::debug!(applied, "update_expiry");
        Ok(applied)
    }

    #[instrument(skip_all, fields(name = %name))]
    async fn delete_item(&self, name: &ItemName) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM food_items
            WHERE name = ?1
            "#,
        )
        .bind(name.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("delete_item"))?;

        let applied = result.rows_affected() == 1;
        tracing::debug!(applied, "delete_item");
        Ok(applied)
    }
}
