//! Postgres-backed stock store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Constraint` |
//! | Database (check constraint violation) | `23514` | `Constraint` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / PoolTimedOut / Io | N/A | `Unavailable` |
//! | Other | N/A | `Backend` |
//!
//! ## Thread Safety
//!
//! `PostgresStockRepository` is `Send + Sync` and cheap to clone; the SQLx
//! pool handles connection management.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use beerstock_core::ItemId;
use beerstock_inventory::{BeerCategory, StockItem, StockRepository, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS beers (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    brand TEXT NOT NULL,
    max_stock BIGINT NOT NULL CHECK (max_stock >= 1),
    quantity BIGINT NOT NULL CHECK (quantity >= 0),
    beer_type TEXT NOT NULL
)
"#;

const SELECT_COLUMNS: &str = "id, name, brand, max_stock, quantity, beer_type";

/// Postgres-backed stock store (`beers` table).
#[derive(Debug, Clone)]
pub struct PostgresStockRepository {
    pool: Arc<PgPool>,
}

impl PostgresStockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `beers` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

fn row_to_item(row: &PgRow) -> Result<StockItem, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Backend(format!("failed to decode beers row: {e}"));

    let beer_type: String = row.try_get("beer_type").map_err(decode)?;
    let category = beer_type
        .parse::<BeerCategory>()
        .map_err(|e| StoreError::Backend(e.to_string()))?;

    Ok(StockItem {
        id: Some(ItemId::new(row.try_get("id").map_err(decode)?)),
        name: row.try_get("name").map_err(decode)?,
        brand: row.try_get("brand").map_err(decode)?,
        capacity: row.try_get("max_stock").map_err(decode)?,
        quantity: row.try_get("quantity").map_err(decode)?,
        category,
    })
}

#[async_trait]
impl StockRepository for PostgresStockRepository {
    #[instrument(skip(self, item), fields(name = %item.name), err)]
    async fn insert(&self, item: StockItem) -> Result<StockItem, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO beers (name, brand, max_stock, quantity, beer_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&item.name)
        .bind(&item.brand)
        .bind(item.capacity)
        .bind(item.quantity)
        .bind(item.category.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        row_to_item(&row)
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ItemId) -> Result<Option<StockItem>, StoreError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM beers WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(row_to_item).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<StockItem>, StoreError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM beers WHERE name = $1"))
            .bind(name)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_name", e))?;

        row.as_ref().map(row_to_item).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<StockItem>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM beers ORDER BY id ASC"))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_all", e))?;

        rows.iter().map(row_to_item).collect()
    }

    #[instrument(skip(self, item), fields(id = ?item.id), err)]
    async fn update(&self, item: StockItem) -> Result<StockItem, StoreError> {
        let id = item.id.ok_or(StoreError::MissingId("update"))?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE beers
            SET name = $2, brand = $3, max_stock = $4, quantity = $5, beer_type = $6
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id.get())
        .bind(&item.name)
        .bind(&item.brand)
        .bind(item.capacity)
        .bind(item.quantity)
        .bind(item.category.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        match row {
            Some(row) => row_to_item(&row),
            None => Err(StoreError::Backend(format!("no row with id {id} to update"))),
        }
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM beers WHERE name = $1) AS present")
            .bind(name)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists_by_name", e))?;

        row.try_get::<bool, _>("present")
            .map_err(|e| StoreError::Backend(format!("failed to read exists flag: {e}")))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("23514") => StoreError::Constraint(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool timed out in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        other => StoreError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}
