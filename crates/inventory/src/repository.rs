//! Stock item persistence boundary.
//!
//! The service layer only ever talks to `StockRepository`; concrete backends
//! (in-memory, Postgres) live in `beerstock-infra`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use beerstock_core::ItemId;

use crate::item::StockItem;

/// Store operation error.
///
/// These are **infrastructure errors** as opposed to domain rejections. They
/// are never retried and never translated into a business outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached (pool closed, lock poisoned, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A hard constraint (unique name, check constraint) rejected the write.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// A write that requires an identifier was given an item without one.
    #[error("item has no identifier for {0}")]
    MissingId(&'static str),

    /// Any other backend failure.
    #[error("store error: {0}")]
    Backend(String),
}

/// Persistence abstraction for stock items, keyed by id and by unique name.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Insert a new item. The store assigns the id; any id on `item` is ignored.
    async fn insert(&self, item: StockItem) -> Result<StockItem, StoreError>;

    async fn find_by_id(&self, id: ItemId) -> Result<Option<StockItem>, StoreError>;

    /// Exact, case-sensitive match.
    async fn find_by_name(&self, name: &str) -> Result<Option<StockItem>, StoreError>;

    /// Every item, in a store-defined order that is stable while the store is unchanged.
    async fn list_all(&self) -> Result<Vec<StockItem>, StoreError>;

    /// Replace every field of the item identified by `item.id`.
    async fn update(&self, item: StockItem) -> Result<StockItem, StoreError>;

    /// Remove an item. Returns whether something was removed.
    async fn delete(&self, id: ItemId) -> Result<bool, StoreError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> StockRepository for Arc<S>
where
    S: StockRepository + ?Sized,
{
    async fn insert(&self, item: StockItem) -> Result<StockItem, StoreError> {
        (**self).insert(item).await
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<StockItem>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StockItem>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn list_all(&self) -> Result<Vec<StockItem>, StoreError> {
        (**self).list_all().await
    }

    async fn update(&self, item: StockItem) -> Result<StockItem, StoreError> {
        (**self).update(item).await
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        (**self).exists_by_name(name).await
    }
}
