use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use beerstock_core::ItemId;
use beerstock_inventory::{StockItem, StockRepository, StoreError};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    items: BTreeMap<ItemId, StockItem>,
}

/// In-memory stock store.
///
/// Intended for tests/dev. Items are kept ordered by id, so `list_all` is
/// stable. Ids come from a counter and are never handed out twice, even after
/// a delete. Names are unique, mirroring the relational `UNIQUE(name)` constraint.
#[derive(Debug)]
pub struct InMemoryStockRepository {
    inner: RwLock<Inner>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                items: BTreeMap::new(),
            }),
        }
    }

    fn poisoned(operation: &str) -> StoreError {
        StoreError::Unavailable(format!("lock poisoned during {operation}"))
    }
}

impl Default for InMemoryStockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn name_taken(items: &BTreeMap<ItemId, StockItem>, name: &str, except: Option<ItemId>) -> bool {
    items
        .values()
        .any(|i| i.name == name && i.id != except)
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn insert(&self, mut item: StockItem) -> Result<StockItem, StoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("insert"))?;

        if name_taken(&inner.items, &item.name, None) {
            return Err(StoreError::Constraint(format!(
                "duplicate name '{}'",
                item.name
            )));
        }

        let id = ItemId::new(inner.next_id);
        inner.next_id += 1;
        item.id = Some(id);
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<StockItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned("find_by_id"))?;
        Ok(inner.items.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StockItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned("find_by_name"))?;
        Ok(inner.items.values().find(|i| i.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<StockItem>, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned("list_all"))?;
        Ok(inner.items.values().cloned().collect())
    }

    async fn update(&self, item: StockItem) -> Result<StockItem, StoreError> {
        let id = item.id.ok_or(StoreError::MissingId("update"))?;
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("update"))?;

        if !inner.items.contains_key(&id) {
            return Err(StoreError::Backend(format!("no row with id {id} to update")));
        }
        if name_taken(&inner.items, &item.name, Some(id)) {
            return Err(StoreError::Constraint(format!(
                "duplicate name '{}'",
                item.name
            )));
        }

        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned("delete"))?;
        Ok(inner.items.remove(&id).is_some())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned("exists_by_name"))?;
        Ok(name_taken(&inner.items, name, None))
    }
}
