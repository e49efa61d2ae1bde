//! Stock service (application-level orchestration).
//!
//! Sits between the HTTP layer and a `StockRepository`. Each operation is a
//! single check-then-write sequence against one item:
//!
//! ```text
//! request
//!   ↓
//! 1. Validate arguments that need no state (amount > 0)
//!   ↓
//! 2. Load the item / check name uniqueness
//!   ↓
//! 3. Apply the stock rule (bounds or delta check)
//!   ↓
//! 4. Persist
//! ```
//!
//! A rejection at any step leaves the store untouched. Mutating operations
//! hold a process-local write lock across steps 2-4, so two requests in the
//! same process cannot interleave between the check and the write. Nothing is
//! retried.

use tokio::sync::Mutex;
use tracing::instrument;

use beerstock_core::{DomainError, ItemId};
use beerstock_inventory::{StockItem, StockRepository, StoreError, stock};

#[derive(Debug, thiserror::Error)]
pub enum StockServiceError {
    /// Business-rule rejection (deterministic).
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Store fault, not part of the domain taxonomy.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StockServiceResult<T> = Result<T, StockServiceError>;

/// Inventory operations over an injected store.
pub struct StockService<R> {
    repo: R,
    write_lock: Mutex<()>,
}

impl<R> StockService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }
}

impl<R> StockService<R>
where
    R: StockRepository,
{
    /// Register a new item. Any id on `item` is discarded; the store assigns one.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create(&self, mut item: StockItem) -> StockServiceResult<StockItem> {
        let _guard = self.write_lock.lock().await;

        if self.repo.exists_by_name(&item.name).await? {
            tracing::debug!("rejected: name already registered");
            return Err(DomainError::AlreadyExists(item.name).into());
        }
        item.ensure_within_bounds()?;

        item.id = None;
        let created = self.repo.insert(item).await?;
        tracing::info!(id = ?created.id, "beer created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: ItemId) -> StockServiceResult<StockItem> {
        self.load(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> StockServiceResult<StockItem> {
        self.repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::NotFoundByName(name.to_string()).into())
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> StockServiceResult<Vec<StockItem>> {
        Ok(self.repo.list_all().await?)
    }

    /// Replace every field of an existing item except its id.
    ///
    /// The bounds check uses the incoming quantity/capacity pair, so an update
    /// may lower or raise the capacity itself.
    #[instrument(skip(self, item))]
    pub async fn update(&self, id: ItemId, mut item: StockItem) -> StockServiceResult<StockItem> {
        let _guard = self.write_lock.lock().await;

        self.load(id).await?;
        item.ensure_within_bounds()?;

        item.id = Some(id);
        let updated = self.repo.update(item).await?;
        tracing::info!("beer updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> StockServiceResult<()> {
        let _guard = self.write_lock.lock().await;

        self.load(id).await?;
        if !self.repo.delete(id).await? {
            // Only reachable if another writer outside this process got there first.
            return Err(DomainError::NotFoundById(id).into());
        }
        tracing::info!("beer deleted");
        Ok(())
    }

    /// Add `amount` units, bounded by the stored capacity.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: ItemId, amount: i64) -> StockServiceResult<StockItem> {
        stock::validate_increment_amount(amount)?;
        let _guard = self.write_lock.lock().await;

        let current = self.load(id).await?;
        let next = current.incremented(amount).inspect_err(|e| {
            tracing::debug!(error = %e, "increment rejected");
        })?;

        let updated = self.repo.update(next).await?;
        tracing::info!(quantity = updated.quantity, "stock incremented");
        Ok(updated)
    }

    /// Remove `amount` units; the quantity never goes below zero.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: ItemId, amount: i64) -> StockServiceResult<StockItem> {
        stock::validate_decrement_amount(amount)?;
        let _guard = self.write_lock.lock().await;

        let current = self.load(id).await?;
        let next = current.decremented(amount).inspect_err(|e| {
            tracing::debug!(error = %e, "decrement rejected");
        })?;

        let updated = self.repo.update(next).await?;
        tracing::info!(quantity = updated.quantity, "stock decremented");
        Ok(updated)
    }

    async fn load(&self, id: ItemId) -> StockServiceResult<StockItem> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFoundById(id).into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use beerstock_inventory::BeerCategory;

    use super::*;
    use crate::repository::InMemoryStockRepository;

    fn service() -> StockService<InMemoryStockRepository> {
        StockService::new(InMemoryStockRepository::new())
    }

    fn heineken() -> StockItem {
        StockItem::new("Heineken", "Heineken", 50, 10, BeerCategory::Lager)
    }

    fn domain(err: StockServiceError) -> DomainError {
        match err {
            StockServiceError::Domain(e) => e,
            StockServiceError::Store(e) => panic!("expected a domain error, got store error: {e}"),
        }
    }

    fn is_not_found(err: &DomainError) -> bool {
        matches!(err, DomainError::NotFoundById(_) | DomainError::NotFoundByName(_))
    }

    #[tokio::test]
    async fn create_assigns_an_id() {
        let svc = service();
        let created = svc.create(heineken()).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.quantity, 10);
        assert_eq!(created.name, "Heineken");
    }

    #[tokio::test]
    async fn create_discards_client_supplied_id() {
        let svc = service();
        let created = svc.create(heineken().with_id(ItemId::new(500))).await.unwrap();
        assert_eq!(created.id, Some(ItemId::new(1)));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_names_regardless_of_other_fields() {
        let svc = service();
        svc.create(heineken()).await.unwrap();

        let other = StockItem::new("Heineken", "Other brand", 5, 1, BeerCategory::Stout);
        let err = domain(svc.create(other).await.unwrap_err());
        assert_eq!(err, DomainError::AlreadyExists("Heineken".to_string()));
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_out_of_bounds_quantity() {
        let svc = service();

        let mut over = heineken();
        over.quantity = 51;
        assert_eq!(
            domain(svc.create(over).await.unwrap_err()),
            DomainError::invalid_stock(51, 50)
        );

        let mut negative = heineken();
        negative.quantity = -1;
        assert!(matches!(
            domain(svc.create(negative).await.unwrap_err()),
            DomainError::InvalidStock { .. }
        ));

        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let svc = service();
        let id = svc.create(heineken()).await.unwrap().id.unwrap();
        let first = svc.get_by_id(id).await.unwrap();
        let second = svc.get_by_id(id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let svc = service();
        let err = domain(svc.get_by_id(ItemId::new(999_999)).await.unwrap_err());
        assert_eq!(err, DomainError::NotFoundById(ItemId::new(999_999)));
    }

    #[tokio::test]
    async fn name_lookup_is_exact() {
        let svc = service();
        svc.create(heineken()).await.unwrap();
        assert_eq!(svc.get_by_name("Heineken").await.unwrap().brand, "Heineken");

        let err = domain(svc.get_by_name("heineken").await.unwrap_err());
        assert_eq!(err, DomainError::NotFoundByName("heineken".to_string()));
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let svc = service();
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_keeps_path_id_and_checks_incoming_capacity() {
        let svc = service();
        let id = svc.create(heineken()).await.unwrap().id.unwrap();

        // Capacity lowered together with quantity: allowed.
        let replacement = StockItem::new("Heineken 0.0", "Heineken", 20, 15, BeerCategory::Lager)
            .with_id(ItemId::new(12345));
        let updated = svc.update(id, replacement).await.unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.capacity, 20);
        assert_eq!(updated.name, "Heineken 0.0");
        assert!(svc.get_by_id(ItemId::new(12345)).await.is_err());

        // Quantity above the *incoming* capacity: rejected, store unchanged.
        let bad = StockItem::new("Heineken 0.0", "Heineken", 10, 15, BeerCategory::Lager);
        assert_eq!(
            domain(svc.update(id, bad).await.unwrap_err()),
            DomainError::invalid_stock(15, 10)
        );
        assert_eq!(svc.get_by_id(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_item_is_not_found() {
        let svc = service();
        let err = domain(svc.update(ItemId::new(3), heineken()).await.unwrap_err());
        assert!(is_not_found(&err));
    }

    #[tokio::test]
    async fn delete_removes_the_item() {
        let svc = service();
        let id = svc.create(heineken()).await.unwrap().id.unwrap();
        svc.delete(id).await.unwrap();
        assert!(is_not_found(&domain(svc.get_by_id(id).await.unwrap_err())));
        assert!(is_not_found(&domain(svc.delete(id).await.unwrap_err())));
    }

    #[tokio::test]
    async fn increment_past_capacity_leaves_quantity_unchanged() {
        let svc = service();
        let id = svc.create(heineken()).await.unwrap().id.unwrap();

        let err = domain(svc.increment(id, 45).await.unwrap_err());
        assert_eq!(
            err,
            DomainError::InvalidStock {
                quantity: 55,
                capacity: 50
            }
        );
        assert_eq!(svc.get_by_id(id).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn increment_then_oversized_decrement() {
        let svc = service();
        let id = svc.create(heineken()).await.unwrap().id.unwrap();

        assert_eq!(svc.increment(id, 30).await.unwrap().quantity, 40);

        let err = domain(svc.decrement(id, 50).await.unwrap_err());
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 50,
                available: 40
            }
        );
        assert_eq!(svc.get_by_id(id).await.unwrap().quantity, 40);

        assert_eq!(svc.decrement(id, 40).await.unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn non_positive_amounts_are_rejected_before_lookup() {
        let svc = service();
        let id = svc.create(heineken()).await.unwrap().id.unwrap();

        assert!(matches!(
            domain(svc.decrement(id, -5).await.unwrap_err()),
            DomainError::InvalidAmount { amount: -5, .. }
        ));
        assert!(matches!(
            domain(svc.increment(id, 0).await.unwrap_err()),
            DomainError::InvalidAmount { amount: 0, .. }
        ));
        // Amount is checked first, even for unknown ids.
        assert!(matches!(
            domain(svc.increment(ItemId::new(77), -1).await.unwrap_err()),
            DomainError::InvalidAmount { .. }
        ));
        assert_eq!(svc.get_by_id(id).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn increment_that_overflows_is_rejected_without_writing() {
        let svc = service();
        let id = svc
            .create(StockItem::new(
                "Bottomless",
                "Keg Co",
                i64::MAX,
                i64::MAX - 1,
                BeerCategory::Ale,
            ))
            .await
            .unwrap()
            .id
            .unwrap();

        assert_eq!(
            domain(svc.increment(id, i64::MAX).await.unwrap_err()),
            DomainError::invalid_stock(i64::MAX, i64::MAX)
        );
        assert_eq!(svc.get_by_id(id).await.unwrap().quantity, i64::MAX - 1);

        assert_eq!(svc.increment(id, 1).await.unwrap().quantity, i64::MAX);
    }

    #[tokio::test]
    async fn adjusting_unknown_item_is_not_found() {
        let svc = service();
        assert!(is_not_found(&domain(svc.increment(ItemId::new(1), 1).await.unwrap_err())));
        assert!(is_not_found(&domain(svc.decrement(ItemId::new(1), 1).await.unwrap_err())));
    }

    #[tokio::test]
    async fn concurrent_increments_never_exceed_capacity() {
        let svc = Arc::new(service());
        let id = svc
            .create(StockItem::new("Stout", "Guinness", 10, 0, BeerCategory::Stout))
            .await
            .unwrap()
            .id
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move { svc.increment(id, 1).await }));
        }

        let mut ok = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 10);
        assert_eq!(svc.get_by_id(id).await.unwrap().quantity, 10);
    }

    struct BrokenStore;

    #[async_trait]
    impl StockRepository for BrokenStore {
        async fn insert(&self, _item: StockItem) -> Result<StockItem, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn find_by_id(&self, _id: ItemId) -> Result<Option<StockItem>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn find_by_name(&self, _name: &str) -> Result<Option<StockItem>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn list_all(&self) -> Result<Vec<StockItem>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn update(&self, _item: StockItem) -> Result<StockItem, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn delete(&self, _id: ItemId) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn exists_by_name(&self, _name: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    #[tokio::test]
    async fn store_faults_stay_outside_the_domain_taxonomy() {
        let svc = StockService::new(BrokenStore);
        let err = svc.list_all().await.unwrap_err();
        assert!(matches!(err, StockServiceError::Store(StoreError::Unavailable(_))));

        let err = svc.create(heineken()).await.unwrap_err();
        assert!(matches!(err, StockServiceError::Store(_)));
    }

    #[tokio::test]
    async fn works_through_a_shared_trait_object() {
        let repo: Arc<dyn StockRepository> = Arc::new(InMemoryStockRepository::new());
        let svc = StockService::new(repo);
        let created = svc.create(heineken()).await.unwrap();
        assert_eq!(svc.get_by_id(created.id.unwrap()).await.unwrap(), created);
    }
}
