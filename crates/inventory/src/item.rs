use core::str::FromStr;

use serde::{Deserialize, Serialize};

use beerstock_core::{DomainError, DomainResult, ItemId};

use crate::stock;

/// Closed set of beer categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerCategory {
    Lager,
    Malzbier,
    Witbier,
    Weiss,
    Ale,
    Ipa,
    Stout,
}

impl BeerCategory {
    pub const ALL: [BeerCategory; 7] = [
        BeerCategory::Lager,
        BeerCategory::Malzbier,
        BeerCategory::Witbier,
        BeerCategory::Weiss,
        BeerCategory::Ale,
        BeerCategory::Ipa,
        BeerCategory::Stout,
    ];

    /// Storage/wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            BeerCategory::Lager => "LAGER",
            BeerCategory::Malzbier => "MALZBIER",
            BeerCategory::Witbier => "WITBIER",
            BeerCategory::Weiss => "WEISS",
            BeerCategory::Ale => "ALE",
            BeerCategory::Ipa => "IPA",
            BeerCategory::Stout => "STOUT",
        }
    }
}

impl core::fmt::Display for BeerCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown beer category '{s}'")))
    }
}

/// Persisted stock item.
///
/// `id` is `None` until the store has inserted the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: Option<ItemId>,
    pub name: String,
    pub brand: String,
    pub capacity: i64,
    pub quantity: i64,
    pub category: BeerCategory,
}

impl StockItem {
    /// Build an item that has not been persisted yet.
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        capacity: i64,
        quantity: i64,
        category: BeerCategory,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            brand: brand.into(),
            capacity,
            quantity,
            category,
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Bounds check on this item's own quantity/capacity pair.
    pub fn ensure_within_bounds(&self) -> DomainResult<()> {
        stock::validate_stock(self.quantity, self.capacity)
    }

    /// Copy of this item with `amount` units added, if capacity allows.
    pub fn incremented(&self, amount: i64) -> DomainResult<StockItem> {
        let quantity = stock::increment_quantity(self.quantity, self.capacity, amount)?;
        Ok(StockItem {
            quantity,
            ..self.clone()
        })
    }

    /// Copy of this item with `amount` units removed, if enough are available.
    pub fn decremented(&self, amount: i64) -> DomainResult<StockItem> {
        let quantity = stock::decrement_quantity(self.quantity, amount)?;
        Ok(StockItem {
            quantity,
            ..self.clone()
        })
    }
}
