//! Inventory domain module.
//!
//! This crate contains the stock item model, the quantity rules, and the
//! persistence port. Everything here except the `StockRepository` trait is
//! pure, deterministic domain logic (no IO, no HTTP).

pub mod item;
pub mod repository;
pub mod stock;

pub use item::{BeerCategory, StockItem};
pub use repository::{StockRepository, StoreError};
