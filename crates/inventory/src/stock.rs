//! Stock quantity rules.
//!
//! Two kinds of checks live here:
//!
//! - **Bounds check** (`validate_stock`): an absolute quantity must sit in
//!   `[0, capacity]`. Used when an item is created or replaced wholesale.
//! - **Delta checks** (`increment_quantity`, `decrement_quantity`): a relative
//!   adjustment against the *stored* quantity and capacity. The upper and lower
//!   violations report different payloads (attempted quantity vs. capacity,
//!   requested amount vs. available), so they are kept separate.
//!
//! All functions are pure and deterministic.

use beerstock_core::{DomainError, DomainResult, StockOperation};

/// Require `0 <= quantity <= capacity`.
pub fn validate_stock(quantity: i64, capacity: i64) -> DomainResult<()> {
    if quantity < 0 || quantity > capacity {
        return Err(DomainError::invalid_stock(quantity, capacity));
    }
    Ok(())
}

fn ensure_positive(operation: StockOperation, amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::InvalidAmount { operation, amount });
    }
    Ok(())
}

/// Validate an increment amount on its own (before any lookup).
pub fn validate_increment_amount(amount: i64) -> DomainResult<()> {
    ensure_positive(StockOperation::Increment, amount)
}

/// Validate a decrement amount on its own (before any lookup).
pub fn validate_decrement_amount(amount: i64) -> DomainResult<()> {
    ensure_positive(StockOperation::Decrement, amount)
}

/// New quantity after adding `amount`, or the reason it is not allowed.
pub fn increment_quantity(current: i64, capacity: i64, amount: i64) -> DomainResult<i64> {
    validate_increment_amount(amount)?;
    match current.checked_add(amount) {
        Some(attempted) if attempted <= capacity => Ok(attempted),
        Some(attempted) => Err(DomainError::invalid_stock(attempted, capacity)),
        // The true sum does not fit in an i64, so it is above any capacity.
        None => Err(DomainError::invalid_stock(i64::MAX, capacity)),
    }
}

/// New quantity after removing `amount`, or the reason it is not allowed.
pub fn decrement_quantity(current: i64, amount: i64) -> DomainResult<i64> {
    validate_decrement_amount(amount)?;
    let remaining = current.saturating_sub(amount);
    if remaining < 0 {
        return Err(DomainError::InsufficientStock {
            requested: amount,
            available: current,
        });
    }
    Ok(remaining)
}
