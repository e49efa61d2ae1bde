//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is an expected, deterministic business rejection. Storage and
/// transport faults belong elsewhere and must never be folded into this enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No item carries the requested identifier.
    #[error("beer with id {0} not found")]
    NotFoundById(ItemId),

    /// No item carries the requested (case-sensitive) name.
    #[error("beer with name '{0}' not found")]
    NotFoundByName(String),

    /// An item with this name is already registered.
    #[error("beer with name '{0}' is already registered")]
    AlreadyExists(String),

    /// The resulting quantity would fall outside `[0, capacity]`.
    #[error("{}", describe_invalid_stock(.quantity, .capacity))]
    InvalidStock { quantity: i64, capacity: i64 },

    /// An increment/decrement amount was not strictly positive.
    #[error("{operation} amount must be greater than zero (got {amount})")]
    InvalidAmount { operation: StockOperation, amount: i64 },

    /// A decrement would drive the quantity below zero.
    #[error("cannot remove {requested} units: only {available} available")]
    InsufficientStock { requested: i64, available: i64 },

    /// A request failed shape validation (missing/blank fields, out-of-range values).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// Quantity-adjusting operation, used for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockOperation {
    Increment,
    Decrement,
}

impl core::fmt::Display for StockOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockOperation::Increment => f.write_str("increment"),
            StockOperation::Decrement => f.write_str("decrement"),
        }
    }
}

fn describe_invalid_stock(quantity: &i64, capacity: &i64) -> String {
    if *quantity < 0 {
        format!("stock quantity cannot be negative (got {quantity})")
    } else {
        format!("quantity {quantity} exceeds max stock of {capacity}")
    }
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_stock(quantity: i64, capacity: i64) -> Self {
        Self::InvalidStock { quantity, capacity }
    }

    /// Stable, machine-readable label for this error category.
    pub fn label(&self) -> &'static str {
        match self {
            DomainError::NotFoundById(_) | DomainError::NotFoundByName(_) => "not_found",
            DomainError::AlreadyExists(_) => "already_exists",
            DomainError::InvalidStock { .. } => "invalid_stock",
            DomainError::InvalidAmount { .. } => "invalid_amount",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidId(_) => "invalid_id",
        }
    }
}
