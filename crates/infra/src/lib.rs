//! Infrastructure layer: stores, configuration, and the stock service.

pub mod config;
pub mod repository;
pub mod stock_service;

pub use config::{AppConfig, ConfigError};
pub use stock_service::{StockService, StockServiceError};
