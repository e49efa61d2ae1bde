//! Stock store implementations.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStockRepository;
pub use postgres::PostgresStockRepository;
