use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use beerstock_infra::{
    AppConfig, StockService,
    repository::{InMemoryStockRepository, PostgresStockRepository},
};
use beerstock_inventory::StockRepository;

/// Stock service over whichever store the configuration selected.
pub type SharedStockService = StockService<Arc<dyn StockRepository>>;

pub struct AppServices {
    stock: SharedStockService,
}

impl AppServices {
    pub fn new(repo: Arc<dyn StockRepository>) -> Self {
        Self {
            stock: StockService::new(repo),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStockRepository::new()))
    }

    pub fn stock(&self) -> &SharedStockService {
        &self.stock
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    if !config.use_persistent_store {
        tracing::info!("using in-memory stock store");
        return Ok(AppServices::in_memory());
    }

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")?;

    let repo = PostgresStockRepository::new(pool);
    repo.ensure_schema()
        .await
        .context("failed to prepare beers table")?;

    tracing::info!(max_connections = config.db_max_connections, "using Postgres stock store");
    Ok(AppServices::new(Arc::new(repo)))
}
