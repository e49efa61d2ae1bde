use anyhow::Context;

use beerstock_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    beerstock_observability::init_with(config.log_format);

    let app = beerstock_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        prefix = %config.api_prefix,
        persistent = config.use_persistent_store,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
