//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and stock service construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: wire types and request validation
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use beerstock_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(router_with_services(config, Arc::new(services)))
}

/// Build the router around already-constructed services.
pub fn router_with_services(config: &AppConfig, services: Arc<services::AppServices>) -> Router {
    let api = routes::router().layer(Extension(services));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(&config.api_prefix, api)
        .fallback(routes::system::not_found)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
