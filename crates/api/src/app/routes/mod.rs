use axum::Router;

pub mod beers;
pub mod system;

/// Router for every endpoint under the API prefix.
pub fn router() -> Router {
    Router::new().nest("/beers", beers::router())
}
