use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use beerstock_core::ItemId;

use crate::app::dto::{self, BeerDto};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::mapping;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_beers).post(create_beer))
        .route("/name/:name", get(get_beer_by_name))
        .route("/:id", get(get_beer).put(update_beer).delete(delete_beer))
        .route("/:id/increment", patch(increment_stock))
        .route("/:id/decrement", patch(decrement_stock))
}

fn parse_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse::<ItemId>()
        .map_err(errors::domain_error_to_response)
}

fn validated_body(
    body: Result<Json<BeerDto>, JsonRejection>,
) -> Result<BeerDto, axum::response::Response> {
    let Json(body) = body.map_err(errors::json_rejection)?;
    body.validate().map_err(errors::domain_error_to_response)?;
    Ok(body)
}

fn item_response(status: StatusCode, item: beerstock_inventory::StockItem) -> axum::response::Response {
    (status, Json(mapping::to_wire(item))).into_response()
}

pub async fn create_beer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<BeerDto>, JsonRejection>,
) -> axum::response::Response {
    let body = match validated_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.stock().create(mapping::to_persisted(body)).await {
        Ok(item) => item_response(StatusCode::CREATED, item),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stock().get_by_id(id).await {
        Ok(item) => item_response(StatusCode::OK, item),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_beer_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.stock().get_by_name(&name).await {
        Ok(item) => item_response(StatusCode::OK, item),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_beers(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.stock().list_all().await {
        Ok(items) => {
            let body: Vec<BeerDto> = items.into_iter().map(mapping::to_wire).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<BeerDto>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let body = match validated_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.stock().update(id, mapping::to_persisted(body)).await {
        Ok(item) => item_response(StatusCode::OK, item),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.stock().delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn increment_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    params: Result<Query<dto::IncrementParams>, QueryRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return errors::query_rejection(e),
    };

    match services.stock().increment(id, params.quantity_to_increment).await {
        Ok(item) => item_response(StatusCode::OK, item),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn decrement_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    params: Result<Query<dto::DecrementParams>, QueryRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return errors::query_rejection(e),
    };

    match services.stock().decrement(id, params.quantity_to_decrement).await {
        Ok(item) => item_response(StatusCode::OK, item),
        Err(e) => errors::service_error_to_response(e),
    }
}
