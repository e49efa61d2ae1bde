use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use beerstock_core::DomainError;
use beerstock_infra::StockServiceError;

pub fn domain_error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFoundById(_) | DomainError::NotFoundByName(_) => StatusCode::NOT_FOUND,
        DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::InvalidStock { .. }
        | DomainError::InvalidAmount { .. }
        | DomainError::InsufficientStock { .. }
        | DomainError::Validation(_)
        | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    json_error(domain_error_status(&err), err.label(), err.to_string())
}

pub fn service_error_to_response(err: StockServiceError) -> axum::response::Response {
    match err {
        StockServiceError::Domain(e) => domain_error_to_response(e),
        StockServiceError::Store(e) => {
            tracing::error!(error = %e, "stock store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal store error",
            )
        }
    }
}

pub fn json_rejection(err: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.body_text())
}

pub fn query_rejection(err: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
