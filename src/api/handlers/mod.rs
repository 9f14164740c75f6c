//! REST API handlers

pub mod actions;
pub mod auth;
pub mod entries;
pub mod health;
pub mod reports;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::domain::DomainError;

/// Map a domain error onto the HTTP status and response envelope.
pub(crate) fn domain_error_response(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Auth(_) => StatusCode::FORBIDDEN,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ApiResponse::error(err.to_string())))
}
