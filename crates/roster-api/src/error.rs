//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::FieldError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed")]
  Validation(Vec<FieldError>),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    use roster_core::Error as E;
    match e {
      E::Validation(fields) => ApiError::Validation(fields),
      E::DuplicateCountryName(name) => {
        ApiError::Conflict(format!("country {name:?} already exists"))
      }
      E::PersonNotFound(id) => ApiError::NotFound(format!("person {id} not found")),
      E::Store(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Validation(fields) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "validation failed", "fields": fields })),
      )
        .into_response(),
      ApiError::Conflict(m) => {
        (StatusCode::CONFLICT, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
