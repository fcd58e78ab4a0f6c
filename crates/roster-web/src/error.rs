//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Service(#[from] roster_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    use roster_core::Error as E;
    match self {
      // Missing people are not an error page; go back to the listing.
      Error::Service(E::PersonNotFound(_)) => {
        Redirect::to(views::LISTING_PATH).into_response()
      }
      Error::Service(E::Validation(fields)) => {
        let msg = fields
          .iter()
          .map(|f| f.message.as_str())
          .collect::<Vec<_>>()
          .join("\n");
        (StatusCode::BAD_REQUEST, views::error_page(&msg)).into_response()
      }
      Error::Service(E::DuplicateCountryName(name)) => (
        StatusCode::CONFLICT,
        views::error_page(&format!("Country {name:?} already exists")),
      )
        .into_response(),
      Error::Service(E::Store(e)) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          views::error_page("Something went wrong while talking to the database."),
        )
          .into_response()
      }
    }
  }
}
