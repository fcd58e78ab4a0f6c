//! Error types for `roster-core`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A single violated rule on a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl FieldError {
  pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self { field: field.into(), message: message.into() }
  }
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {}", join_fields(.0))]
  Validation(Vec<FieldError>),

  #[error("country name already exists: {0:?}")]
  DuplicateCountryName(String),

  #[error("person not found: {0}")]
  PersonNotFound(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Shorthand for a validation failure on one field.
  pub fn invalid(field: &str, message: &str) -> Self {
    Self::Validation(vec![FieldError::new(field, message)])
  }

  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<validator::ValidationErrors> for Error {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut fields: Vec<FieldError> = errors
      .field_errors()
      .into_iter()
      .flat_map(|(field, errs)| {
        errs.iter().map(move |e| {
          let message = e
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("{field} is invalid"));
          FieldError::new(field.to_string(), message)
        })
      })
      .collect();
    // `field_errors` is a hash map; keep output deterministic.
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    Self::Validation(fields)
  }
}

fn join_fields(fields: &[FieldError]) -> String {
  fields
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
