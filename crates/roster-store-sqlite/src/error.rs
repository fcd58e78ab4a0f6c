//! Error type for `roster-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column could not be turned back into its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("failed to read seed file {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
