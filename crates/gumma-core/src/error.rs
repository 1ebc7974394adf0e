//! Error types for `gumma-core`.

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid cursor: {0}")]
  InvalidCursor(String),

  #[error("invalid page size {0}: must be positive")]
  InvalidPageSize(i64),

  #[error("invalid input: {0}")]
  Validation(#[from] ValidationErrors),

  #[error("unknown group type: {0:?}")]
  UnknownGroupType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
