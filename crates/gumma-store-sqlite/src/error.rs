//! Error type for `gumma-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] gumma_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored value could not be decoded back into its domain type.
  #[error("corrupt {column} value {value:?}: {reason}")]
  Corrupt {
    column: &'static str,
    value:  String,
    reason: String,
  },

  /// A member insert referenced a person or group that does not exist.
  #[error("person {person_id} or group {group_id} does not exist")]
  ForeignKey { person_id: Uuid, group_id: Uuid },

  #[error("a person with cid {0:?} already exists")]
  DuplicateCid(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
