//! A person: an identity record keyed externally by its `cid`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person known to the service.
///
/// `person_id` is the internal identity; `cid` is the external correlation id
/// supplied by the caller and kept unique by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id: Uuid,
  pub cid:       String,
}
