//! Member: the join record linking one person to one group.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  pub member_id: Uuid,
  pub person_id: Uuid,
  pub group_id:  Uuid,
}
