//! Groups and their activity window.
//!
//! A group is stored with an `active_start`/`active_end` pair. Whether it is
//! active is never stored: it is computed after loading, against an
//! evaluation instant supplied by the caller.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

// ─── Group type ──────────────────────────────────────────────────────────────

/// The kind of group. Every group created through the API is a committee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupType {
  #[default]
  Committee,
}

impl GroupType {
  pub fn as_str(self) -> &'static str {
    match self {
      GroupType::Committee => "COMMITTEE",
    }
  }
}

impl fmt::Display for GroupType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for GroupType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "COMMITTEE" => Ok(GroupType::Committee),
      other => Err(Error::UnknownGroupType(other.to_owned())),
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A group exactly as persisted. Carries no derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
  pub group_id:     Uuid,
  pub group_type:   GroupType,
  pub name:         Option<String>,
  pub active_start: DateTime<Utc>,
  pub active_end:   DateTime<Utc>,
}

/// Validated input for [`MembershipStore::create_group`](crate::store::MembershipStore::create_group).
///
/// Only produced by [`validate_new_group`](crate::validation::validate_new_group),
/// so `active_end > active_start` holds for every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
  pub name:         Option<String>,
  pub active_start: DateTime<Utc>,
  pub active_end:   DateTime<Utc>,
}

/// The read model for a group: the stored record plus `is_active` as of the
/// instant it was resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  pub record:    GroupRecord,
  pub is_active: bool,
}

impl Group {
  /// Post-load transform: attach the activity flag to a fetched record.
  pub fn resolve(record: GroupRecord, now: DateTime<Utc>) -> Self {
    let is_active = is_active(record.active_start, record.active_end, now);
    Self { record, is_active }
  }
}

// ─── Activity ────────────────────────────────────────────────────────────────

/// `start <= now < end`.
pub fn is_active(
  start: DateTime<Utc>,
  end: DateTime<Utc>,
  now: DateTime<Utc>,
) -> bool {
  start <= now && now < end
}

/// Which groups a listing should return, relative to one evaluation instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityFilter {
  #[default]
  All,
  /// `active_start <= now AND active_end > now`.
  Active,
  /// `NOT (active_start <= now AND active_end > now)`. Groups that have not
  /// started yet fall in here too.
  Inactive,
}

impl ActivityFilter {
  pub fn matches(self, record: &GroupRecord, now: DateTime<Utc>) -> bool {
    let active = is_active(record.active_start, record.active_end, now);
    match self {
      ActivityFilter::All => true,
      ActivityFilter::Active => active,
      ActivityFilter::Inactive => !active,
    }
  }
}

impl From<Option<bool>> for ActivityFilter {
  fn from(is_active: Option<bool>) -> Self {
    match is_active {
      None => ActivityFilter::All,
      Some(true) => ActivityFilter::Active,
      Some(false) => ActivityFilter::Inactive,
    }
  }
}
