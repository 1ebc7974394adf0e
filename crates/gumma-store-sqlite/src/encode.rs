//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings. Timestamps are stored as
//! RFC 3339 UTC with exactly nine fractional digits and a `Z` suffix, which
//! keeps every value the same width so `<`/`>=` on the text column agrees with
//! chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use gumma_core::{
  group::{GroupRecord, GroupType},
  member::Member,
  person::Person,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(column: &'static str, s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Corrupt {
      column,
      value: s.to_owned(),
      reason: e.to_string(),
    })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `people` row.
pub struct RawPerson {
  pub person_id: String,
  pub cid:       String,
}

impl RawPerson {
  pub const COLUMNS: &'static str = "person_id, cid";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { person_id: row.get(0)?, cid: row.get(1)? })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id: decode_uuid(&self.person_id)?,
      cid:       self.cid,
    })
  }
}

/// Raw strings read directly from a `groups` row.
pub struct RawGroup {
  pub group_id:     String,
  pub group_type:   String,
  pub name:         Option<String>,
  pub active_start: String,
  pub active_end:   String,
}

impl RawGroup {
  pub const COLUMNS: &'static str =
    "g.group_id, g.group_type, g.name, g.active_start, g.active_end";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      group_id:     row.get(0)?,
      group_type:   row.get(1)?,
      name:         row.get(2)?,
      active_start: row.get(3)?,
      active_end:   row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<GroupRecord> {
    Ok(GroupRecord {
      group_id:     decode_uuid(&self.group_id)?,
      group_type:   self.group_type.parse::<GroupType>()?,
      name:         self.name,
      active_start: decode_dt("active_start", &self.active_start)?,
      active_end:   decode_dt("active_end", &self.active_end)?,
    })
  }
}

/// Raw strings read directly from a `members` row.
pub struct RawMember {
  pub member_id: String,
  pub person_id: String,
  pub group_id:  String,
}

impl RawMember {
  pub const COLUMNS: &'static str = "member_id, person_id, group_id";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      member_id: row.get(0)?,
      person_id: row.get(1)?,
      group_id:  row.get(2)?,
    })
  }

  pub fn into_member(self) -> Result<Member> {
    Ok(Member {
      member_id: decode_uuid(&self.member_id)?,
      person_id: decode_uuid(&self.person_id)?,
      group_id:  decode_uuid(&self.group_id)?,
    })
  }
}
