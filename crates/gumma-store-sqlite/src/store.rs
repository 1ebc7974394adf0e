//! [`SqliteStore`]: the SQLite implementation of [`MembershipStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use gumma_core::{
  group::{ActivityFilter, GroupRecord, GroupType, NewGroup},
  member::Member,
  pagination::{Page, PageRequest},
  person::Person,
  store::MembershipStore,
};

use crate::{
  encode::{RawGroup, RawMember, RawPerson, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A membership store backed by a single SQLite file.
///
/// Cloning shares the inner reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `groups g` query whose select list is [`RawGroup::COLUMNS`].
  async fn query_groups(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<GroupRecord>> {
    let raws: Vec<RawGroup> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawGroup::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGroup::into_record).collect()
  }
}

/// The extended result code of a failed constraint, if that is what `e` is.
fn constraint_violation(e: &tokio_rusqlite::Error) -> Option<std::ffi::c_int> {
  match e {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, _))
      if err.code == rusqlite::ErrorCode::ConstraintViolation =>
    {
      Some(err.extended_code)
    }
    _ => None,
  }
}

// ─── MembershipStore impl ────────────────────────────────────────────────────

impl MembershipStore for SqliteStore {
  type Error = Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, cid: String) -> Result<Person> {
    let person = Person { person_id: Uuid::new_v4(), cid };

    let id_str  = encode_uuid(person.person_id);
    let cid_str = person.cid.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (person_id, cid) VALUES (?1, ?2)",
          rusqlite::params![id_str, cid_str],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| match constraint_violation(&e) {
        Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) => {
          Error::DuplicateCid(person.cid.clone())
        }
        _ => Error::Database(e),
      })?;

    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT person_id, cid FROM people WHERE person_id = ?1",
            rusqlite::params![id_str],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn find_person_by_cid(&self, cid: &str) -> Result<Option<Person>> {
    let cid_str = cid.to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT person_id, cid FROM people WHERE cid = ?1",
            rusqlite::params![cid_str],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_people(&self, request: PageRequest) -> Result<Page<Person>> {
    let after_str = request.after.map(encode_uuid);
    let fetch     = i64::try_from(request.fetch_limit()).unwrap_or(i64::MAX);

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM people
           WHERE ?1 IS NULL OR person_id > ?1
           ORDER BY person_id ASC
           LIMIT ?2",
          RawPerson::COLUMNS,
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![after_str, fetch], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let people = raws
      .into_iter()
      .map(RawPerson::into_person)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page::from_overfetch(people, &request))
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  async fn create_group(&self, input: NewGroup) -> Result<GroupRecord> {
    let record = GroupRecord {
      group_id:     Uuid::new_v4(),
      group_type:   GroupType::Committee,
      name:         input.name,
      active_start: input.active_start,
      active_end:   input.active_end,
    };

    let id_str    = encode_uuid(record.group_id);
    let type_str  = record.group_type.as_str();
    let name      = record.name.clone();
    let start_str = encode_dt(record.active_start);
    let end_str   = encode_dt(record.active_end);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO groups (group_id, group_type, name, active_start, active_end)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, type_str, name, start_str, end_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn get_group(&self, id: Uuid) -> Result<Option<GroupRecord>> {
    let sql = format!("SELECT {} FROM groups g WHERE g.group_id = ?1", RawGroup::COLUMNS);
    let mut found = self.query_groups(sql, vec![encode_uuid(id)]).await?;
    Ok(found.pop())
  }

  async fn list_groups(
    &self,
    filter: ActivityFilter,
    now:    DateTime<Utc>,
  ) -> Result<Vec<GroupRecord>> {
    let (where_clause, params) = match filter {
      ActivityFilter::All => ("", vec![]),
      ActivityFilter::Active => (
        "WHERE g.active_start <= ?1 AND g.active_end > ?1",
        vec![encode_dt(now)],
      ),
      ActivityFilter::Inactive => (
        "WHERE NOT (g.active_start <= ?1 AND g.active_end > ?1)",
        vec![encode_dt(now)],
      ),
    };

    let sql = format!(
      "SELECT {} FROM groups g
       {where_clause}
       ORDER BY g.active_start ASC, g.group_id ASC",
      RawGroup::COLUMNS,
    );
    self.query_groups(sql, params).await
  }

  async fn groups_of_person(&self, person_id: Uuid) -> Result<Vec<GroupRecord>> {
    let sql = format!(
      "SELECT DISTINCT {} FROM groups g
       JOIN members m ON m.group_id = g.group_id
       WHERE m.person_id = ?1
       ORDER BY g.active_start ASC, g.group_id ASC",
      RawGroup::COLUMNS,
    );
    self.query_groups(sql, vec![encode_uuid(person_id)]).await
  }

  // ── Members ───────────────────────────────────────────────────────────────

  async fn add_member(&self, person_id: Uuid, group_id: Uuid) -> Result<Member> {
    let member = Member { member_id: Uuid::new_v4(), person_id, group_id };

    let id_str     = encode_uuid(member.member_id);
    let person_str = encode_uuid(person_id);
    let group_str  = encode_uuid(group_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO members (member_id, person_id, group_id) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, person_str, group_str],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| match constraint_violation(&e) {
        Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
          Error::ForeignKey { person_id, group_id }
        }
        _ => Error::Database(e),
      })?;

    Ok(member)
  }

  async fn members_of_group(&self, group_id: Uuid) -> Result<Vec<Member>> {
    let group_str = encode_uuid(group_id);

    let raws: Vec<RawMember> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM members WHERE group_id = ?1 ORDER BY member_id ASC",
          RawMember::COLUMNS,
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![group_str], RawMember::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMember::into_member).collect()
  }
}
