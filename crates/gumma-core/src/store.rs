//! The `MembershipStore` trait.
//!
//! Implemented by storage backends (e.g. `gumma-store-sqlite`). The GraphQL
//! layer talks to persistence only through this trait.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  group::{ActivityFilter, GroupRecord, NewGroup},
  member::Member,
  pagination::{Page, PageRequest},
  person::Person,
};

/// Abstraction over a persistence backend for people, groups and members.
///
/// Unique lookups return `Ok(None)` when nothing matches; deciding whether a
/// miss is an error is left to the caller. Each create is a single atomic
/// write; there are no multi-statement transactions.
pub trait MembershipStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// Create and persist a person. Fails if `cid` is already taken.
  fn create_person(
    &self,
    cid: String,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn find_person_by_cid<'a>(
    &'a self,
    cid: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// One page of people ordered by id ascending.
  fn list_people(
    &self,
    request: PageRequest,
  ) -> impl Future<Output = Result<Page<Person>, Self::Error>> + Send + '_;

  // ── Groups ────────────────────────────────────────────────────────────

  /// Persist a validated group. The stored type is always `COMMITTEE`.
  fn create_group(
    &self,
    input: NewGroup,
  ) -> impl Future<Output = Result<GroupRecord, Self::Error>> + Send + '_;

  fn get_group(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<GroupRecord>, Self::Error>> + Send + '_;

  /// All groups matching `filter` as evaluated at `now`.
  fn list_groups(
    &self,
    filter: ActivityFilter,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<GroupRecord>, Self::Error>> + Send + '_;

  /// Groups `person_id` is a member of.
  fn groups_of_person(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<GroupRecord>, Self::Error>> + Send + '_;

  // ── Members ───────────────────────────────────────────────────────────

  /// Link an existing person to an existing group.
  ///
  /// Returns an error if either id does not reference a stored row.
  fn add_member(
    &self,
    person_id: Uuid,
    group_id: Uuid,
  ) -> impl Future<Output = Result<Member, Self::Error>> + Send + '_;

  fn members_of_group(
    &self,
    group_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Member>, Self::Error>> + Send + '_;
}
