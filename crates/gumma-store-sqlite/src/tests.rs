//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gumma_core::{
  group::{ActivityFilter, Group, GroupType, NewGroup},
  pagination::PageRequest,
  store::MembershipStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn window(start_days: i64, end_days: i64) -> NewGroup {
  NewGroup {
    name:         Some(format!("{start_days}..{end_days}")),
    active_start: now() + Duration::days(start_days),
    active_end:   now() + Duration::days(end_days),
  }
}

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_person_by_cid() {
  let s = store().await;

  let person = s.create_person("known-cid".into()).await.unwrap();
  assert_eq!(person.cid, "known-cid");

  let found = s.find_person_by_cid("known-cid").await.unwrap().unwrap();
  assert_eq!(found, person);

  let by_id = s.get_person(person.person_id).await.unwrap().unwrap();
  assert_eq!(by_id.cid, "known-cid");
}

#[tokio::test]
async fn unknown_person_is_none() {
  let s = store().await;
  assert!(s.find_person_by_cid("nobody").await.unwrap().is_none());
  assert!(s.get_person(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_cid_is_rejected() {
  let s = store().await;
  s.create_person("twin".into()).await.unwrap();

  let err = s.create_person("twin".into()).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateCid(ref cid) if cid == "twin"), "{err}");
}

#[tokio::test]
async fn paging_people_visits_each_exactly_once() {
  let s = store().await;
  let mut created = Vec::new();
  for i in 0..7 {
    created.push(s.create_person(format!("cid-{i}")).await.unwrap().person_id);
  }

  let mut seen = Vec::new();
  let mut request = PageRequest { after: None, limit: 3 };
  let mut pages = 0;
  loop {
    let page = s.list_people(request).await.unwrap();
    pages += 1;
    assert!(page.items.len() <= 3);
    assert_eq!(page.has_previous_page, request.after.is_some());
    seen.extend(page.items.iter().map(|p| p.person_id));
    if !page.has_next_page {
      break;
    }
    request.after = page.items.last().map(|p| p.person_id);
  }

  assert_eq!(pages, 3);
  let mut sorted = seen.clone();
  sorted.sort();
  assert_eq!(seen, sorted, "pages must come back in id order");
  created.sort();
  assert_eq!(seen, created);
}

#[tokio::test]
async fn exact_multiple_has_no_trailing_page() {
  let s = store().await;
  for i in 0..4 {
    s.create_person(format!("p{i}")).await.unwrap();
  }
  let first = s.list_people(PageRequest { after: None, limit: 4 }).await.unwrap();
  assert_eq!(first.items.len(), 4);
  assert!(!first.has_next_page);
}

// ─── Groups ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_group_is_committee() {
  let s = store().await;
  let record = s.create_group(window(-1, 1)).await.unwrap();
  assert_eq!(record.group_type, GroupType::Committee);

  let fetched = s.get_group(record.group_id).await.unwrap().unwrap();
  assert_eq!(fetched, record);
}

#[tokio::test]
async fn timestamps_survive_storage_exactly() {
  let s = store().await;
  let mut input = window(0, 2);
  input.active_start = input.active_start + Duration::nanoseconds(123_456_789);
  let record = s.create_group(input.clone()).await.unwrap();

  let fetched = s.get_group(record.group_id).await.unwrap().unwrap();
  assert_eq!(fetched.active_start, input.active_start);
  assert_eq!(fetched.active_end, input.active_end);
}

#[tokio::test]
async fn activity_filter_partitions_groups() {
  let s = store().await;
  let past    = s.create_group(window(-10, -5)).await.unwrap();
  let current = s.create_group(window(-1, 1)).await.unwrap();
  let future  = s.create_group(window(5, 10)).await.unwrap();
  // Starts exactly now: active. Ends exactly now: not active.
  let starts_now = s.create_group(window(0, 1)).await.unwrap();
  let ends_now   = s.create_group(window(-1, 0)).await.unwrap();

  let ids = |groups: Vec<gumma_core::group::GroupRecord>| {
    let mut ids: Vec<_> = groups.into_iter().map(|g| g.group_id).collect();
    ids.sort();
    ids
  };
  let sorted = |mut v: Vec<Uuid>| {
    v.sort();
    v
  };

  let all      = ids(s.list_groups(ActivityFilter::All, now()).await.unwrap());
  let active   = ids(s.list_groups(ActivityFilter::Active, now()).await.unwrap());
  let inactive = ids(s.list_groups(ActivityFilter::Inactive, now()).await.unwrap());

  assert_eq!(all.len(), 5);
  assert_eq!(active, sorted(vec![current.group_id, starts_now.group_id]));
  assert_eq!(
    inactive,
    sorted(vec![past.group_id, future.group_id, ends_now.group_id])
  );

  let mut union = [active.clone(), inactive.clone()].concat();
  union.sort();
  assert_eq!(union, all);
  assert!(active.iter().all(|id| !inactive.contains(id)));
}

#[tokio::test]
async fn sql_filter_agrees_with_post_load_flag() {
  let s = store().await;
  for (a, b) in [(-3, -2), (-1, 1), (0, 1), (-1, 0), (2, 3)] {
    s.create_group(window(a, b)).await.unwrap();
  }

  for record in s.list_groups(ActivityFilter::Active, now()).await.unwrap() {
    assert!(Group::resolve(record, now()).is_active);
  }
  for record in s.list_groups(ActivityFilter::Inactive, now()).await.unwrap() {
    assert!(!Group::resolve(record, now()).is_active);
  }
}

// ─── Members ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_member_links_person_and_group() {
  let s = store().await;
  let person = s.create_person("alice".into()).await.unwrap();
  let group  = s.create_group(window(-1, 1)).await.unwrap();

  let member = s.add_member(person.person_id, group.group_id).await.unwrap();
  assert_eq!(member.person_id, person.person_id);
  assert_eq!(member.group_id, group.group_id);

  assert_eq!(s.members_of_group(group.group_id).await.unwrap(), vec![member]);

  let groups = s.groups_of_person(person.person_id).await.unwrap();
  assert_eq!(groups.len(), 1);
  assert_eq!(groups[0].group_id, group.group_id);
}

#[tokio::test]
async fn add_member_with_missing_person_is_foreign_key_error() {
  let s = store().await;
  let group   = s.create_group(window(-1, 1)).await.unwrap();
  let missing = Uuid::new_v4();

  let err = s.add_member(missing, group.group_id).await.unwrap_err();
  assert!(
    matches!(err, Error::ForeignKey { person_id, .. } if person_id == missing),
    "{err}"
  );
  assert!(s.members_of_group(group.group_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_member_with_missing_group_is_foreign_key_error() {
  let s = store().await;
  let person = s.create_person("bob".into()).await.unwrap();

  let err = s.add_member(person.person_id, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::ForeignKey { .. }), "{err}");
  assert!(s.groups_of_person(person.person_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn person_without_memberships_has_no_groups() {
  let s = store().await;
  let person = s.create_person("loner".into()).await.unwrap();
  s.create_group(window(-1, 1)).await.unwrap();
  assert!(s.groups_of_person(person.person_id).await.unwrap().is_empty());
}
