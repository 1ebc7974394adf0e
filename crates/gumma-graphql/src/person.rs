//! `Person` object, `person`/`people` queries and `createPerson`.

use async_graphql::{Context, ID, Object, SimpleObject};
use gumma_core::{
  group::Group,
  pagination::{CursorCodec, Page, PageRequest},
  person::Person,
  store::MembershipStore as _,
};

use crate::{
  error::{ApiError, api_error},
  group::GroupNode,
  request_instant, store,
};

/// Cursors handed out by `people`.
pub const PERSON_CURSOR: CursorCodec = CursorCodec::new("person");

// ─── Object ───────────────────────────────────────────────────────────────────

pub struct PersonNode(pub Person);

#[Object(name = "Person")]
impl PersonNode {
  async fn id(&self) -> ID { ID(self.0.person_id.to_string()) }

  async fn cid(&self) -> &str { &self.0.cid }

  /// Groups this person is a member of.
  async fn groups(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GroupNode>> {
    let now = request_instant(ctx);
    let records = store(ctx)?
      .groups_of_person(self.0.person_id)
      .await
      .map_err(api_error)?;
    Ok(
      records
        .into_iter()
        .map(|r| GroupNode(Group::resolve(r, now)))
        .collect(),
    )
  }
}

// ─── Connection ───────────────────────────────────────────────────────────────

#[derive(SimpleObject)]
pub struct PageInfo {
  pub has_next_page:     bool,
  pub has_previous_page: bool,
  pub start_cursor:      Option<String>,
  pub end_cursor:        Option<String>,
}

#[derive(SimpleObject)]
pub struct PersonEdge {
  pub cursor: String,
  pub node:   PersonNode,
}

#[derive(SimpleObject)]
pub struct PersonConnection {
  pub edges:     Vec<PersonEdge>,
  pub page_info: PageInfo,
}

impl From<Page<Person>> for PersonConnection {
  fn from(page: Page<Person>) -> Self {
    let edges: Vec<PersonEdge> = page
      .items
      .into_iter()
      .map(|person| PersonEdge {
        cursor: PERSON_CURSOR.encode(person.person_id),
        node:   PersonNode(person),
      })
      .collect();

    let page_info = PageInfo {
      has_next_page:     page.has_next_page,
      has_previous_page: page.has_previous_page,
      start_cursor:      edges.first().map(|e| e.cursor.clone()),
      end_cursor:        edges.last().map(|e| e.cursor.clone()),
    };

    Self { edges, page_info }
  }
}

// ─── Queries ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct PersonQuery;

#[Object]
impl PersonQuery {
  /// The person with the given correlation id.
  async fn person(
    &self,
    ctx: &Context<'_>,
    cid: String,
  ) -> async_graphql::Result<PersonNode> {
    store(ctx)?
      .find_person_by_cid(&cid)
      .await
      .map_err(api_error)?
      .map(PersonNode)
      .ok_or_else(|| api_error(ApiError::NotFound(format!("person with cid {cid:?}"))))
  }

  /// All people, ordered by id, in pages of `first` (default 20, at most 100).
  async fn people(
    &self,
    ctx: &Context<'_>,
    first: Option<i32>,
    after: Option<String>,
  ) -> async_graphql::Result<PersonConnection> {
    let request = PageRequest::from_args(PERSON_CURSOR, first.map(i64::from), after.as_deref())
      .map_err(api_error)?;
    let page = store(ctx)?.list_people(request).await.map_err(api_error)?;
    Ok(PersonConnection::from(page))
  }
}

// ─── Mutations ────────────────────────────────────────────────────────────────

#[derive(SimpleObject)]
pub struct CreatePersonResult {
  pub success: bool,
  pub person:  PersonNode,
}

#[derive(Default)]
pub struct PersonMutation;

#[Object]
impl PersonMutation {
  async fn create_person(
    &self,
    ctx: &Context<'_>,
    cid: String,
  ) -> async_graphql::Result<Option<CreatePersonResult>> {
    let person = store(ctx)?.create_person(cid).await.map_err(api_error)?;
    tracing::info!(person_id = %person.person_id, cid = %person.cid, "created person");
    Ok(Some(CreatePersonResult { success: true, person: PersonNode(person) }))
  }
}
