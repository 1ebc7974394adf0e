//! `Member` object and `addPersonToGroup`.

use async_graphql::{Context, ID, Object, SimpleObject};
use gumma_core::{group::Group, member::Member, store::MembershipStore as _};
use uuid::Uuid;

use crate::{
  error::{ApiError, api_error},
  group::GroupNode,
  person::PersonNode,
  request_instant, store,
};

/// Parse a client-supplied id. A malformed id cannot name an existing row,
/// so it is reported as not found.
fn parse_id(kind: &str, raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{kind} {raw:?}")))
}

// ─── Object ───────────────────────────────────────────────────────────────────

pub struct MemberNode(pub Member);

#[Object(name = "Member")]
impl MemberNode {
  async fn id(&self) -> ID { ID(self.0.member_id.to_string()) }

  async fn group(&self, ctx: &Context<'_>) -> async_graphql::Result<GroupNode> {
    let now = request_instant(ctx);
    let id = self.0.group_id;
    store(ctx)?
      .get_group(id)
      .await
      .map_err(api_error)?
      .map(|r| GroupNode(Group::resolve(r, now)))
      .ok_or_else(|| api_error(ApiError::NotFound(format!("group {id}"))))
  }

  async fn person(&self, ctx: &Context<'_>) -> async_graphql::Result<PersonNode> {
    let id = self.0.person_id;
    store(ctx)?
      .get_person(id)
      .await
      .map_err(api_error)?
      .map(PersonNode)
      .ok_or_else(|| api_error(ApiError::NotFound(format!("person {id}"))))
  }
}

// ─── Mutations ────────────────────────────────────────────────────────────────

#[derive(SimpleObject)]
pub struct AddPersonToGroupResult {
  pub success: bool,
  pub member:  MemberNode,
}

#[derive(Default)]
pub struct MemberMutation;

#[Object]
impl MemberMutation {
  /// Make an existing person a member of an existing group.
  async fn add_person_to_group(
    &self,
    ctx: &Context<'_>,
    person_id: String,
    group_id: String,
  ) -> async_graphql::Result<Option<AddPersonToGroupResult>> {
    let person_id = parse_id("person", &person_id).map_err(api_error)?;
    let group_id = parse_id("group", &group_id).map_err(api_error)?;

    let member = store(ctx)?
      .add_member(person_id, group_id)
      .await
      .map_err(api_error)?;
    tracing::info!(
      member_id = %member.member_id,
      %person_id,
      %group_id,
      "added person to group"
    );

    Ok(Some(AddPersonToGroupResult { success: true, member: MemberNode(member) }))
  }
}
