//! `Group` object, `groups` query and `createGroup`.

use async_graphql::{Context, InputObject, Object, SimpleObject};
use chrono::{DateTime, SecondsFormat, Utc};
use gumma_core::{
  group::{ActivityFilter, Group},
  store::MembershipStore as _,
  validation::{GroupDraft, validate_new_group},
};

use crate::{error::api_error, member::MemberNode, request_instant, store};

/// ISO 8601 in UTC with millisecond precision, e.g. `2023-08-14T16:50:00.000Z`.
fn iso8601(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Millis, true) }

// ─── Object ───────────────────────────────────────────────────────────────────

pub struct GroupNode(pub Group);

#[Object(name = "Group")]
impl GroupNode {
  async fn id(&self) -> String { self.0.record.group_id.to_string() }

  #[graphql(name = "type")]
  async fn group_type(&self) -> &'static str { self.0.record.group_type.as_str() }

  async fn name(&self) -> Option<&str> { self.0.record.name.as_deref() }

  async fn active_start(&self) -> String { iso8601(self.0.record.active_start) }

  async fn active_end(&self) -> String { iso8601(self.0.record.active_end) }

  /// Whether `activeStart <= now < activeEnd` at the time of the request.
  async fn is_active(&self) -> bool { self.0.is_active }

  async fn members(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<MemberNode>> {
    let members = store(ctx)?
      .members_of_group(self.0.record.group_id)
      .await
      .map_err(api_error)?;
    Ok(members.into_iter().map(MemberNode).collect())
  }
}

// ─── Queries ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct GroupQuery;

#[Object]
impl GroupQuery {
  /// All groups; with `isActive`, only those that are (or are not) active now.
  async fn groups(
    &self,
    ctx: &Context<'_>,
    is_active: Option<bool>,
  ) -> async_graphql::Result<Vec<GroupNode>> {
    let now = request_instant(ctx);
    let records = store(ctx)?
      .list_groups(ActivityFilter::from(is_active), now)
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

// ─── Mutations ────────────────────────────────────────────────────────────────

#[derive(InputObject)]
pub struct CreateGroupInput {
  /// ISO 8601 date-time; defaults to the time of the request.
  pub active_start: Option<String>,
  /// ISO 8601 date-time, strictly after `activeStart`.
  pub active_end:   String,
  pub name:         String,
}

impl From<CreateGroupInput> for GroupDraft {
  fn from(input: CreateGroupInput) -> Self {
    GroupDraft {
      active_start: input.active_start,
      active_end:   input.active_end,
      name:         Some(input.name),
    }
  }
}

#[derive(SimpleObject)]
pub struct CreateGroupResult {
  pub success: bool,
  pub group:   GroupNode,
}

#[derive(Default)]
pub struct GroupMutation;

#[Object]
impl GroupMutation {
  async fn create_group(
    &self,
    ctx: &Context<'_>,
    input: CreateGroupInput,
  ) -> async_graphql::Result<Option<CreateGroupResult>> {
    let now = request_instant(ctx);
    let new_group = validate_new_group(&GroupDraft::from(input), now).map_err(|errors| {
      tracing::debug!(%errors, "rejected createGroup input");
      api_error(errors)
    })?;

    let record = store(ctx)?.create_group(new_group).await.map_err(api_error)?;
    tracing::info!(group_id = %record.group_id, "created group");

    Ok(Some(CreateGroupResult {
      success: true,
      group:   GroupNode(Group::resolve(record, now)),
    }))
  }
}
