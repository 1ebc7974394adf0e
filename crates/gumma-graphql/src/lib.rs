//! GraphQL API for the gumma groups service.
//!
//! Builds an `async-graphql` schema over a [`SqliteStore`] and exposes it as
//! an axum [`Router`](axum::Router): `POST /graphql` executes operations,
//! `GET /graphql` serves the GraphiQL explorer.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let schema = gumma_graphql::build_schema(Arc::new(store));
//! axum::serve(listener, gumma_graphql::router(schema)).await?;
//! ```

pub mod error;
pub mod group;
pub mod member;
pub mod person;
pub mod router;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, MergedObject, Schema};
use chrono::{DateTime, Utc};

pub use error::ApiError;
pub use gumma_store_sqlite::SqliteStore;
pub use router::router;

// async-graphql resolvers cannot be generic over the store without making
// every object type generic, so the backend is fixed here.
pub type Store = SqliteStore;

pub type GummaSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(person::PersonQuery, group::GroupQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
  person::PersonMutation,
  group::GroupMutation,
  member::MemberMutation,
);

/// Build the schema with `store` available to every resolver.
pub fn build_schema(store: Arc<Store>) -> GummaSchema {
  Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
    .data(store)
    .finish()
}

/// The schema in SDL form, for client code generation.
pub fn sdl() -> String {
  Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
    .finish()
    .sdl()
}

// ─── Request context ──────────────────────────────────────────────────────────

/// The evaluation instant of one request.
///
/// Attached to each incoming request so that every `isActive` value and the
/// `groups(isActive:)` filter agree on what "now" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestInstant(pub DateTime<Utc>);

impl RequestInstant {
  pub fn now() -> Self { Self(Utc::now()) }
}

/// The request's evaluation instant; the wall clock if none was attached.
pub(crate) fn request_instant(ctx: &Context<'_>) -> DateTime<Utc> {
  ctx
    .data_opt::<RequestInstant>()
    .map(|instant| instant.0)
    .unwrap_or_else(Utc::now)
}

pub(crate) fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<Store>> {
  ctx.data::<Arc<Store>>()
}
