//! HTTP binding for the schema.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/graphql` | GraphQL-over-HTTP JSON body (`query`, `variables`, `operationName`) |
//! | `GET`  | `/graphql` | GraphiQL explorer |

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
  Router,
  extract::State,
  response::{Html, IntoResponse},
  routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{GummaSchema, RequestInstant};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the router serving `schema` at [`GRAPHQL_PATH`].
pub fn router(schema: GummaSchema) -> Router<()> {
  Router::new()
    .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
    .layer(TraceLayer::new_for_http())
    .with_state(schema)
}

/// `POST /graphql`: captures the request's evaluation instant, then executes.
async fn graphql_handler(
  State(schema): State<GummaSchema>,
  req: GraphQLRequest,
) -> GraphQLResponse {
  let request = req.into_inner().data(RequestInstant::now());
  schema.execute(request).await.into()
}

/// `GET /graphql`
async fn graphiql() -> impl IntoResponse {
  Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
