//! API error type and its GraphQL error extensions.
//!
//! Every resolver failure becomes an entry in the response `errors` array
//! with a machine-readable `extensions.code`.

use async_graphql::ErrorExtensions;
use gumma_core::validation::ValidationErrors;
use thiserror::Error;

/// An error returned by a resolver.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("invalid input: {0}")]
  Validation(ValidationErrors),

  #[error("{0}")]
  ForeignKey(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{0}")]
  InvalidCursor(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn code(&self) -> &'static str {
    match self {
      ApiError::NotFound(_) => "NOT_FOUND",
      ApiError::Validation(_) => "VALIDATION_ERROR",
      ApiError::ForeignKey(_) => "FOREIGN_KEY",
      ApiError::Conflict(_) => "CONFLICT",
      ApiError::BadRequest(_) => "BAD_REQUEST",
      ApiError::InvalidCursor(_) => "INVALID_CURSOR",
      ApiError::Store(_) => "INTERNAL",
    }
  }
}

impl ErrorExtensions for ApiError {
  fn extend(&self) -> async_graphql::Error {
    async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
      ext.set("code", self.code());
      if let ApiError::Validation(errors) = self
        && let Ok(fields) = async_graphql::to_value(errors.fields())
      {
        ext.set("fields", fields);
      }
    })
  }
}

impl From<ValidationErrors> for ApiError {
  fn from(errors: ValidationErrors) -> Self { ApiError::Validation(errors) }
}

impl From<gumma_core::Error> for ApiError {
  fn from(e: gumma_core::Error) -> Self {
    use gumma_core::Error as E;
    match e {
      E::InvalidCursor(_) => ApiError::InvalidCursor(e.to_string()),
      E::InvalidPageSize(_) => ApiError::BadRequest(e.to_string()),
      E::Validation(errors) => ApiError::Validation(errors),
      E::UnknownGroupType(_) => ApiError::Store(Box::new(e)),
    }
  }
}

impl From<gumma_store_sqlite::Error> for ApiError {
  fn from(e: gumma_store_sqlite::Error) -> Self {
    use gumma_store_sqlite::Error as E;
    match e {
      E::ForeignKey { .. } => ApiError::ForeignKey(e.to_string()),
      E::DuplicateCid(_) => ApiError::Conflict(e.to_string()),
      E::Core(core) => ApiError::from(core),
      other => {
        tracing::error!(error = %other, "store failure");
        ApiError::Store(Box::new(other))
      }
    }
  }
}

/// Convert anything that maps onto [`ApiError`] into a GraphQL error with
/// extensions. Use as `.map_err(api_error)?`.
pub(crate) fn api_error(e: impl Into<ApiError>) -> async_graphql::Error {
  let e: ApiError = e.into();
  e.extend()
}
