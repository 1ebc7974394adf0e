//! Keyset pagination over records sorted by id.
//!
//! A cursor is an opaque base64 token wrapping `<kind>:<uuid>`. A page is
//! requested as "up to `limit` rows with id greater than `after`"; the store
//! fetches one extra row to learn whether another page follows.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use uuid::Uuid;

use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Encoder/decoder for cursors of one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorCodec {
  kind: &'static str,
}

impl CursorCodec {
  pub const fn new(kind: &'static str) -> Self { Self { kind } }

  pub fn encode(&self, id: Uuid) -> String {
    BASE64.encode(format!("{}:{}", self.kind, id.hyphenated()))
  }

  pub fn decode(&self, cursor: &str) -> Result<Uuid> {
    let bytes = BASE64
      .decode(cursor.as_bytes())
      .map_err(|e| Error::InvalidCursor(e.to_string()))?;
    let text =
      String::from_utf8(bytes).map_err(|e| Error::InvalidCursor(e.to_string()))?;
    let id = text
      .strip_prefix(self.kind)
      .and_then(|rest| rest.strip_prefix(':'))
      .ok_or_else(|| Error::InvalidCursor(format!("not a {} cursor", self.kind)))?;
    Uuid::parse_str(id).map_err(|e| Error::InvalidCursor(e.to_string()))
  }
}

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  /// Exclusive lower bound on the id.
  pub after: Option<Uuid>,
  pub limit: usize,
}

impl PageRequest {
  /// Build a request from client arguments. `first` defaults to
  /// [`DEFAULT_PAGE_SIZE`], is capped at [`MAX_PAGE_SIZE`] and must be at
  /// least 1, since an empty page has no `endCursor` to continue from.
  pub fn from_args(
    codec: CursorCodec,
    first: Option<i64>,
    after: Option<&str>,
  ) -> Result<Self> {
    let limit = match first {
      None => DEFAULT_PAGE_SIZE,
      Some(n) if n < 1 => return Err(Error::InvalidPageSize(n)),
      Some(n) => usize::try_from(n).unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE),
    };
    let after = after.map(|c| codec.decode(c)).transpose()?;
    Ok(Self { after, limit })
  }

  /// Rows to ask the database for.
  pub fn fetch_limit(&self) -> usize { self.limit + 1 }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { after: None, limit: DEFAULT_PAGE_SIZE }
  }
}

// ─── Page ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
  pub items:             Vec<T>,
  pub has_next_page:     bool,
  pub has_previous_page: bool,
}

impl<T> Page<T> {
  /// Trim rows fetched with [`PageRequest::fetch_limit`] down to the page.
  pub fn from_overfetch(mut rows: Vec<T>, request: &PageRequest) -> Self {
    let has_next_page = rows.len() > request.limit;
    rows.truncate(request.limit);
    Self {
      items: rows,
      has_next_page,
      has_previous_page: request.after.is_some(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const PERSON: CursorCodec = CursorCodec::new("person");

  #[test]
  fn cursor_decodes_what_it_encodes() {
    let id = Uuid::new_v4();
    let cursor = PERSON.encode(id);
    assert!(!cursor.contains(&id.to_string()));
    assert_eq!(PERSON.decode(&cursor).unwrap(), id);
  }

  #[test]
  fn cursor_of_another_kind_is_rejected() {
    let cursor = CursorCodec::new("group").encode(Uuid::new_v4());
    assert!(matches!(PERSON.decode(&cursor), Err(Error::InvalidCursor(_))));
  }

  #[test]
  fn garbage_cursor_is_rejected() {
    assert!(matches!(PERSON.decode("%%%"), Err(Error::InvalidCursor(_))));
    let not_uuid = BASE64.encode("person:42");
    assert!(matches!(PERSON.decode(&not_uuid), Err(Error::InvalidCursor(_))));
  }

  #[test]
  fn page_size_defaults_and_caps() {
    assert_eq!(PageRequest::from_args(PERSON, None, None).unwrap().limit, DEFAULT_PAGE_SIZE);
    assert_eq!(PageRequest::from_args(PERSON, Some(5), None).unwrap().limit, 5);
    assert_eq!(
      PageRequest::from_args(PERSON, Some(10_000), None).unwrap().limit,
      MAX_PAGE_SIZE
    );
    assert!(matches!(
      PageRequest::from_args(PERSON, Some(-1), None),
      Err(Error::InvalidPageSize(-1))
    ));
    assert!(matches!(
      PageRequest::from_args(PERSON, Some(0), None),
      Err(Error::InvalidPageSize(0))
    ));
  }

  #[test]
  fn overfetch_sets_has_next() {
    let req = PageRequest { after: None, limit: 2 };
    let page = Page::from_overfetch(vec![1, 2, 3], &req);
    assert_eq!(page.items, [1, 2]);
    assert!(page.has_next_page);
    assert!(!page.has_previous_page);

    let req = PageRequest { after: Some(Uuid::nil()), limit: 2 };
    let page = Page::from_overfetch(vec![1, 2], &req);
    assert!(!page.has_next_page);
    assert!(page.has_previous_page);
  }
}
