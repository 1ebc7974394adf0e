//! Core types and trait definitions for the gumma groups service.
//!
//! This crate is deliberately free of HTTP, GraphQL and database
//! dependencies. The store backend and the GraphQL layer both depend on it.

pub mod error;
pub mod group;
pub mod member;
pub mod pagination;
pub mod person;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
