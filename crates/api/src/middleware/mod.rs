//! Request extractors enforcing authentication and ownership.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token.
//! - [`ownership::OwnedTask`] -- Loads a task from the `{id}` path segment,
//!   only if it belongs to the authenticated user.
//! - [`ownership::TaskId`] -- The `{id}` path segment parsed as a task id.
//! - [`json::ValidatedJson`] -- JSON body that is deserialized and validated,
//!   rejecting with 400 instead of axum's default 422.
//! - [`query::ValidatedQuery`] -- Query string with JSON-envelope rejections.

pub mod auth;
pub mod json;
pub mod ownership;
pub mod query;
