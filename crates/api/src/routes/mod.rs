pub mod auth;
pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                 register (public)
/// /login                    login (public)
/// /me                       current session claims
///
/// /tasks                    list, create
/// /tasks/{id}               get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(tasks::router())
}
