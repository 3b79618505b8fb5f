//! Handlers for registration, login, and the current session.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::auth::credentials;
use crate::auth::jwt::{issue_token, Claims};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::ValidatedJson;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register` and `POST /login`.
#[derive(Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create an account. 400 `CONFLICT` if the username is taken.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> AppResult<Json<SuccessResponse>> {
    credentials::register(state.store.as_ref(), &input.username, &input.password).await?;
    Ok(Json(SuccessResponse::OK))
}

/// POST /login
///
/// Exchange credentials for a session token, returned as a bare JSON string.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> AppResult<Json<String>> {
    let user_id =
        credentials::login(state.store.as_ref(), &input.username, &input.password).await?;

    let token = issue_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(Json(token))
}

/// GET /me
///
/// Echo the decoded claims of the caller's token.
pub async fn me(user: AuthUser) -> Json<Claims> {
    Json(user.claims)
}
