//! Registration and login against a [`CredentialStore`].
//!
//! Argon2 work runs on the blocking pool so it never stalls the async workers.

use std::sync::OnceLock;

use tasktrack_core::error::CoreError;
use tasktrack_core::types::DbId;
use tasktrack_db::models::user::CreateUser;
use tasktrack_db::{CredentialStore, StoreError};

use super::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};

/// The one message returned for every failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Register `username` with a freshly hashed `password`, returning the new id.
///
/// Fails with [`CoreError::Conflict`] when the username is already taken,
/// including when a concurrent registration wins the race.
pub async fn register<S>(store: &S, username: &str, password: &str) -> AppResult<DbId>
where
    S: CredentialStore + ?Sized,
{
    if store.find_user_by_username(username).await?.is_some() {
        return Err(user_exists());
    }

    let password_hash = hash_blocking(password.to_owned()).await?;

    let user = store
        .create_user(CreateUser {
            username: username.to_owned(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => user_exists(),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(user.id)
}

/// Check `username`/`password`, returning the user's id on success.
///
/// Unknown users and wrong passwords fail identically. An unknown user still
/// pays for one hash verification against a throwaway hash.
pub async fn login<S>(store: &S, username: &str, password: &str) -> AppResult<DbId>
where
    S: CredentialStore + ?Sized,
{
    let user = store.find_user_by_username(username).await?;

    let Some(user) = user else {
        if let Some(dummy) = dummy_hash() {
            // Result is irrelevant; this only equalises timing.
            let _ = verify_blocking(password.to_owned(), dummy.to_owned()).await;
        }
        tracing::debug!("Login failed");
        return Err(invalid_credentials());
    };

    if !verify_blocking(password.to_owned(), user.password_hash.clone()).await? {
        tracing::debug!(user_id = %user.id, "Login failed");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(user.id)
}

fn user_exists() -> AppError {
    AppError::Core(CoreError::Conflict("User already exists".into()))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

/// A valid Argon2id hash of a random-looking string, computed once.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("tasktrack-login-timing-dummy").ok())
        .as_deref()
}

async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn verify_blocking(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}
