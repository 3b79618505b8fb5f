//! Session token issuing and verification.
//!
//! Tokens are HS256-signed JWTs carrying only [`Claims`]: the user id and an
//! absolute expiry. Nothing is stored server-side, so a token stays valid
//! until it expires.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tasktrack_core::types::DbId;

use crate::config::ConfigError;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's opaque id.
    pub id: String,
    /// Expiration time (UTC Unix seconds).
    pub exp: i64,
}

/// Configuration for token signing and lifetime.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 8).
    pub expiry_hours: i64,
}

/// Default token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 8;

/// Longest configurable token lifetime in hours (one year).
pub const MAX_EXPIRY_HOURS: i64 = 8760;

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_hours", &self.expiry_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Load token configuration through `lookup` (normally `std::env::var`).
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `8`     |
    ///
    /// `JWT_EXPIRY_HOURS` must lie in `1..=MAX_EXPIRY_HOURS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        let expiry_hours = match lookup("JWT_EXPIRY_HOURS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_EXPIRY_HOURS).contains(h))
                .ok_or_else(|| ConfigError::Invalid {
                    name: "JWT_EXPIRY_HOURS",
                    reason: format!("expected an integer in 1..={MAX_EXPIRY_HOURS}, got '{raw}'"),
                })?,
            None => DEFAULT_EXPIRY_HOURS,
        };

        Ok(Self {
            secret,
            expiry_hours,
        })
    }

    /// Token lifetime in seconds.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Issue a token for `user_id`, expiring `expiry_hours` from now.
pub fn issue_token(user_id: DbId, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token_at(user_id, config, chrono::Utc::now().timestamp())
}

/// Issue a token as if the current time were `now` (Unix seconds).
pub fn issue_token_at(
    user_id: DbId,
    config: &JwtConfig,
    now: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        id: user_id.to_string(),
        exp: now + config.expiry_secs(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning its [`Claims`].
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify_token_at(token, config, chrono::Utc::now().timestamp())
}

/// Verify a token against an explicit clock.
///
/// The token is accepted while `now <= exp` and rejected once `now > exp`.
/// There is no leeway.
pub fn verify_token_at(
    token: &str,
    config: &JwtConfig,
    now: i64,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against `now` so the boundary is exact.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if now > token_data.claims.exp {
        return Err(ErrorKind::ExpiredSignature.into());
    }
    Ok(token_data.claims)
}
