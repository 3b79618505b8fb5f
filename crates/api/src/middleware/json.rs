use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tasktrack_core::error::CoreError;
use validator::Validate;

use crate::error::AppError;

/// JSON request body, deserialized then checked with [`Validate`].
///
/// Malformed JSON, wrong field types, unknown enum values, and validation
/// failures all reject with a `VALIDATION_ERROR` (400).
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| CoreError::Validation(errors.to_string()))?;

        Ok(Self(value))
    }
}
