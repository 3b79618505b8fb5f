//! Shared response bodies for mutating endpoints.

use serde::Serialize;
use tasktrack_core::types::DbId;

/// `{ "success": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}

/// `{ "success": true, "id": ... }` acknowledgement for creates.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: DbId,
}

impl CreatedResponse {
    pub fn new(id: DbId) -> Self {
        Self { success: true, id }
    }
}
