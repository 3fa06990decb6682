//! Legacy token diagnostics
//!
//! [SECURITY] Compiled only with the `legacy-tokens` feature and mounted
//! behind bearer authentication. Reports what an unsigned legacy token
//! claims; the answer is never used to authorize anything.

use axum::{Extension, Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{AuthenticatedUser, legacy};

use super::super::types::{ApiResult, ok};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LegacyInspectRequest {
    /// base64 JSON blob, e.g. `eyJ1c2VyX2lkIjo3fQ==`
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyInspectData {
    /// Decodes to a JSON object with a numeric `user_id`
    pub valid: bool,
    /// Claimed user id when it is a whole number in range; unverified
    pub user_id: Option<i64>,
}

/// Inspect a legacy token
///
/// POST /api/v1/legacy/inspect
#[utoipa::path(
    post,
    path = "/api/v1/legacy/inspect",
    request_body = LegacyInspectRequest,
    responses(
        (status = 200, description = "Decoded claim", body = LegacyInspectData, content_type = "application/json"),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Diagnostics"
)]
pub async fn inspect_legacy_token(
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<LegacyInspectRequest>, JsonRejection>,
) -> ApiResult<LegacyInspectData> {
    let Json(req) = body?;
    let valid = legacy::legacy_is_valid(&req.token);
    let user_id = legacy::legacy_user_id(&req.token);
    tracing::warn!(
        caller = user.user_id,
        valid,
        claimed = ?user_id,
        "Legacy token inspected"
    );
    ok(LegacyInspectData { valid, user_id })
}
