//! Public appeal submission endpoint.

use appeald_common::AppResult;
use appeald_core::{SubmitAppealInput, SubmitMeta};
use appeald_db::entities::ban_appeal;
use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use serde::Serialize;

use crate::{response::ApiResponse, state::AppState};

/// Appeal response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealResponse {
    pub id: String,
    pub username: String,
    pub discord_tag: String,
    pub email: String,
    pub minecraft_uuid: Option<String>,
    pub ban_reason: String,
    pub appeal_reason: String,
    pub additional_info: Option<String>,
    pub status: String,
    pub response: Option<String>,
    pub handled_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub handled_at: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub webhook_sent: bool,
}

impl From<ban_appeal::Model> for AppealResponse {
    fn from(appeal: ban_appeal::Model) -> Self {
        Self {
            id: appeal.id,
            username: appeal.username,
            discord_tag: appeal.discord_tag,
            email: appeal.email,
            minecraft_uuid: appeal.minecraft_uuid,
            ban_reason: appeal.ban_reason.as_str().to_string(),
            appeal_reason: appeal.appeal_reason,
            additional_info: appeal.additional_info,
            status: appeal.status.as_str().to_string(),
            response: appeal.response,
            handled_by: appeal.handled_by,
            created_at: appeal.created_at.to_rfc3339(),
            updated_at: appeal.updated_at.to_rfc3339(),
            handled_at: appeal.handled_at.map(|t| t.to_rfc3339()),
            ip_address: appeal.ip_address,
            user_agent: appeal.user_agent,
            webhook_sent: appeal.webhook_sent,
        }
    }
}

/// Submit a new ban appeal.
///
/// Validation failures return the per-field breakdown without touching the
/// store. On success the created record is returned immediately; webhook
/// notification happens in the background and never affects the outcome.
async fn submit_appeal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SubmitAppealInput>,
) -> AppResult<ApiResponse<AppealResponse>> {
    let meta = SubmitMeta {
        user_agent: headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        // First hop of the forwarding chain, when a proxy supplies one.
        ip_address: headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string()),
    };

    let appeal = state.appeal_service.submit(input, meta).await?;

    state.notifier.dispatch(appeal.clone());

    Ok(ApiResponse::ok(appeal.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/appeals", post(submit_appeal))
}
