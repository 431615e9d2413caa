//! Admin appeal management endpoints.
//!
//! No authentication gate is mounted here; access control is expected to
//! happen in front of the service.

use appeald_common::{AppError, AppResult};
use appeald_core::{AppealStatus, UpdateStatusInput};
use appeald_db::repositories::AppealStats;
use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use super::appeals::AppealResponse;
use crate::{response::ApiResponse, state::AppState};

/// List appeals request. Filters are applied in precedence order
/// status > username > email > recentDays; none set returns everything.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListAppealsRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub recent_days: Option<i64>,
}

/// Show appeal request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowAppealRequest {
    pub appeal_id: String,
}

/// Update appeal status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub appeal_id: String,
    pub status: String,
    pub response: Option<String>,
    pub handled_by: Option<String>,
}

/// Mark webhook sent request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkWebhookSentRequest {
    pub appeal_id: String,
}

/// Delete appeal request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAppealRequest {
    pub appeal_id: String,
}

fn parse_status(value: &str) -> AppResult<AppealStatus> {
    AppealStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid status: {value}")))
}

/// List appeals, optionally filtered.
async fn list_appeals(
    State(state): State<AppState>,
    Json(req): Json<ListAppealsRequest>,
) -> AppResult<ApiResponse<Vec<AppealResponse>>> {
    let appeals = if let Some(status) = req.status.as_deref() {
        state
            .appeal_service
            .get_by_status(parse_status(status)?)
            .await?
    } else if let Some(username) = req.username.as_deref() {
        state.appeal_service.get_by_username(username).await?
    } else if let Some(email) = req.email.as_deref() {
        state.appeal_service.get_by_email(email).await?
    } else if req.recent_days.is_some() {
        state.appeal_service.get_recent(req.recent_days).await?
    } else {
        state.appeal_service.get_all().await?
    };

    let responses: Vec<AppealResponse> = appeals
        .into_iter()
        .map(std::convert::Into::into)
        .collect();

    Ok(ApiResponse::ok(responses))
}

/// Get a single appeal by ID.
async fn show_appeal(
    State(state): State<AppState>,
    Json(req): Json<ShowAppealRequest>,
) -> AppResult<ApiResponse<AppealResponse>> {
    let appeal = state.appeal_service.get_by_id(&req.appeal_id).await?;

    Ok(ApiResponse::ok(appeal.into()))
}

/// Apply a status decision to an appeal.
async fn update_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<AppealResponse>> {
    let appeal = state
        .appeal_service
        .update_status(UpdateStatusInput {
            id: req.appeal_id,
            status: parse_status(&req.status)?,
            response: req.response,
            handled_by: req.handled_by,
        })
        .await?;

    Ok(ApiResponse::ok(appeal.into()))
}

/// Manually flag an appeal as delivered to the webhook.
async fn mark_webhook_sent(
    State(state): State<AppState>,
    Json(req): Json<MarkWebhookSentRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state
        .appeal_service
        .mark_webhook_sent(&req.appeal_id)
        .await?;

    Ok(crate::response::ok())
}

/// Hard-delete an appeal.
async fn delete_appeal(
    State(state): State<AppState>,
    Json(req): Json<DeleteAppealRequest>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let removed = state.appeal_service.delete(&req.appeal_id).await?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "Appeal {} not found",
            req.appeal_id
        )));
    }

    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}

/// Aggregate appeal counts by status.
async fn appeal_stats(State(state): State<AppState>) -> AppResult<ApiResponse<AppealStats>> {
    let stats = state.appeal_service.stats().await?;

    Ok(ApiResponse::ok(stats))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_appeals))
        .route("/show", post(show_appeal))
        .route("/update-status", post(update_status))
        .route("/mark-webhook-sent", post(mark_webhook_sent))
        .route("/delete", post(delete_appeal))
        .route("/stats", post(appeal_stats))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use appeald_db::entities::ban_appeal::{self, BanReason};
    use chrono::Utc;

    #[test]
    fn test_parse_status_accepts_known_values() {
        assert!(parse_status("pending").is_ok());
        assert!(parse_status("under_review").is_ok());
        assert!(matches!(
            parse_status("resolved"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_appeal_response_conversion() {
        let now = Utc::now();
        let appeal = ban_appeal::Model {
            id: "app1".to_string(),
            username: "Player_1".to_string(),
            discord_tag: "pl#1234".to_string(),
            email: "p@x.com".to_string(),
            minecraft_uuid: None,
            ban_reason: BanReason::BanEvasion,
            appeal_reason: "a".repeat(60),
            additional_info: None,
            status: AppealStatus::UnderReview,
            response: Some("looking into it".to_string()),
            handled_by: Some("staff1".to_string()),
            created_at: now.into(),
            updated_at: now.into(),
            handled_at: Some(now.into()),
            ip_address: None,
            user_agent: "test-agent".to_string(),
            webhook_sent: true,
        };

        let response = AppealResponse::from(appeal);
        assert_eq!(response.ban_reason, "ban-evasion");
        assert_eq!(response.status, "under_review");
        assert!(response.handled_at.is_some());
        assert!(response.webhook_sent);
    }
}
