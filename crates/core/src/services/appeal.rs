//! Appeal service: submission validation and record lifecycle.

use appeald_common::{AppError, AppResult, IdGenerator};
use appeald_db::{
    entities::ban_appeal,
    repositories::{AppealRepository, AppealStats},
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

pub use appeald_db::entities::ban_appeal::{AppealStatus, BanReason};

/// Default window for recent-appeal queries, in days.
pub const DEFAULT_RECENT_DAYS: i64 = 7;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // pattern is a literal
    Regex::new("^[A-Za-z0-9_]+$").expect("username pattern is valid")
});

/// A candidate appeal as submitted by the player.
///
/// All rules evaluate independently; a failing submission reports every
/// violated field at once.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAppealInput {
    #[validate(
        length(min = 3, max = 16),
        regex(
            path = *USERNAME_RE,
            message = "may only contain letters, numbers, and underscores"
        )
    )]
    pub username: String,

    #[validate(length(min = 2, max = 100))]
    pub discord_id: String,

    #[validate(email)]
    pub email: String,

    pub minecraft_uuid: Option<String>,

    /// Typed category; an out-of-set value is rejected at deserialization.
    pub ban_reason: BanReason,

    #[validate(length(min = 50, max = 2000))]
    pub appeal_reason: String,

    #[validate(length(max = 2000))]
    pub additional_info: Option<String>,
}

/// Request context captured at submission time, not part of the form body.
#[derive(Debug, Clone, Default)]
pub struct SubmitMeta {
    /// Submitting client's User-Agent header.
    pub user_agent: String,
    /// Forwarded address, when the proxy supplies one.
    pub ip_address: Option<String>,
}

/// Input for an admin status update.
pub struct UpdateStatusInput {
    pub id: String,
    pub status: AppealStatus,
    /// Staff response; `None` leaves the stored value untouched.
    pub response: Option<String>,
    /// Handling staff member; `None` leaves the stored value untouched.
    pub handled_by: Option<String>,
}

/// Appeal service for submission and admin lifecycle operations.
#[derive(Clone)]
pub struct AppealService {
    appeal_repo: AppealRepository,
    id_gen: IdGenerator,
}

impl AppealService {
    /// Create a new appeal service.
    #[must_use]
    pub const fn new(appeal_repo: AppealRepository) -> Self {
        Self {
            appeal_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Validate and persist a new appeal.
    ///
    /// Validation failures never reach the store. A stored appeal always
    /// starts out `pending` with `webhook_sent = false`.
    pub async fn submit(
        &self,
        input: SubmitAppealInput,
        meta: SubmitMeta,
    ) -> AppResult<ban_appeal::Model> {
        input.validate()?;

        let now = Utc::now();
        let model = ban_appeal::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username),
            discord_tag: Set(input.discord_id),
            email: Set(input.email),
            minecraft_uuid: Set(input.minecraft_uuid),
            ban_reason: Set(input.ban_reason),
            appeal_reason: Set(input.appeal_reason),
            additional_info: Set(input.additional_info),
            status: Set(AppealStatus::Pending),
            response: Set(None),
            handled_by: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            handled_at: Set(None),
            ip_address: Set(meta.ip_address),
            user_agent: Set(meta.user_agent),
            webhook_sent: Set(false),
        };

        let appeal = self.appeal_repo.create(model).await?;

        tracing::info!(appeal_id = %appeal.id, username = %appeal.username, "Appeal submitted");

        Ok(appeal)
    }

    /// Get all appeals, newest first.
    pub async fn get_all(&self) -> AppResult<Vec<ban_appeal::Model>> {
        self.appeal_repo.find_all().await
    }

    /// Get an appeal by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<ban_appeal::Model> {
        self.appeal_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appeal {id} not found")))
    }

    /// Get appeals by exact username.
    pub async fn get_by_username(&self, username: &str) -> AppResult<Vec<ban_appeal::Model>> {
        self.appeal_repo.find_by_username(username).await
    }

    /// Get appeals by exact email.
    pub async fn get_by_email(&self, email: &str) -> AppResult<Vec<ban_appeal::Model>> {
        self.appeal_repo.find_by_email(email).await
    }

    /// Get appeals by status.
    pub async fn get_by_status(&self, status: AppealStatus) -> AppResult<Vec<ban_appeal::Model>> {
        self.appeal_repo.find_by_status(status).await
    }

    /// Get appeals from the last `days` days (default 7).
    pub async fn get_recent(&self, days: Option<i64>) -> AppResult<Vec<ban_appeal::Model>> {
        self.appeal_repo
            .find_recent(days.unwrap_or(DEFAULT_RECENT_DAYS))
            .await
    }

    /// Apply an admin status decision to an appeal.
    ///
    /// Stamps `handled_at`; response and staff attribution update only when
    /// provided.
    pub async fn update_status(&self, input: UpdateStatusInput) -> AppResult<ban_appeal::Model> {
        let appeal = self
            .appeal_repo
            .update_status(&input.id, input.status, input.response, input.handled_by)
            .await?;

        tracing::info!(
            appeal_id = %appeal.id,
            status = appeal.status.as_str(),
            "Appeal status updated"
        );

        Ok(appeal)
    }

    /// Flag an appeal as delivered to the notification webhook.
    pub async fn mark_webhook_sent(&self, id: &str) -> AppResult<()> {
        self.appeal_repo.mark_webhook_sent(id).await
    }

    /// Hard-delete an appeal. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let removed = self.appeal_repo.delete(id).await?;
        if removed {
            tracing::info!(appeal_id = %id, "Appeal deleted");
        }
        Ok(removed)
    }

    /// Aggregate appeal counts by status.
    pub async fn stats(&self) -> AppResult<AppealStats> {
        self.appeal_repo.stats().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn valid_input() -> SubmitAppealInput {
        SubmitAppealInput {
            username: "Player_1".to_string(),
            discord_id: "pl#1234".to_string(),
            email: "p@x.com".to_string(),
            minecraft_uuid: None,
            ban_reason: BanReason::Hacking,
            appeal_reason: "a".repeat(60),
            additional_info: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> AppealService {
        AppealService::new(AppealRepository::new(Arc::new(db)))
    }

    fn empty_mock_service() -> AppealService {
        service_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[test]
    fn test_valid_input_passes_validation() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_username_charset_rejected() {
        let mut input = valid_input();
        input.username = "bad name!".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_username_length_bounds() {
        let mut input = valid_input();
        input.username = "ab".to_string();
        assert!(input.validate().is_err());

        input.username = "a".repeat(17);
        assert!(input.validate().is_err());

        input.username = "abc".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_appeal_reason_length_bounds() {
        let mut input = valid_input();
        input.appeal_reason = "a".repeat(40);
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("appeal_reason"));

        input.appeal_reason = "a".repeat(50);
        assert!(input.validate().is_ok());

        input.appeal_reason = "a".repeat(2001);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut input = valid_input();
        input.email = "not-an-email".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut input = valid_input();
        input.username = "a!".to_string();
        input.appeal_reason = "too short".to_string();
        input.email = "nope".to_string();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("appeal_reason"));
        assert!(fields.contains_key("email"));
    }

    #[tokio::test]
    async fn test_submit_invalid_input_makes_no_store_call() {
        // The mock has no results queued: any store call would error with a
        // mock exhaustion failure rather than a validation error.
        let service = empty_mock_service();

        let mut input = valid_input();
        input.appeal_reason = "a".repeat(40);

        let err = service
            .submit(input, SubmitMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_submit_valid_input_creates_pending_record() {
        let now = Utc::now();
        let stored = ban_appeal::Model {
            id: "01hx5zzz".to_string(),
            username: "Player_1".to_string(),
            discord_tag: "pl#1234".to_string(),
            email: "p@x.com".to_string(),
            minecraft_uuid: None,
            ban_reason: BanReason::Hacking,
            appeal_reason: "a".repeat(60),
            additional_info: None,
            status: AppealStatus::Pending,
            response: None,
            handled_by: None,
            created_at: now.into(),
            updated_at: now.into(),
            handled_at: None,
            ip_address: None,
            user_agent: "test-agent".to_string(),
            webhook_sent: false,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored]])
            .into_connection();
        let service = service_with(db);

        let meta = SubmitMeta {
            user_agent: "test-agent".to_string(),
            ip_address: None,
        };
        let created = service.submit(valid_input(), meta).await.unwrap();

        assert_eq!(created.status, AppealStatus::Pending);
        assert!(!created.webhook_sent);
        assert!(!created.id.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_maps_absence_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<ban_appeal::Model>::new()])
            .into_connection();
        let service = service_with(db);

        let err = service.get_by_id("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
