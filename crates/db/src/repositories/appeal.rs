//! Appeal repository for ban appeal records.

use std::sync::Arc;

use crate::entities::{
    BanAppeal,
    ban_appeal::{self, AppealStatus},
};
use appeald_common::{AppError, AppResult};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, sea_query::Expr,
};
use serde::Serialize;

/// Aggregate appeal counts by status.
///
/// `under_review` rows count toward `total` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppealStats {
    /// All appeals regardless of status.
    pub total: u64,
    /// Appeals awaiting review.
    pub pending: u64,
    /// Appeals granted by staff.
    pub approved: u64,
    /// Appeals rejected by staff.
    pub denied: u64,
}

#[derive(FromQueryResult)]
struct StatusCountRow {
    status: AppealStatus,
    count: i64,
}

/// Appeal repository for database operations.
///
/// Sole mediator between the application and the `ban_appeals` table. Every
/// operation surfaces store failures as [`AppError::Database`] so callers can
/// distinguish "no rows" from "query failed".
#[derive(Clone)]
pub struct AppealRepository {
    db: Arc<DatabaseConnection>,
}

impl AppealRepository {
    /// Create a new appeal repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a new appeal.
    pub async fn create(&self, model: ban_appeal::ActiveModel) -> AppResult<ban_appeal::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all appeals, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<ban_appeal::Model>> {
        BanAppeal::find()
            .order_by_desc(ban_appeal::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an appeal by ID. Absence is `None`, not an error.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<ban_appeal::Model>> {
        BanAppeal::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get appeals submitted under an exact username, newest first.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Vec<ban_appeal::Model>> {
        BanAppeal::find()
            .filter(ban_appeal::Column::Username.eq(username))
            .order_by_desc(ban_appeal::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get appeals submitted under an exact email, newest first.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Vec<ban_appeal::Model>> {
        BanAppeal::find()
            .filter(ban_appeal::Column::Email.eq(email))
            .order_by_desc(ban_appeal::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get appeals with a given status, newest first.
    pub async fn find_by_status(&self, status: AppealStatus) -> AppResult<Vec<ban_appeal::Model>> {
        BanAppeal::find()
            .filter(ban_appeal::Column::Status.eq(status))
            .order_by_desc(ban_appeal::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get appeals created within the last `days` days, newest first.
    pub async fn find_recent(&self, days: i64) -> AppResult<Vec<ban_appeal::Model>> {
        let cutoff = Utc::now() - Duration::days(days);

        BanAppeal::find()
            .filter(ban_appeal::Column::CreatedAt.gte(cutoff))
            .order_by_desc(ban_appeal::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update the review status of an appeal.
    ///
    /// Always stamps `handled_at` and `updated_at`. `response` and
    /// `handled_by` are partial: when `None`, the stored values are left
    /// untouched.
    pub async fn update_status(
        &self,
        id: &str,
        status: AppealStatus,
        response: Option<String>,
        handled_by: Option<String>,
    ) -> AppResult<ban_appeal::Model> {
        let appeal = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appeal {id} not found")))?;

        let now = Utc::now();
        let mut model: ban_appeal::ActiveModel = appeal.into();
        model.status = Set(status);
        model.handled_at = Set(Some(now.into()));
        model.updated_at = Set(now.into());

        if let Some(text) = response {
            model.response = Set(Some(text));
        }
        if let Some(staff) = handled_by {
            model.handled_by = Set(Some(staff));
        }

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Flag an appeal as delivered to the notification webhook.
    ///
    /// Unconditional set; calling it again (or on a since-deleted row) is a
    /// no-op success.
    pub async fn mark_webhook_sent(&self, id: &str) -> AppResult<()> {
        BanAppeal::update_many()
            .col_expr(ban_appeal::Column::WebhookSent, Expr::value(true))
            .col_expr(ban_appeal::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(ban_appeal::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Hard-delete an appeal. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = BanAppeal::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Aggregate counts by status via a single grouped query.
    pub async fn stats(&self) -> AppResult<AppealStats> {
        let rows = BanAppeal::find()
            .select_only()
            .column(ban_appeal::Column::Status)
            .column_as(ban_appeal::Column::Id.count(), "count")
            .group_by(ban_appeal::Column::Status)
            .into_model::<StatusCountRow>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut stats = AppealStats::default();
        for row in rows {
            let count = u64::try_from(row.count).unwrap_or_default();
            stats.total += count;
            match row.status {
                AppealStatus::Pending => stats.pending = count,
                AppealStatus::Approved => stats.approved = count,
                AppealStatus::Denied => stats.denied = count,
                AppealStatus::UnderReview => {}
            }
        }

        Ok(stats)
    }
}
