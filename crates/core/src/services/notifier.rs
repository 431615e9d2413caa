//! Best-effort webhook notification for new appeals.

use appeald_common::config::WebhookConfig;
use appeald_common::{AppError, AppResult};
use appeald_db::{entities::ban_appeal, repositories::AppealRepository};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Event name carried in the new-appeal payload.
pub const APPEAL_CREATED_EVENT: &str = "appeal.created";

/// Webhook payload describing a newly created appeal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealCreatedPayload<'a> {
    /// Event discriminator.
    pub event: &'static str,
    /// Delivery timestamp (RFC 3339).
    pub timestamp: String,
    /// The created appeal.
    pub data: &'a ban_appeal::Model,
}

/// Best-effort forwarder for new-appeal notifications.
///
/// Unconfigured, it is a no-op. Configured, it makes exactly one delivery
/// attempt per appeal; a delivered appeal gets its `webhook_sent` flag set.
/// Failures are logged and swallowed, never surfaced to the submitter.
#[derive(Clone)]
pub struct AppealNotifier {
    appeal_repo: AppealRepository,
    http_client: Arc<reqwest::Client>,
    endpoint: Option<String>,
}

impl AppealNotifier {
    /// Create a new notifier.
    #[must_use]
    pub fn new(appeal_repo: AppealRepository, config: &WebhookConfig) -> Self {
        #[allow(clippy::expect_used)] // Client build only fails with incompatible TLS settings
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            appeal_repo,
            http_client: Arc::new(http_client),
            endpoint: config.url.clone(),
        }
    }

    /// Dispatch a notification for a saved appeal without blocking.
    ///
    /// The spawned delivery's outcome never affects the submission result.
    pub fn dispatch(&self, appeal: ban_appeal::Model) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.deliver(&appeal).await {
                tracing::warn!(
                    appeal_id = %appeal.id,
                    error = %e,
                    "Appeal notification failed"
                );
            }
        });
    }

    /// Make a single delivery attempt for a saved appeal.
    ///
    /// No endpoint configured is a no-op success. On a 2xx response the
    /// appeal's `webhook_sent` flag is set. No retries.
    pub async fn deliver(&self, appeal: &ban_appeal::Model) -> AppResult<()> {
        let Some(url) = &self.endpoint else {
            return Ok(());
        };

        let payload = AppealCreatedPayload {
            event: APPEAL_CREATED_EVENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            data: appeal,
        };

        let response = self
            .http_client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "webhook endpoint returned {}",
                response.status()
            )));
        }

        self.appeal_repo.mark_webhook_sent(&appeal.id).await?;

        tracing::debug!(appeal_id = %appeal.id, "Appeal notification delivered");
        Ok(())
    }
}
