//! Shared application state.

use appeald_core::{AppealNotifier, AppealService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Appeal submission and lifecycle operations.
    pub appeal_service: AppealService,
    /// Best-effort new-appeal notification forwarder.
    pub notifier: AppealNotifier,
}
