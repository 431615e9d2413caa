//! API endpoints.

mod admin;
mod appeals;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(appeals::router())
        .nest("/admin/appeals", admin::router())
}
