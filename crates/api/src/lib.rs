//! HTTP API layer for appeald.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: public appeal submission and the admin surface
//! - **State**: shared application services
//! - **Responses**: uniform success/error envelopes
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
