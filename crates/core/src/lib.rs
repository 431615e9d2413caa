//! Core business logic for appeald.

pub mod services;

pub use services::*;
