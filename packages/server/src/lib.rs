//! HTTP boundary for the pricing service.
//!
//! Thin axum layer over the `pricing` library: request parsing, the
//! per-request wall-clock budget, settings storage, and error-to-status
//! mapping. All pricing decisions live in the library.

pub mod app;
pub mod config;
pub mod routes;

pub use app::{build_app, AppState};
pub use config::Config;
