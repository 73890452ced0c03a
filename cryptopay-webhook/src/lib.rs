//! Standalone receiver for Crypto Pay webhook updates.
//!
//! Hosts one `POST` route that verifies, decodes and dispatches updates with
//! [`cryptopay::WebhookDispatcher`], plus a `/health` probe.
//!
//! # Modules
//!
//! - [`config`] - Server configuration from the environment and `.env`
//! - [`error`] - Startup and serving errors
//! - [`handlers`] - Axum route handlers and router builder
//! - [`shutdown`] - OS signal handling for graceful shutdown

pub mod config;
pub mod error;
pub mod handlers;
pub mod shutdown;

pub use handlers::{AppContext, WebhookState, webhook_router};
