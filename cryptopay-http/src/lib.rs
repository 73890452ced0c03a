#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP layer for the Crypto Pay API.
//!
//! Builds on the transport-agnostic types of the [`cryptopay`] crate.
//!
//! # Modules
//!
//! - [`constants`] - Header names and remote method names
//! - [`client`] - The [`CryptoPay`] API client (feature: `client`)
//! - [`transport`] - Pooled HTTP session and envelope validation (feature: `client`)
//! - [`error`] - Client error types (feature: `client`)
//! - [`server`] - Webhook responses for `axum` servers (feature: `server`)
//!
//! # Feature Flags
//!
//! - `client` (default) - `reqwest`-based API client
//! - `server` - Webhook handling on top of `axum-core`
//! - `telemetry` - Tracing instrumentation for requests and webhook dispatch

pub mod constants;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod error;
#[cfg(feature = "client")]
pub mod transport;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "client")]
pub use client::CryptoPay;
#[cfg(feature = "client")]
pub use error::ClientError;
