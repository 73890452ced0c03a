#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Crypto Pay API.
//!
//! This crate holds everything about the Crypto Pay API that does not need an
//! HTTP client: the typed records returned by the remote service, the
//! `{ok, result | error}` response envelope, query-parameter normalization,
//! exchange-rate math and webhook signature verification with handler
//! dispatch. The `cryptopay-http` crate builds the actual client on top.
//!
//! # Modules
//!
//! - [`config`] - API token, network selection and client configuration
//! - [`error`] - The remote [`ApiError`] and envelope validation errors
//! - [`exchange`] - Rate lookup and fiat-to-asset conversion
//! - [`model`] - Typed records and string enums with raw fallback
//! - [`params`] - Query-string normalization shared by every API method
//! - [`proto`] - Envelope validation and list-result decoding
//! - [`webhook`] - Signature verification and ordered update dispatch
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for webhook dispatch

pub mod config;
pub mod error;
pub mod exchange;
pub mod model;
pub mod params;
pub mod proto;
pub mod webhook;

pub use config::{ApiToken, ClientConfig, ConfigError, Network};
pub use error::{ApiError, EnvelopeError};
pub use model::{
    AppStats, Asset, Balance, Check, CheckStatus, Currency, CurrencyType, ExchangeRate, Fiat,
    Invoice, InvoiceStatus, PaidButton, Profile, Transfer, Update, UpdateType,
};
pub use params::{QueryParams, ToParam};
pub use proto::{IdSelection, Page, Selection};
pub use webhook::{Acknowledgement, DispatchError, UpdateHandler, WebhookDispatcher};
