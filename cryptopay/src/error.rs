//! Error types for Crypto Pay response envelopes.
//!
//! The remote service wraps every answer as `{"ok": true, "result": ...}` or
//! `{"ok": false, "error": {"code": ..., "name": ...}}`. Failures split in
//! three: the service rejected the call ([`ApiError`]), the envelope itself is
//! not what the protocol promises, or the `result` does not fit the record it
//! is decoded into.

use std::fmt;

/// A request explicitly rejected by the Crypto Pay API.
///
/// A single type covers every error code. Match on [`ApiError::code`] or
/// [`ApiError::name`] at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Numeric error code, mirrors the HTTP status the API answered with.
    pub code: i64,
    /// Symbolic error name (e.g. `AMOUNT_INVALID`).
    pub name: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: i64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// Returns `true` if the error carries the given symbolic name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Returns `true` for authorization failures (`401`).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.name)
    }
}

impl std::error::Error for ApiError {}

/// Errors produced while validating or decoding a response envelope.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The API answered with `ok: false`.
    #[error("API error {0}")]
    Api(#[from] ApiError),

    /// The body was JSON but not a well-formed envelope.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// The envelope was valid but `result` did not match the expected record.
    #[error("unexpected result shape: {0}")]
    Schema(#[source] serde_json::Error),
}

impl EnvelopeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}
