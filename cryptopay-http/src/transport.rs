//! Pooled HTTP transport and envelope validation.
//!
//! [`Transport`] owns at most one [`reqwest::Client`] at a time. The client is
//! created on first use, shared by every call in flight and dropped by
//! [`Transport::close`]; the next call after a close builds a fresh one.
//!
//! Every response must be a JSON Crypto Pay envelope. Non-JSON bodies become
//! [`ClientError::Parse`], `ok: false` envelopes become [`ClientError::Api`].
//! Nothing is retried.

use std::fmt::Display;
use std::time::Duration;

use cryptopay::QueryParams;
use cryptopay::proto;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method};
use serde_json::Value;
use tokio::sync::RwLock;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::constants::USER_AGENT;
use crate::error::ClientError;

/// Lazily-pooled HTTP session shared by all API calls of one client.
#[derive(Debug, Default)]
pub struct Transport {
    /// Optional per-request timeout
    timeout: Option<Duration>,
    /// Current session, `None` until first use and after `close`
    session: RwLock<Option<Client>>,
}

impl Transport {
    /// Creates a transport without an open session.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            session: RwLock::new(None),
        }
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the open session, creating one if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub async fn session(&self) -> Result<Client, ClientError> {
        if let Some(client) = self.session.read().await.as_ref() {
            return Ok(client.clone());
        }

        let mut guard = self.session.write().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        #[cfg(feature = "telemetry")]
        tracing::debug!("cryptopay.transport.session_open");

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ClientError::Http {
                context: "Failed to build HTTP client",
                source,
            })?;
        *guard = Some(client.clone());
        Ok(client)
    }

    /// Returns `true` if a session is currently open.
    pub async fn is_open(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Releases the session.
    ///
    /// Returns `true` if a session was open. Closing an unused or already
    /// closed transport does nothing. Requests already in flight keep their
    /// own handle and complete normally.
    pub async fn close(&self) -> bool {
        let released = self.session.write().await.take().is_some();

        #[cfg(feature = "telemetry")]
        if released {
            tracing::debug!("cryptopay.transport.session_closed");
        }

        released
    }

    /// Sends one request and returns the validated envelope.
    ///
    /// `GET` sends `params` as a query string, any other method as a form
    /// body. `context` names the call in errors and traces.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] if the request fails or the body cannot be read
    /// - [`ClientError::Parse`] if the response is not a JSON envelope
    /// - [`ClientError::Api`] if the envelope reports `ok: false`
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "cryptopay.transport.execute",
            skip_all,
            fields(
                http.method = %method,
                cryptopay.method = context,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        params: &QueryParams,
        context: &'static str,
    ) -> Result<Value, ClientError> {
        let result = self.execute_inner(method, url, headers, params, context).await;

        record_result_on_span(&result);

        result
    }

    async fn execute_inner(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        params: &QueryParams,
        context: &'static str,
    ) -> Result<Value, ClientError> {
        let client = self.session().await?;

        let mut req = client.request(method.clone(), url).headers(headers.clone());
        req = if method == Method::GET {
            req.query(params.as_pairs())
        } else {
            req.form(params.as_pairs())
        };
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let http_response = req
            .send()
            .await
            .map_err(|source| ClientError::Http { context, source })?;

        let status = http_response.status();
        let content_type = http_response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if !is_json(&content_type) {
            return Err(ClientError::Parse {
                context,
                reason: format!("expected a JSON body, got `{content_type}` (HTTP {status})"),
            });
        }

        let body = http_response
            .bytes()
            .await
            .map_err(|source| ClientError::Http { context, source })?;
        let envelope: Value = serde_json::from_slice(&body).map_err(|err| ClientError::Parse {
            context,
            reason: format!("invalid JSON (HTTP {status}): {err}"),
        })?;

        proto::validate(envelope).map_err(|err| ClientError::from_envelope(context, err))
    }
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to Crypto Pay failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
