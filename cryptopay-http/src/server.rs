//! Webhook endpoint glue for `axum`-compatible servers.
//!
//! [`handle_webhook`] runs a [`WebhookDispatcher`] on one delivery and turns
//! the outcome into a plain-text response:
//!
//! | Outcome | Status |
//! |---|---|
//! | acknowledged | `200 OK`, body `Status OK!` |
//! | missing or invalid signature | `401 Unauthorized` |
//! | signed body that is not an update | `400 Bad Request` |
//! | a handler failed | `500 Internal Server Error` |
//!
//! The service redelivers updates that are not answered with `200`.

use axum_core::body::Body;
use axum_core::response::Response;
use cryptopay::webhook::Acknowledgement;
use cryptopay::{DispatchError, WebhookDispatcher};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};

pub use crate::constants::SIGNATURE_HEADER;

/// Returns the HTTP status for a dispatch failure.
#[must_use]
pub const fn status_for(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::MissingSignature | DispatchError::InvalidSignature => {
            StatusCode::UNAUTHORIZED
        }
        DispatchError::Schema(_) => StatusCode::BAD_REQUEST,
        DispatchError::Handler { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Verifies and dispatches one webhook delivery.
///
/// `body` must be the raw request body, unparsed.
pub async fn handle_webhook<C: Clone + Send + 'static>(
    dispatcher: &WebhookDispatcher<C>,
    headers: &HeaderMap,
    body: &[u8],
    context: C,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match dispatcher.dispatch(body, signature, context).await {
        Ok(ack) => {
            #[cfg(feature = "telemetry")]
            tracing::info!(update_id = ack.update_id, handlers = ack.handled_by, "webhook acknowledged");
            #[cfg(not(feature = "telemetry"))]
            let _ = ack;
            text_response(StatusCode::OK, Acknowledgement::BODY)
        }
        Err(err) => {
            let status = status_for(&err);
            #[cfg(feature = "telemetry")]
            tracing::warn!(error = %err, status = status.as_u16(), "webhook not acknowledged");
            let reason = status.canonical_reason().unwrap_or("Error");
            text_response(status, reason)
        }
    }
}

fn text_response(status: StatusCode, text: &'static str) -> Response {
    let mut response = Response::new(Body::from(text));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
