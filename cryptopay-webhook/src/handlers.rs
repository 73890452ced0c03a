//! Axum route handlers for the webhook server.
//!
//! `POST {webhook_path}` hands the raw body and headers to
//! [`cryptopay_http::server::handle_webhook`]; `GET /health` reports liveness
//! and how many paid invoices were seen since start.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use cryptopay::webhook::HandlerError;
use cryptopay::{Update, WebhookDispatcher};
use cryptopay_http::CryptoPay;
use cryptopay_http::server::handle_webhook;

/// Application context handed to every update handler.
pub type AppContext = Arc<App>;

/// Shared application state.
#[derive(Debug)]
pub struct App {
    /// API client, for handlers that need to call back into Crypto Pay.
    pub client: CryptoPay,
    paid_invoices: AtomicU64,
}

impl App {
    /// Creates the application context.
    #[must_use]
    pub const fn new(client: CryptoPay) -> Self {
        Self {
            client,
            paid_invoices: AtomicU64::new(0),
        }
    }

    /// Returns the number of paid invoices seen since start.
    #[must_use]
    pub fn paid_invoices(&self) -> u64 {
        self.paid_invoices.load(Ordering::Relaxed)
    }
}

/// Router state: the dispatcher and the context passed to its handlers.
#[derive(Clone)]
pub struct WebhookState {
    dispatcher: Arc<WebhookDispatcher<AppContext>>,
    context: AppContext,
}

impl WebhookState {
    /// Creates the router state.
    #[must_use]
    pub fn new(dispatcher: WebhookDispatcher<AppContext>, context: AppContext) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            context,
        }
    }
}

/// Logs a paid invoice and counts it.
///
/// # Errors
///
/// Never fails; the signature matches [`cryptopay::UpdateHandler`].
pub async fn log_paid_invoice(update: Update, app: AppContext) -> Result<(), HandlerError> {
    let invoice = &update.payload;
    if invoice.is_paid() {
        app.paid_invoices.fetch_add(1, Ordering::Relaxed);
    }
    tracing::info!(
        update_id = update.update_id,
        update_type = %update.update_type,
        invoice_id = invoice.invoice_id,
        status = %invoice.status,
        amount = %invoice.amount,
        payload = invoice.payload.as_deref().unwrap_or_default(),
        "Invoice update received"
    );
    Ok(())
}

/// `POST {webhook_path}` - Verifies and dispatches one update.
pub async fn post_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    handle_webhook(&state.dispatcher, &headers, &body, Arc::clone(&state.context)).await
}

/// `GET /health` - Liveness probe.
pub async fn health(State(state): State<WebhookState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "network": state.context.client.network().to_string(),
        "handlers": state.dispatcher.len(),
        "paid_invoices": state.context.paid_invoices(),
    }))
}

/// Creates an Axum [`Router`] with the webhook and health endpoints.
pub fn webhook_router(state: WebhookState, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(post_webhook))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cryptopay::Network;
    use cryptopay::webhook::{signature, signing_key};
    use cryptopay_http::server::SIGNATURE_HEADER;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const TOKEN: &str = "1234:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    fn router() -> (Router, AppContext) {
        let client = CryptoPay::new(TOKEN, Network::Testnet).unwrap();
        let dispatcher = client.dispatcher::<AppContext>().with_handler(log_paid_invoice);
        let app = Arc::new(App::new(client));
        let router = webhook_router(WebhookState::new(dispatcher, Arc::clone(&app)), "/webhook");
        (router, app)
    }

    fn paid_update() -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "update_id": 21,
            "update_type": "invoice_paid",
            "request_date": "2024-03-01T10:05:13.000Z",
            "payload": {
                "invoice_id": 528890,
                "hash": "IVbhOGCq2bzE",
                "asset": "USDT",
                "amount": "10.5",
                "status": "paid",
                "created_at": "2024-03-01T10:00:00.000Z",
                "allow_comments": true,
                "allow_anonymous": false,
                "payload": "order-77"
            }
        }))
        .unwrap()
    }

    fn webhook_request(body: Vec<u8>, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::post("/webhook").header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_signed_update_is_acknowledged() {
        let (router, app) = router();
        let body = paid_update();
        let sig = signature(&signing_key(TOKEN), &body).unwrap();

        let response = router.oneshot(webhook_request(body, Some(sig))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Status OK!");
        assert_eq!(app.paid_invoices(), 1);
    }

    #[tokio::test]
    async fn test_unsigned_update_is_rejected() {
        let (router, app) = router();
        let response = router.oneshot(webhook_request(paid_update(), None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(app.paid_invoices(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _app) = router();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["handlers"], 1);
        assert_eq!(json["network"], "https://testnet-pay.crypt.bot");
    }
}
