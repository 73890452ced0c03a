//! Crypto Pay webhook receiver.
//!
//! # Usage
//!
//! ```bash
//! CRYPTO_PAY_TOKEN=1234:AAA... cargo run -p cryptopay-webhook --release
//!
//! # Configure logging level
//! RUST_LOG=debug cargo run -p cryptopay-webhook
//! ```
//!
//! See [`cryptopay_webhook::config`] for all environment variables.

use std::sync::Arc;

use cryptopay_http::CryptoPay;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cryptopay_webhook::config::ServerConfig;
use cryptopay_webhook::error::ServerError;
use cryptopay_webhook::handlers::{App, AppContext, WebhookState, log_paid_invoice, webhook_router};
use cryptopay_webhook::shutdown::Shutdown;

#[tokio::main]
async fn main() {
    // Initialize tracing with RUST_LOG env filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Webhook server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::load()?;
    tracing::info!(
        addr = %config.addr(),
        path = %config.webhook_path,
        network = %config.client.network,
        "Loaded configuration"
    );

    let client = CryptoPay::from_config(config.client.clone())?;
    match client.get_profile().await {
        Ok(profile) => tracing::info!(
            app_id = profile.app_id,
            app = %profile.name,
            bot = %profile.payment_processing_bot_username,
            "Authenticated with Crypto Pay"
        ),
        Err(e) => tracing::warn!("Could not verify the API token: {e}"),
    }

    let dispatcher = client.dispatcher::<AppContext>().with_handler(log_paid_invoice);
    let app = Arc::new(App::new(client.clone()));
    let router = webhook_router(WebhookState::new(dispatcher, app), &config.webhook_path)
        .layer(TraceLayer::new_for_http());

    let shutdown = Shutdown::install()?;
    let token = shutdown.token();

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("Webhook server listening on http://{}{}", config.addr(), config.webhook_path);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await?;

    shutdown.wait().await;
    client.close().await;
    tracing::info!("Webhook server shut down gracefully");
    Ok(())
}
