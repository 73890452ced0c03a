//! Webhook signature verification and update dispatch.
//!
//! Crypto Pay signs every webhook body with HMAC-SHA256. The key is the
//! SHA-256 digest of the app's API token and the signature travels hex-encoded
//! in the `Crypto-Pay-Api-Signature` header. It is computed over the exact
//! bytes of the body, so verification must run before the body is parsed.
//!
//! [`WebhookDispatcher`] verifies a delivery, decodes it into an [`Update`]
//! and runs the registered [`UpdateHandler`]s one after another in
//! registration order.
//!
//! # Handler failures
//!
//! Dispatch fails fast: the first handler that returns an error stops the
//! remaining handlers and no [`Acknowledgement`] is produced. The service
//! redelivers updates that are not acknowledged, so handlers should be
//! idempotent on [`Update::update_id`].

use std::error::Error as StdError;
use std::fmt::{self, Debug};
use std::future::Future;
use std::pin::Pin;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::config::ApiToken;
use crate::model::Update;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded signature header.
pub const SIGNATURE_LEN: usize = 64;

/// Boxed future returned by [`UpdateHandler::handle`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error returned by an update handler.
pub type HandlerError = Box<dyn StdError + Send + Sync>;

/// Derives the webhook signing key from an API token.
#[must_use]
pub fn signing_key(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Computes the lowercase hex signature of `body`.
#[must_use]
pub fn signature(key: &[u8; 32], body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Checks webhook signatures for one API token.
#[derive(Clone)]
pub struct WebhookVerifier {
    key: [u8; 32],
}

impl WebhookVerifier {
    /// Creates a verifier for the given token.
    #[must_use]
    pub fn new(token: &ApiToken) -> Self {
        Self {
            key: signing_key(token.expose()),
        }
    }

    /// Signs `body` the way the remote service does.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> Option<String> {
        signature(&self.key, body)
    }

    /// Returns `true` if `header` is the signature of `body`.
    ///
    /// The header must be exactly the lowercase hex digest; anything else,
    /// including surrounding whitespace or uppercase digits, is rejected.
    /// The digest comparison is constant-time.
    #[must_use]
    pub fn verify(&self, body: &[u8], header: &str) -> bool {
        if !is_lower_hex_digest(header) {
            return false;
        }
        let Ok(expected) = hex::decode(header) else {
            return false;
        };
        let mut mac = match HmacSha256::new_from_slice(&self.key) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}

fn is_lower_hex_digest(header: &str) -> bool {
    header.len() == SIGNATURE_LEN
        && header
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

impl Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// A callback invoked for every verified update.
///
/// `C` is the application context passed to every handler, typically an
/// `Arc` of shared state. This trait is dyn-compatible; closures returning a
/// `Send` future implement it automatically.
pub trait UpdateHandler<C>: Send + Sync {
    /// Handles one update.
    fn handle<'a>(&'a self, update: Update, context: C) -> BoxFuture<'a, Result<(), HandlerError>>;
}

impl<C, F, Fut> UpdateHandler<C> for F
where
    F: Fn(Update, C) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn handle<'a>(&'a self, update: Update, context: C) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(self(update, context))
    }
}

/// Proof that an update was verified and handled by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Id of the handled update.
    pub update_id: u64,
    /// Number of handlers that ran.
    pub handled_by: usize,
}

impl Acknowledgement {
    /// Body the remote service expects on success.
    pub const BODY: &'static str = "Status OK!";
}

/// Reasons a webhook delivery was not acknowledged.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The signature header was absent.
    #[error("missing webhook signature")]
    MissingSignature,
    /// The signature does not match the body.
    #[error("webhook signature does not match the body")]
    InvalidSignature,
    /// The body is signed but is not an update.
    #[error("webhook body is not a valid update: {0}")]
    Schema(#[source] serde_json::Error),
    /// A handler failed; handlers after it did not run.
    #[error("update handler #{index} failed: {source}")]
    Handler {
        /// Position of the failing handler in registration order.
        index: usize,
        /// The handler's error.
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Returns `true` if the delivery was rejected before decoding.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::MissingSignature | Self::InvalidSignature)
    }
}

/// Verifies webhook deliveries and runs handlers in registration order.
///
/// Each dispatcher owns its handler list. Register handlers at startup; the
/// list is not modified while dispatching.
pub struct WebhookDispatcher<C> {
    verifier: WebhookVerifier,
    handlers: Vec<Box<dyn UpdateHandler<C>>>,
}

impl<C> Debug for WebhookDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookDispatcher")
            .field("verifier", &self.verifier)
            .field("handlers", &format!("[{} handler(s)]", self.handlers.len()))
            .finish()
    }
}

impl<C: Clone + Send + 'static> WebhookDispatcher<C> {
    /// Creates a dispatcher without handlers for the given token.
    #[must_use]
    pub fn new(token: &ApiToken) -> Self {
        Self::with_verifier(WebhookVerifier::new(token))
    }

    /// Creates a dispatcher without handlers from an existing verifier.
    #[must_use]
    pub const fn with_verifier(verifier: WebhookVerifier) -> Self {
        Self {
            verifier,
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn register(&mut self, handler: impl UpdateHandler<C> + 'static) -> &mut Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Appends a clone of `handler` and hands the original back.
    pub fn pay_handler<H>(&mut self, handler: H) -> H
    where
        H: UpdateHandler<C> + Clone + 'static,
    {
        self.handlers.push(Box::new(handler.clone()));
        handler
    }

    /// Builder form of [`WebhookDispatcher::register`].
    #[must_use]
    pub fn with_handler(mut self, handler: impl UpdateHandler<C> + 'static) -> Self {
        self.register(handler);
        self
    }

    /// Returns the verifier used for incoming deliveries.
    #[must_use]
    pub const fn verifier(&self) -> &WebhookVerifier {
        &self.verifier
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Verifies and dispatches one webhook delivery.
    ///
    /// `body` must be the raw request body. Nothing is decoded and no
    /// handler runs unless the signature matches.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingSignature`] or
    /// [`DispatchError::InvalidSignature`] for rejected deliveries,
    /// [`DispatchError::Schema`] if the body is not an update, and
    /// [`DispatchError::Handler`] for the first failing handler.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "cryptopay.webhook.dispatch", skip_all, fields(body.len = body.len()))
    )]
    pub async fn dispatch(
        &self,
        body: &[u8],
        signature: Option<&str>,
        context: C,
    ) -> Result<Acknowledgement, DispatchError> {
        let signature = signature.ok_or(DispatchError::MissingSignature)?;
        if !self.verifier.verify(body, signature) {
            #[cfg(feature = "telemetry")]
            tracing::warn!("rejected webhook with invalid signature");
            return Err(DispatchError::InvalidSignature);
        }

        let update: Update = serde_json::from_slice(body).map_err(DispatchError::Schema)?;
        let update_id = update.update_id;

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            update_id,
            update_type = %update.update_type,
            invoice_id = update.payload.invoice_id,
            handlers = self.handlers.len(),
            "dispatching update"
        );

        for (index, handler) in self.handlers.iter().enumerate() {
            handler
                .handle(update.clone(), context.clone())
                .await
                .map_err(|source| DispatchError::Handler { index, source })?;
        }

        Ok(Acknowledgement {
            update_id,
            handled_by: self.handlers.len(),
        })
    }
}
