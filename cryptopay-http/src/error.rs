//! Error types for the HTTP client.

use cryptopay::{ApiError, EnvelopeError};

/// Errors returned by [`CryptoPay`](crate::client::CryptoPay) methods.
///
/// [`ClientError::Api`], [`ClientError::Parse`] and [`ClientError::Schema`]
/// keep "the service rejected the call" apart from "the service answered
/// with something this crate cannot read".
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response body could not be read.
    #[error("{context}: {source}")]
    Http {
        /// Which call failed.
        context: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response is not JSON or not a Crypto Pay envelope.
    #[error("{context}: malformed response: {reason}")]
    Parse {
        /// Which call failed.
        context: &'static str,
        /// What was wrong with the response.
        reason: String,
    },

    /// The API rejected the request.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The envelope was valid but `result` did not match the expected record.
    #[error("{context}: unexpected result shape: {source}")]
    Schema {
        /// Which call failed.
        context: &'static str,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// No usable exchange rate exists for the requested pair.
    #[error("no usable exchange rate from {asset} to {fiat}")]
    RateNotFound {
        /// Asset code the amount was converted into.
        asset: String,
        /// Fiat code the amount was given in.
        fiat: String,
    },

    /// The API token cannot be sent as an HTTP header.
    #[error("API token is not a valid header value")]
    InvalidHeader(#[source] reqwest::header::InvalidHeaderValue),
}

impl ClientError {
    /// Returns the [`ApiError`] if the service rejected the call.
    #[must_use]
    pub const fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn from_envelope(context: &'static str, err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Api(api) => Self::Api(api),
            EnvelopeError::Malformed(reason) => Self::Parse { context, reason },
            EnvelopeError::Schema(source) => Self::Schema { context, source },
        }
    }
}
