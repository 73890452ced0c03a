//! Error types for the webhook server.

/// Errors that stop the webhook server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Client configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] cryptopay::ConfigError),

    /// A server variable could not be parsed.
    #[error("invalid value '{value}' for {name}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// The API client could not be created.
    #[error("client error: {0}")]
    Client(#[from] cryptopay_http::ClientError),

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
