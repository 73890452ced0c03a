//! Webhook server configuration.
//!
//! Read from the process environment after loading an optional `.env` file.
//!
//! # Environment Variables
//!
//! - `CRYPTO_PAY_TOKEN` - API token of the app (required)
//! - `CRYPTO_PAY_NETWORK` - `mainnet`, `testnet` or a base URL (default: `mainnet`)
//! - `CRYPTO_PAY_TIMEOUT_SECS` - Timeout for outbound API calls (default: none)
//! - `HOST` - Bind address (default: `0.0.0.0`)
//! - `PORT` - Bind port (default: `8080`)
//! - `WEBHOOK_PATH` - Route that receives updates (default: `/webhook`)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use cryptopay::ClientConfig;

use crate::error::ServerError;

/// Environment variable overriding the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the webhook route.
pub const PATH_ENV: &str = "WEBHOOK_PATH";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PATH: &str = "/webhook";

/// Top-level webhook server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub host: IpAddr,

    /// Server port.
    pub port: u16,

    /// Route the Crypto Pay app is configured to call.
    pub webhook_path: String,

    /// API client settings; the token also keys webhook signatures.
    pub client: ClientConfig,
}

impl ServerConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if a variable is missing or invalid.
    pub fn load() -> Result<Self, ServerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if a variable is missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = ClientConfig::from_lookup(&lookup)?;

        let host = match lookup(HOST_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ServerError::InvalidVar { name: HOST_ENV, value: raw })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ServerError::InvalidVar { name: PORT_ENV, value: raw })?,
            None => DEFAULT_PORT,
        };

        let webhook_path = lookup(PATH_ENV).unwrap_or_else(|| DEFAULT_PATH.to_owned());
        if !webhook_path.starts_with('/') {
            return Err(ServerError::InvalidVar {
                name: PATH_ENV,
                value: webhook_path,
            });
        }

        Ok(Self {
            host,
            port,
            webhook_path,
            client,
        })
    }

    /// Returns the socket address to bind.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
