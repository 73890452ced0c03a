//! Client configuration for the Crypto Pay API.
//!
//! A client needs an API token (issued by the Crypto Bot app) and a network.
//! Both can be given in code or loaded from the environment.
//!
//! # Environment Variables
//!
//! - `CRYPTO_PAY_TOKEN` — API token (required)
//! - `CRYPTO_PAY_NETWORK` — `mainnet`, `testnet` or a base URL (default: `mainnet`)
//! - `CRYPTO_PAY_TIMEOUT_SECS` — Per-request timeout in seconds (default: none)

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Base URL of the production Crypto Pay API.
pub const MAINNET_URL: &str = "https://pay.crypt.bot";

/// Base URL of the Crypto Pay testnet.
pub const TESTNET_URL: &str = "https://testnet-pay.crypt.bot";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "CRYPTO_PAY_TOKEN";

/// Environment variable selecting the network.
pub const NETWORK_ENV: &str = "CRYPTO_PAY_NETWORK";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "CRYPTO_PAY_TIMEOUT_SECS";

/// The Crypto Pay network a client talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Network {
    /// Production network.
    #[default]
    Mainnet,
    /// Test network with test assets.
    Testnet,
    /// Any other base URL, e.g. a local stub server.
    Custom(String),
}

impl Network {
    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Self::Mainnet => MAINNET_URL,
            Self::Testnet => TESTNET_URL,
            Self::Custom(url) => url.trim_end_matches('/'),
        }
    }

    /// Returns the full URL of an API method, e.g. `https://pay.crypt.bot/api/getMe`.
    #[must_use]
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/api/{method}", self.base_url())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Self::Mainnet),
            "test" | "testnet" => Ok(Self::Testnet),
            _ if trimmed.trim_end_matches('/') == MAINNET_URL => Ok(Self::Mainnet),
            _ if trimmed.trim_end_matches('/') == TESTNET_URL => Ok(Self::Testnet),
            _ if trimmed.starts_with("http://") || trimmed.starts_with("https://") => {
                Ok(Self::Custom(trimmed.trim_end_matches('/').to_owned()))
            }
            _ => Err(ConfigError::InvalidNetwork(s.to_owned())),
        }
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.base_url())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A Crypto Pay API token.
///
/// The token authenticates every request and keys webhook signatures, so its
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

impl From<&str> for ApiToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors raised while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    /// The API token is empty.
    #[error("API token must not be empty")]
    EmptyToken,

    /// The network is neither a known name nor an http(s) URL.
    #[error("invalid network '{0}': expected mainnet, testnet or an http(s) URL")]
    InvalidNetwork(String),

    /// The timeout is not a positive integer number of seconds.
    #[error("invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Configuration for a Crypto Pay client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API token sent as `Crypto-Pay-API-Token`.
    pub token: ApiToken,

    /// Network to talk to (default: mainnet).
    pub network: Network,

    /// Optional per-request timeout. Unset means no client-side timeout.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a mainnet configuration for the given token.
    #[must_use]
    pub fn new(token: impl Into<ApiToken>) -> Self {
        Self {
            token: token.into(),
            network: Network::Mainnet,
            timeout: None,
        }
    }

    /// Sets the network.
    #[must_use]
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token is missing or empty, or if the
    /// network or timeout cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV).ok_or(ConfigError::MissingVar(TOKEN_ENV))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        let mut config = Self::new(token);

        if let Some(network) = lookup(NETWORK_ENV).filter(|v| !v.trim().is_empty()) {
            config.network = network.parse()?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_network_urls() {
        assert_eq!(Network::Mainnet.method_url("getMe"), "https://pay.crypt.bot/api/getMe");
        assert_eq!(
            Network::Testnet.method_url("getInvoices"),
            "https://testnet-pay.crypt.bot/api/getInvoices"
        );
        let custom = Network::Custom("http://127.0.0.1:8080/".into());
        assert_eq!(custom.method_url("getMe"), "http://127.0.0.1:8080/api/getMe");
    }

    #[test]
    fn test_network_parse() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("https://pay.crypt.bot/".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(
            "http://localhost:9000".parse::<Network>().unwrap(),
            Network::Custom("http://localhost:9000".into())
        );
        assert!("staging".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_serde_roundtrip() {
        let json = serde_json::to_string(&Network::Testnet).unwrap();
        assert_eq!(json, "\"https://testnet-pay.crypt.bot\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Network::Testnet);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = ApiToken::new("1234:AAA-secret");
        assert_eq!(format!("{token:?}"), "ApiToken(<redacted>)");
        assert_eq!(token.expose(), "1234:AAA-secret");
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[(TOKEN_ENV, "abc")])).unwrap();
        assert_eq!(config.token.expose(), "abc");
        assert_eq!(config.network, Network::Mainnet);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_from_lookup_all_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            (TOKEN_ENV, " abc "),
            (NETWORK_ENV, "testnet"),
            (TIMEOUT_ENV, "15"),
        ]))
        .unwrap();
        assert_eq!(config.token.expose(), "abc");
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_config_from_lookup_errors() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingVar(TOKEN_ENV))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(TOKEN_ENV, "  ")])),
            Err(ConfigError::EmptyToken)
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(TOKEN_ENV, "t"), (TIMEOUT_ENV, "0")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(TOKEN_ENV, "t"), (NETWORK_ENV, "moon")])),
            Err(ConfigError::InvalidNetwork(_))
        ));
    }
}
