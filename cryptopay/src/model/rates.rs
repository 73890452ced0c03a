use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rate between two currency codes (`getExchangeRates`).
///
/// `source` is an asset or fiat code, `target` a fiat code. The rate is the
/// price of one unit of `source` expressed in `target`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Whether the rate is current. Invalid rates must not be used for pricing.
    pub is_valid: bool,
    /// Source is a cryptocurrency (newer revisions only).
    pub is_crypto: Option<bool>,
    /// Source is a fiat currency (newer revisions only).
    pub is_fiat: Option<bool>,
    /// Source currency code.
    pub source: String,
    /// Target currency code.
    pub target: String,
    /// Units of `target` per one unit of `source`.
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Returns `true` when the rate is flagged valid and strictly positive.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.is_valid && self.rate > Decimal::ZERO
    }

    /// Returns `true` if this rate converts `source` into `target`.
    #[must_use]
    pub fn matches(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

/// A currency supported by the API (`getCurrencies`).
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Native blockchain coin.
    pub is_blockchain: bool,
    /// Stablecoin.
    pub is_stablecoin: bool,
    /// Fiat currency.
    pub is_fiat: bool,
    /// Display name.
    pub name: String,
    /// Currency code.
    pub code: String,
    /// Project website, when known.
    pub url: Option<String>,
    /// Number of decimal places.
    pub decimals: u32,
}

impl Currency {
    /// Returns `true` for cryptocurrencies (native coins and tokens alike).
    #[must_use]
    pub const fn is_crypto(&self) -> bool {
        !self.is_fiat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_from_older_revision() {
        let rate: ExchangeRate = serde_json::from_str(
            r#"{"is_valid": true, "source": "TON", "target": "USD", "rate": "2.15"}"#,
        )
        .unwrap();
        assert_eq!(rate.rate, dec!(2.15));
        assert!(rate.is_crypto.is_none());
        assert!(rate.is_usable());
        assert!(rate.matches("TON", "USD"));
        assert!(!rate.matches("USD", "TON"));
    }

    #[test]
    fn test_zero_or_invalid_rate_is_not_usable() {
        let mut rate: ExchangeRate = serde_json::from_str(
            r#"{"is_valid": true, "is_crypto": true, "is_fiat": false,
                "source": "BTC", "target": "EUR", "rate": "0"}"#,
        )
        .unwrap();
        assert!(!rate.is_usable());
        rate.rate = dec!(60000);
        rate.is_valid = false;
        assert!(!rate.is_usable());
    }

    #[test]
    fn test_currency_without_url() {
        let currency: Currency = serde_json::from_str(
            r#"{"is_blockchain": false, "is_stablecoin": false, "is_fiat": true,
                "name": "Euro", "code": "EUR", "decimals": 2}"#,
        )
        .unwrap();
        assert!(currency.url.is_none());
        assert!(!currency.is_crypto());
        let json = serde_json::to_value(&currency).unwrap();
        assert!(json.get("url").is_none());
    }
}
