use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Basic information about the app owning the API token (`getMe`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique app id, always positive.
    pub app_id: u64,
    /// App display name.
    pub name: String,
    /// Username of the bot that processes payments (e.g. `CryptoBot`).
    pub payment_processing_bot_username: String,
}

/// App balance in one currency (`getBalance`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Currency code, e.g. `USDT`.
    pub currency_code: String,
    /// Amount available for transfers and checks.
    pub available: Decimal,
    /// Amount reserved by pending operations.
    pub onhold: Decimal,
}

impl Balance {
    /// Returns available plus on-hold funds.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.available + self.onhold
    }
}

/// Aggregated app statistics for a time window (`getStats`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStats {
    /// Total paid volume, in USD.
    pub volume: Decimal,
    /// Share of created invoices that were paid.
    pub conversion: Decimal,
    /// Number of distinct paying users.
    pub unique_users_count: u64,
    /// Invoices created in the window.
    pub created_invoice_count: u64,
    /// Invoices paid in the window.
    pub paid_invoice_count: u64,
    /// Window start.
    pub start_at: DateTime<Utc>,
    /// Window end, never before `start_at`.
    pub end_at: DateTime<Utc>,
}

impl AppStats {
    /// Length of the statistics window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end_at - self.start_at
    }
}
