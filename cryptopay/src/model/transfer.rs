use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;
use super::enums::Asset;

/// A completed transfer from the app balance to a user (`transfer`, `getTransfers`).
///
/// The remote API applies a transfer at most once per `spend_id`; retrying
/// with the same `spend_id` returns the original transfer.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique transfer id.
    pub transfer_id: u64,
    /// Idempotency key supplied when the transfer was created.
    pub spend_id: Option<String>,
    /// Telegram id of the recipient.
    #[serde(deserialize_with = "de::id")]
    pub user_id: i64,
    /// Transferred asset.
    pub asset: Asset,
    /// Transferred amount.
    pub amount: Decimal,
    /// Transfer status, `completed` for every transfer the API returns today.
    pub status: String,
    /// Completion time.
    pub completed_at: DateTime<Utc>,
    /// Comment shown to the recipient.
    pub comment: Option<String>,
}

impl Transfer {
    /// Returns `true` if the transfer is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}
