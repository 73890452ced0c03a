use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Asset, CheckStatus};

/// A check: funds any (or a pinned) user can claim through the bot.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Unique check id.
    pub check_id: u64,
    /// Check hash.
    pub hash: String,
    /// Check asset.
    pub asset: Asset,
    /// Check amount.
    pub amount: Decimal,
    /// Link that activates the check in the bot.
    pub bot_check_url: String,
    /// Current status.
    pub status: CheckStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Activation time, present once the check is activated.
    pub activated_at: Option<DateTime<Utc>>,
}

impl Check {
    /// Returns `true` once the check has been claimed.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.status == CheckStatus::Activated
    }
}
