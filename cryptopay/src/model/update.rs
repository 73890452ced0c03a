use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::UpdateType;
use super::invoice::Invoice;

/// A webhook notification about a changed invoice.
///
/// Update ids grow monotonically per app; the client does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Update id.
    pub update_id: u64,
    /// Kind of update, `invoice_paid` today.
    pub update_type: UpdateType,
    /// Time the service sent the update.
    pub request_date: DateTime<Utc>,
    /// The invoice the update is about.
    pub payload: Invoice,
}
