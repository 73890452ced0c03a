//! Request builders for the multi-argument API methods.
//!
//! Each request renders itself into [`QueryParams`]. Unset optional fields are
//! not sent, so the remote defaults apply (`offset` 0, `count` 100, no
//! expiration, ...). Range limits such as `expires_in` in `1..=2678400` or
//! `count` in `1..=1000` are checked by the service, not here.

use cryptopay::{
    Asset, CheckStatus, CurrencyType, Fiat, IdSelection, InvoiceStatus, PaidButton, QueryParams,
};
use rust_decimal::Decimal;

/// Parameters of `createInvoice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    amount: Decimal,
    currency_type: Option<CurrencyType>,
    asset: Option<Asset>,
    fiat: Option<Fiat>,
    accepted_assets: Option<Vec<Asset>>,
    swap_to: Option<Asset>,
    description: Option<String>,
    hidden_message: Option<String>,
    paid_btn_name: Option<PaidButton>,
    paid_btn_url: Option<String>,
    payload: Option<String>,
    allow_comments: Option<bool>,
    allow_anonymous: Option<bool>,
    expires_in: Option<u32>,
}

impl CreateInvoice {
    fn new(amount: Decimal) -> Self {
        Self {
            amount,
            currency_type: None,
            asset: None,
            fiat: None,
            accepted_assets: None,
            swap_to: None,
            description: None,
            hidden_message: None,
            paid_btn_name: None,
            paid_btn_url: None,
            payload: None,
            allow_comments: None,
            allow_anonymous: None,
            expires_in: None,
        }
    }

    /// An invoice for `amount` of `asset`.
    #[must_use]
    pub fn crypto(asset: impl Into<Asset>, amount: Decimal) -> Self {
        Self {
            asset: Some(asset.into()),
            ..Self::new(amount)
        }
    }

    /// An invoice priced at `amount` of `fiat`, payable in any accepted asset.
    #[must_use]
    pub fn fiat(fiat: impl Into<Fiat>, amount: Decimal) -> Self {
        Self {
            currency_type: Some(CurrencyType::Fiat),
            fiat: Some(fiat.into()),
            ..Self::new(amount)
        }
    }

    /// Restricts the assets a fiat-priced invoice can be paid with.
    #[must_use]
    pub fn with_accepted_assets(mut self, assets: impl IntoIterator<Item = Asset>) -> Self {
        self.accepted_assets = Some(assets.into_iter().collect());
        self
    }

    /// Swaps the received payment into `asset`.
    #[must_use]
    pub fn with_swap_to(mut self, asset: impl Into<Asset>) -> Self {
        self.swap_to = Some(asset.into());
        self
    }

    /// Description shown to the payer, up to 1024 characters.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Message shown to the payer after payment, up to 2048 characters.
    #[must_use]
    pub fn with_hidden_message(mut self, message: impl Into<String>) -> Self {
        self.hidden_message = Some(message.into());
        self
    }

    /// Button shown after payment and the URL it opens.
    #[must_use]
    pub fn with_paid_button(mut self, name: impl Into<PaidButton>, url: impl Into<String>) -> Self {
        self.paid_btn_name = Some(name.into());
        self.paid_btn_url = Some(url.into());
        self
    }

    /// App-defined data attached to the invoice, up to 4 KiB.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Whether the payer may add a comment.
    #[must_use]
    pub const fn with_allow_comments(mut self, allow: bool) -> Self {
        self.allow_comments = Some(allow);
        self
    }

    /// Whether the payer may pay anonymously.
    #[must_use]
    pub const fn with_allow_anonymous(mut self, allow: bool) -> Self {
        self.allow_anonymous = Some(allow);
        self
    }

    /// Seconds until the invoice expires.
    #[must_use]
    pub const fn with_expires_in(mut self, seconds: u32) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// Renders the request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("currency_type", self.currency_type.as_ref())
            .push_opt("asset", self.asset.as_ref())
            .push_opt("fiat", self.fiat.as_ref())
            .push_opt("accepted_assets", self.accepted_assets.as_ref())
            .push("amount", &self.amount)
            .push_opt("swap_to", self.swap_to.as_ref())
            .push_opt("description", self.description.as_ref())
            .push_opt("hidden_message", self.hidden_message.as_ref())
            .push_opt("paid_btn_name", self.paid_btn_name.as_ref())
            .push_opt("paid_btn_url", self.paid_btn_url.as_ref())
            .push_opt("payload", self.payload.as_ref())
            .push_opt("allow_comments", self.allow_comments.as_ref())
            .push_opt("allow_anonymous", self.allow_anonymous.as_ref())
            .push_opt("expires_in", self.expires_in.as_ref());
        params
    }
}

/// Filters of `getInvoices`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    asset: Option<Asset>,
    fiat: Option<Fiat>,
    invoice_ids: Option<IdSelection>,
    status: Option<InvoiceStatus>,
    offset: Option<u32>,
    count: Option<u32>,
}

impl InvoiceQuery {
    /// All invoices, remote paging defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoices with the given id or ids.
    ///
    /// A single id makes `get_invoices` return a single invoice.
    #[must_use]
    pub fn ids(ids: impl Into<IdSelection>) -> Self {
        Self {
            invoice_ids: ids.into().non_empty(),
            ..Self::default()
        }
    }

    /// Only invoices in `asset`.
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<Asset>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Only invoices priced in `fiat`.
    #[must_use]
    pub fn with_fiat(mut self, fiat: impl Into<Fiat>) -> Self {
        self.fiat = Some(fiat.into());
        self
    }

    /// Only invoices with `status`.
    #[must_use]
    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Number of invoices to skip.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Number of invoices to return.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns the requested ids, if any.
    #[must_use]
    pub const fn requested_ids(&self) -> Option<&IdSelection> {
        self.invoice_ids.as_ref()
    }

    /// Renders the request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("asset", self.asset.as_ref())
            .push_opt("fiat", self.fiat.as_ref())
            .push_opt("invoice_ids", self.invoice_ids.as_ref())
            .push_opt("status", self.status.as_ref())
            .push_opt("offset", self.offset.as_ref())
            .push_opt("count", self.count.as_ref());
        params
    }
}

/// Parameters of `transfer`.
///
/// `spend_id` makes the call idempotent: the service applies a transfer at
/// most once per `spend_id`, so a failed call can be retried with the same
/// request. Never generate a new `spend_id` for a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    user_id: i64,
    asset: Asset,
    amount: Decimal,
    spend_id: String,
    comment: Option<String>,
    disable_send_notification: Option<bool>,
}

impl TransferRequest {
    /// Sends `amount` of `asset` to the Telegram user `user_id`.
    #[must_use]
    pub fn new(
        user_id: i64,
        asset: impl Into<Asset>,
        amount: Decimal,
        spend_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            asset: asset.into(),
            amount,
            spend_id: spend_id.into(),
            comment: None,
            disable_send_notification: None,
        }
    }

    /// Comment shown to the recipient, up to 1024 characters.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether to suppress the recipient's notification.
    #[must_use]
    pub const fn with_disable_send_notification(mut self, disable: bool) -> Self {
        self.disable_send_notification = Some(disable);
        self
    }

    /// Returns the idempotency key.
    #[must_use]
    pub fn spend_id(&self) -> &str {
        &self.spend_id
    }

    /// Renders the request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("user_id", &self.user_id)
            .push("asset", &self.asset)
            .push("amount", &self.amount)
            .push("spend_id", &self.spend_id)
            .push_opt("comment", self.comment.as_ref())
            .push_opt("disable_send_notification", self.disable_send_notification.as_ref());
        params
    }
}

/// Filters of `getTransfers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferQuery {
    asset: Option<Asset>,
    transfer_ids: Option<IdSelection>,
    spend_id: Option<String>,
    offset: Option<u32>,
    count: Option<u32>,
}

impl TransferQuery {
    /// All transfers, remote paging defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfers with the given id or ids.
    #[must_use]
    pub fn ids(ids: impl Into<IdSelection>) -> Self {
        Self {
            transfer_ids: ids.into().non_empty(),
            ..Self::default()
        }
    }

    /// Only transfers in `asset`.
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<Asset>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Only the transfer created with `spend_id`.
    #[must_use]
    pub fn with_spend_id(mut self, spend_id: impl Into<String>) -> Self {
        self.spend_id = Some(spend_id.into());
        self
    }

    /// Number of transfers to skip.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Number of transfers to return.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns the requested ids, if any.
    #[must_use]
    pub const fn requested_ids(&self) -> Option<&IdSelection> {
        self.transfer_ids.as_ref()
    }

    /// Renders the request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("asset", self.asset.as_ref())
            .push_opt("transfer_ids", self.transfer_ids.as_ref())
            .push_opt("spend_id", self.spend_id.as_ref())
            .push_opt("offset", self.offset.as_ref())
            .push_opt("count", self.count.as_ref());
        params
    }
}

/// Parameters of `createCheck`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheck {
    asset: Asset,
    amount: Decimal,
    pin_to_user_id: Option<i64>,
    pin_to_username: Option<String>,
}

impl CreateCheck {
    /// A check for `amount` of `asset` that anyone can activate.
    #[must_use]
    pub fn new(asset: impl Into<Asset>, amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            amount,
            pin_to_user_id: None,
            pin_to_username: None,
        }
    }

    /// Only the Telegram user `user_id` can activate the check.
    #[must_use]
    pub const fn with_pin_to_user_id(mut self, user_id: i64) -> Self {
        self.pin_to_user_id = Some(user_id);
        self
    }

    /// Only the Telegram user `username` can activate the check.
    #[must_use]
    pub fn with_pin_to_username(mut self, username: impl Into<String>) -> Self {
        self.pin_to_username = Some(username.into());
        self
    }

    /// Renders the request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("asset", &self.asset)
            .push("amount", &self.amount)
            .push_opt("pin_to_user_id", self.pin_to_user_id.as_ref())
            .push_opt("pin_to_username", self.pin_to_username.as_ref());
        params
    }
}

/// Filters of `getChecks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckQuery {
    asset: Option<Asset>,
    check_ids: Option<IdSelection>,
    status: Option<CheckStatus>,
    offset: Option<u32>,
    count: Option<u32>,
}

impl CheckQuery {
    /// All checks, remote paging defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks with the given id or ids.
    #[must_use]
    pub fn ids(ids: impl Into<IdSelection>) -> Self {
        Self {
            check_ids: ids.into().non_empty(),
            ..Self::default()
        }
    }

    /// Only checks in `asset`.
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<Asset>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Only checks with `status`.
    #[must_use]
    pub fn with_status(mut self, status: CheckStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Number of checks to skip.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Number of checks to return.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns the requested ids, if any.
    #[must_use]
    pub const fn requested_ids(&self) -> Option<&IdSelection> {
        self.check_ids.as_ref()
    }

    /// Renders the request parameters.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("asset", self.asset.as_ref())
            .push_opt("check_ids", self.check_ids.as_ref())
            .push_opt("status", self.status.as_ref())
            .push_opt("offset", self.offset.as_ref())
            .push_opt("count", self.count.as_ref());
        params
    }
}
