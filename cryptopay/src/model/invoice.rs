use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;
use super::enums::{Asset, CurrencyType, Fiat, InvoiceStatus, PaidButton};

/// An invoice created by the app (`createInvoice`, `getInvoices`, webhooks).
///
/// Fields cover every revision of the schema: crypto- and fiat-priced
/// invoices, the legacy `pay_url`/`fee`/`usd_rate` fields and the swap and
/// fee details added later. Status only moves from `active` to `paid` or
/// `expired`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique invoice id.
    pub invoice_id: u64,
    /// Invoice hash, used in payment links.
    pub hash: String,
    /// Whether the amount is in an asset or in fiat.
    pub currency_type: Option<CurrencyType>,
    /// Asset of the invoice when `currency_type` is crypto.
    pub asset: Option<Asset>,
    /// Fiat currency of the invoice when `currency_type` is fiat.
    pub fiat: Option<Fiat>,
    /// Invoice amount in `asset` or `fiat`.
    pub amount: Decimal,
    /// Asset actually used to pay.
    pub paid_asset: Option<Asset>,
    /// Amount actually paid in `paid_asset`.
    pub paid_amount: Option<Decimal>,
    /// Rate of `paid_asset` to `fiat` at payment time.
    pub paid_fiat_rate: Option<Decimal>,
    /// Assets accepted for fiat-priced invoices.
    pub accepted_assets: Option<Vec<Asset>>,
    /// Asset of the service fee.
    pub fee_asset: Option<Asset>,
    /// Service fee amount in `fee_asset`.
    pub fee_amount: Option<Decimal>,
    /// Legacy fee field.
    pub fee: Option<Decimal>,
    /// Legacy payment link.
    pub pay_url: Option<String>,
    /// Payment link in the bot.
    pub bot_invoice_url: Option<String>,
    /// Payment link in the Mini App.
    pub mini_app_invoice_url: Option<String>,
    /// Payment link in the web app.
    pub web_app_invoice_url: Option<String>,
    /// Description shown to the payer.
    pub description: Option<String>,
    /// Current status.
    pub status: InvoiceStatus,
    /// Asset the payment is swapped into.
    pub swap_to: Option<Asset>,
    /// Whether the swap happened.
    #[serde(default, deserialize_with = "de::option_bool")]
    pub is_swapped: Option<bool>,
    /// Swap operation id.
    pub swapped_uid: Option<String>,
    /// Asset received by the swap.
    pub swapped_to: Option<Asset>,
    /// Swap rate.
    pub swapped_rate: Option<Decimal>,
    /// Amount received by the swap.
    pub swapped_output: Option<Decimal>,
    /// Swap output in USD.
    pub swapped_usd_amount: Option<Decimal>,
    /// USD rate of the swapped asset.
    pub swapped_usd_rate: Option<Decimal>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// USD rate of the paid asset at payment time.
    pub paid_usd_rate: Option<Decimal>,
    /// Legacy USD rate field.
    pub usd_rate: Option<Decimal>,
    /// Payer may leave a comment.
    pub allow_comments: bool,
    /// Payer may pay anonymously.
    pub allow_anonymous: bool,
    /// Expiration time, if set at creation.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Payment time.
    pub paid_at: Option<DateTime<Utc>>,
    /// Whether the invoice was paid anonymously.
    pub paid_anonymously: Option<bool>,
    /// Payer comment.
    pub comment: Option<String>,
    /// Message shown to the payer after payment.
    pub hidden_message: Option<String>,
    /// App-defined payload.
    pub payload: Option<String>,
    /// Button shown after payment.
    pub paid_btn_name: Option<PaidButton>,
    /// URL opened by the paid button.
    pub paid_btn_url: Option<String>,
}

impl Invoice {
    /// Returns `true` once the invoice is paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Returns the link the payer should open, preferring the bot link.
    #[must_use]
    pub fn pay_url(&self) -> Option<&str> {
        self.bot_invoice_url
            .as_deref()
            .or(self.pay_url.as_deref())
            .or(self.mini_app_invoice_url.as_deref())
            .or(self.web_app_invoice_url.as_deref())
    }
}
