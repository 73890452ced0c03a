//! Typed records returned by the Crypto Pay API.
//!
//! Each record mirrors one JSON object of the current API schema. Fields that
//! older or newer revisions omit are `Option`s, unknown fields are ignored and
//! enum-typed fields fall back to raw strings, so schema drift on the remote
//! side degrades gracefully instead of failing decoding.
//!
//! The oldest supported revision is the one that introduced checks, app
//! statistics and `bot_invoice_url` (Crypto Pay API 1.x, 2023).
//!
//! Amounts are [`Decimal`](rust_decimal::Decimal) and accept both JSON strings
//! and numbers; timestamps are UTC [`DateTime`](chrono::DateTime)s.

mod account;
mod check;
pub(crate) mod de;
mod enums;
mod invoice;
mod rates;
mod transfer;
mod update;

pub use account::{AppStats, Balance, Profile};
pub use check::Check;
pub use enums::{Asset, CheckStatus, CurrencyType, Fiat, InvoiceStatus, PaidButton, UpdateType};
pub use invoice::Invoice;
pub use rates::{Currency, ExchangeRate};
pub use transfer::Transfer;
pub use update::Update;
