//! HTTP-level constants of the Crypto Pay API.

/// Header carrying the app's API token on every outbound request.
pub const API_TOKEN_HEADER: &str = "Crypto-Pay-API-Token";

/// Header carrying the HMAC signature of an inbound webhook body.
pub const SIGNATURE_HEADER: &str = "Crypto-Pay-Api-Signature";

/// `User-Agent` sent by the client.
pub const USER_AGENT: &str = concat!("cryptopay-rs/", env!("CARGO_PKG_VERSION"));

/// Remote method names, appended to `{network}/api/`.
pub mod methods {
    /// Basic information about the app.
    pub const GET_ME: &str = "getMe";
    /// Balances of the app.
    pub const GET_BALANCE: &str = "getBalance";
    /// Current exchange rates.
    pub const GET_EXCHANGE_RATES: &str = "getExchangeRates";
    /// Supported currencies.
    pub const GET_CURRENCIES: &str = "getCurrencies";
    /// App statistics for a period.
    pub const GET_STATS: &str = "getStats";
    /// Creates an invoice.
    pub const CREATE_INVOICE: &str = "createInvoice";
    /// Lists invoices.
    pub const GET_INVOICES: &str = "getInvoices";
    /// Deletes an invoice.
    pub const DELETE_INVOICE: &str = "deleteInvoice";
    /// Sends coins from the app balance to a user.
    pub const TRANSFER: &str = "transfer";
    /// Lists transfers.
    pub const GET_TRANSFERS: &str = "getTransfers";
    /// Creates a check.
    pub const CREATE_CHECK: &str = "createCheck";
    /// Lists checks.
    pub const GET_CHECKS: &str = "getChecks";
    /// Deletes a check.
    pub const DELETE_CHECK: &str = "deleteCheck";
}
