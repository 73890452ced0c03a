//! The [`CryptoPay`] API client.
//!
//! One method per remote operation. Every method renders its arguments
//! through [`QueryParams`], sends a single request through the shared
//! [`Transport`] and decodes `result` into a typed record.
//!
//! List methods (`get_invoices`, `get_transfers`, `get_checks`) return a
//! [`Selection`]: [`Selection::Empty`] when nothing matched,
//! [`Selection::Single`] when exactly one id was requested and
//! [`Selection::Many`] otherwise, in server order.
//!
//! ```no_run
//! use cryptopay::{Asset, Network};
//! use cryptopay_http::client::{CreateInvoice, CryptoPay};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> Result<(), cryptopay_http::ClientError> {
//! let client = CryptoPay::new("1234:AAA...", Network::Testnet)?;
//! let invoice = client
//!     .create_invoice(&CreateInvoice::crypto(Asset::Ton, Decimal::ONE).with_description("Coffee"))
//!     .await?;
//! println!("pay at {:?}", invoice.pay_url());
//! client.close().await;
//! # Ok(())
//! # }
//! ```

mod requests;

pub use requests::{CheckQuery, CreateCheck, CreateInvoice, InvoiceQuery, TransferQuery, TransferRequest};

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cryptopay::{
    ApiToken, AppStats, Asset, Balance, Check, ClientConfig, Currency, ExchangeRate, Fiat,
    IdSelection, Invoice, Network, Page, Profile, QueryParams, Selection, Transfer,
    WebhookDispatcher, exchange, proto,
};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::constants::{API_TOKEN_HEADER, methods};
use crate::error::ClientError;
use crate::transport::Transport;

/// Typed async client for the Crypto Pay API.
///
/// Cloning is cheap and clones share one HTTP session. Call
/// [`CryptoPay::close`] to release the session early; the next request
/// reopens it.
#[derive(Clone)]
pub struct CryptoPay {
    inner: Arc<Inner>,
}

struct Inner {
    token: ApiToken,
    network: Network,
    headers: HeaderMap,
    transport: Transport,
}

impl fmt::Debug for CryptoPay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoPay")
            .field("network", &self.inner.network)
            .field("token", &self.inner.token)
            .field("timeout", &self.inner.transport.timeout())
            .finish_non_exhaustive()
    }
}

impl CryptoPay {
    /// Creates a client for `network`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the token contains characters
    /// not allowed in an HTTP header.
    pub fn new(token: impl Into<ApiToken>, network: Network) -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::new(token).with_network(network))
    }

    /// Creates a client from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the token contains characters
    /// not allowed in an HTTP header.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let mut token_value =
            HeaderValue::from_str(config.token.expose()).map_err(ClientError::InvalidHeader)?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_TOKEN_HEADER, token_value);

        Ok(Self {
            inner: Arc::new(Inner {
                token: config.token,
                network: config.network,
                headers,
                transport: Transport::new(config.timeout),
            }),
        })
    }

    /// Returns the network this client talks to.
    #[must_use]
    pub fn network(&self) -> &Network {
        &self.inner.network
    }

    /// Creates a webhook dispatcher that verifies deliveries against this
    /// client's token.
    #[must_use]
    pub fn dispatcher<C: Clone + Send + 'static>(&self) -> WebhookDispatcher<C> {
        WebhookDispatcher::new(&self.inner.token)
    }

    /// Releases the HTTP session. Returns `true` if one was open.
    ///
    /// Closing an unused or already closed client does nothing.
    pub async fn close(&self) -> bool {
        self.inner.transport.close().await
    }

    /// Returns `true` while an HTTP session is open.
    pub async fn is_open(&self) -> bool {
        self.inner.transport.is_open().await
    }

    /// Basic information about the app (`getMe`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_profile(&self) -> Result<Profile, ClientError> {
        self.call(methods::GET_ME, &QueryParams::new()).await
    }

    /// Balances of the app in every currency (`getBalance`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_balances(&self) -> Result<Vec<Balance>, ClientError> {
        self.call(methods::GET_BALANCE, &QueryParams::new()).await
    }

    /// Current exchange rates (`getExchangeRates`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_exchange_rates(&self) -> Result<Vec<ExchangeRate>, ClientError> {
        self.call(methods::GET_EXCHANGE_RATES, &QueryParams::new())
            .await
    }

    /// Supported currencies (`getCurrencies`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.call(methods::GET_CURRENCIES, &QueryParams::new()).await
    }

    /// App statistics between `start_at` and `end_at` (`getStats`).
    ///
    /// The service defaults to the last 24 hours when bounds are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_stats(
        &self,
        start_at: Option<DateTime<Utc>>,
        end_at: Option<DateTime<Utc>>,
    ) -> Result<AppStats, ClientError> {
        let mut params = QueryParams::new();
        params
            .push_opt("start_at", start_at.as_ref())
            .push_opt("end_at", end_at.as_ref());
        self.call(methods::GET_STATS, &params).await
    }

    /// Creates an invoice (`createInvoice`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn create_invoice(&self, request: &CreateInvoice) -> Result<Invoice, ClientError> {
        self.call(methods::CREATE_INVOICE, &request.to_params())
            .await
    }

    /// Lists invoices (`getInvoices`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_invoices(
        &self,
        query: &InvoiceQuery,
    ) -> Result<Selection<Invoice>, ClientError> {
        self.list(methods::GET_INVOICES, &query.to_params(), query.requested_ids())
            .await
    }

    /// Deletes an invoice (`deleteInvoice`). Returns the service's flag.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn delete_invoice(&self, invoice_id: u64) -> Result<bool, ClientError> {
        let params = QueryParams::new().with("invoice_id", &invoice_id);
        self.call(methods::DELETE_INVOICE, &params).await
    }

    /// Sends coins from the app balance to a user (`transfer`).
    ///
    /// Safe to retry with the same request: the service returns the original
    /// transfer for a repeated `spend_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<Transfer, ClientError> {
        self.call(methods::TRANSFER, &request.to_params()).await
    }

    /// Lists transfers (`getTransfers`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Selection<Transfer>, ClientError> {
        self.list(methods::GET_TRANSFERS, &query.to_params(), query.requested_ids())
            .await
    }

    /// Creates a check (`createCheck`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn create_check(&self, request: &CreateCheck) -> Result<Check, ClientError> {
        self.call(methods::CREATE_CHECK, &request.to_params()).await
    }

    /// Lists checks (`getChecks`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn get_checks(&self, query: &CheckQuery) -> Result<Selection<Check>, ClientError> {
        self.list(methods::GET_CHECKS, &query.to_params(), query.requested_ids())
            .await
    }

    /// Deletes a check (`deleteCheck`). Returns the service's flag.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    pub async fn delete_check(&self, check_id: u64) -> Result<bool, ClientError> {
        let params = QueryParams::new().with("check_id", &check_id);
        self.call(methods::DELETE_CHECK, &params).await
    }

    /// Converts `amount` of `fiat` into units of `asset` at the current rate.
    ///
    /// Fetches the exchange rates and divides `amount` by the first usable
    /// `asset` → `fiat` rate.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RateNotFound`] if no usable rate exists for the
    /// pair, or any error of [`CryptoPay::get_exchange_rates`].
    pub async fn convert_fiat(
        &self,
        amount: Decimal,
        asset: &Asset,
        fiat: &Fiat,
    ) -> Result<Decimal, ClientError> {
        let rates = self.get_exchange_rates().await?;
        exchange::find_rate(&rates, asset.as_str(), fiat.as_str())
            .and_then(|rate| exchange::convert(amount, rate))
            .ok_or_else(|| ClientError::RateNotFound {
                asset: asset.to_string(),
                fiat: fiat.to_string(),
            })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &QueryParams,
    ) -> Result<T, ClientError> {
        let url = self.inner.network.method_url(method);
        let envelope = self
            .inner
            .transport
            .execute(Method::GET, &url, &self.inner.headers, params, method)
            .await?;
        proto::decode(&envelope).map_err(|err| ClientError::from_envelope(method, err))
    }

    async fn list<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &QueryParams,
        requested: Option<&IdSelection>,
    ) -> Result<Selection<T>, ClientError> {
        let page: Page<T> = self.call(method, params).await?;
        Ok(Selection::from_page(page, requested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cryptopay::{CheckStatus, InvoiceStatus, PaidButton};
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "1234:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    fn client(server: &MockServer) -> CryptoPay {
        CryptoPay::new(TOKEN, Network::Custom(server.uri())).unwrap()
    }

    fn ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": result}))
    }

    fn invoice(id: u64) -> Value {
        json!({
            "invoice_id": id,
            "hash": format!("IV{id}"),
            "currency_type": "crypto",
            "asset": "TON",
            "amount": "1.5",
            "bot_invoice_url": format!("https://t.me/CryptoBot?start=IV{id}"),
            "status": "active",
            "created_at": "2024-03-01T10:00:00.000Z",
            "allow_comments": true,
            "allow_anonymous": true
        })
    }

    fn transfer(id: u64, spend_id: &str) -> Value {
        json!({
            "transfer_id": id,
            "spend_id": spend_id,
            "user_id": 123,
            "asset": "USDT",
            "amount": "5",
            "status": "completed",
            "completed_at": "2024-03-01T12:00:00.000Z"
        })
    }

    #[tokio::test]
    async fn test_get_profile_sends_token_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMe"))
            .and(header(API_TOKEN_HEADER, TOKEN))
            .respond_with(ok(json!({
                "app_id": 101,
                "name": "Coffee Shop",
                "payment_processing_bot_username": "CryptoTestnetBot"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client(&server).get_profile().await.unwrap();
        assert_eq!(profile.app_id, 101);
        assert_eq!(profile.name, "Coffee Shop");
    }

    #[tokio::test]
    async fn test_create_invoice_renders_booleans_and_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/createInvoice"))
            .and(query_param("currency_type", "fiat"))
            .and(query_param("fiat", "USD"))
            .and(query_param("accepted_assets", "USDT,TON"))
            .and(query_param("amount", "10.5"))
            .and(query_param("paid_btn_name", "viewItem"))
            .and(query_param("allow_comments", "false"))
            .and(query_param("allow_anonymous", "true"))
            .and(query_param_is_missing("description"))
            .respond_with(ok(invoice(1)))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateInvoice::fiat(Fiat::Usd, dec!(10.5))
            .with_accepted_assets([Asset::Usdt, Asset::Ton])
            .with_paid_button(PaidButton::ViewItem, "https://example.com/item")
            .with_allow_comments(false)
            .with_allow_anonymous(true);
        let invoice = client(&server).create_invoice(&request).await.unwrap();
        assert_eq!(invoice.invoice_id, 1);
        assert_eq!(invoice.status, InvoiceStatus::Active);
    }

    #[tokio::test]
    async fn test_get_invoices_scalar_id_unwraps_single() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getInvoices"))
            .and(query_param("invoice_ids", "42"))
            .respond_with(ok(json!({"items": [invoice(42)]})))
            .mount(&server)
            .await;

        let selection = client(&server)
            .get_invoices(&InvoiceQuery::ids(42))
            .await
            .unwrap();
        let invoice = selection.single().unwrap();
        assert_eq!(invoice.invoice_id, 42);
    }

    #[tokio::test]
    async fn test_get_invoices_list_keeps_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getInvoices"))
            .and(query_param("invoice_ids", "42,43"))
            .respond_with(ok(json!({"items": [invoice(43), invoice(42)]})))
            .mount(&server)
            .await;

        let selection = client(&server)
            .get_invoices(&InvoiceQuery::ids(vec![42, 43]))
            .await
            .unwrap();
        let ids: Vec<u64> = selection.into_vec().iter().map(|i| i.invoice_id).collect();
        assert_eq!(ids, [43, 42]);
    }

    #[tokio::test]
    async fn test_get_invoices_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getInvoices"))
            .respond_with(ok(json!({"items": []})))
            .mount(&server)
            .await;

        let client = client(&server);
        let scalar = client.get_invoices(&InvoiceQuery::ids(42)).await.unwrap();
        let list = client
            .get_invoices(&InvoiceQuery::ids(vec![42, 43]))
            .await
            .unwrap();
        assert!(scalar.is_empty());
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_error_envelope_for_every_method() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"ok": false, "error": {"code": 400, "name": "AMOUNT_INVALID"}})),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let errors = vec![
            client.get_profile().await.unwrap_err(),
            client.get_balances().await.unwrap_err(),
            client
                .create_invoice(&CreateInvoice::crypto(Asset::Ton, dec!(-1)))
                .await
                .unwrap_err(),
            client.get_invoices(&InvoiceQuery::new()).await.unwrap_err(),
            client.delete_invoice(1).await.unwrap_err(),
            client
                .transfer(&TransferRequest::new(1, Asset::Ton, dec!(-1), "s"))
                .await
                .unwrap_err(),
            client
                .create_check(&CreateCheck::new(Asset::Ton, dec!(-1)))
                .await
                .unwrap_err(),
            client.get_checks(&CheckQuery::new()).await.unwrap_err(),
            client.delete_check(1).await.unwrap_err(),
        ];
        for err in errors {
            let api = err.api().unwrap_or_else(|| panic!("expected API error, got {err:?}"));
            assert_eq!(api.code, 400);
            assert_eq!(api.name, "AMOUNT_INVALID");
        }
    }

    #[tokio::test]
    async fn test_unexpected_result_shape_is_a_schema_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getMe"))
            .respond_with(ok(json!({"name": "no app id"})))
            .mount(&server)
            .await;

        let err = client(&server).get_profile().await.unwrap_err();
        assert!(matches!(err, ClientError::Schema { context: "getMe", .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_transfer_retry_with_same_spend_id_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/transfer"))
            .and(query_param("spend_id", "payout-17"))
            .and(query_param("user_id", "123"))
            .respond_with(ok(transfer(991, "payout-17")))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server);
        let request = TransferRequest::new(123, Asset::Usdt, dec!(5), "payout-17");
        let first = client.transfer(&request).await.unwrap();
        let second = client.transfer(&request).await.unwrap();
        assert_eq!(first.transfer_id, second.transfer_id);
        assert_eq!(first.spend_id.as_deref(), Some("payout-17"));
    }

    #[tokio::test]
    async fn test_get_transfers_and_checks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getTransfers"))
            .and(query_param("spend_id", "payout-17"))
            .respond_with(ok(json!({"items": [transfer(991, "payout-17")]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/getChecks"))
            .and(query_param("check_ids", "5"))
            .and(query_param("status", "activated"))
            .respond_with(ok(json!({"items": [{
                "check_id": 5,
                "hash": "CQ5",
                "asset": "TON",
                "amount": "0.5",
                "bot_check_url": "https://t.me/CryptoBot?start=CQ5",
                "status": "activated",
                "created_at": "2024-02-02T02:02:02.000Z",
                "activated_at": "2024-02-03T09:00:00.000Z"
            }]})))
            .mount(&server)
            .await;

        let client = client(&server);
        let transfers = client
            .get_transfers(&TransferQuery::new().with_spend_id("payout-17"))
            .await
            .unwrap();
        assert!(matches!(transfers, Selection::Many(ref items) if items.len() == 1));

        let check = client
            .get_checks(&CheckQuery::ids(5).with_status(CheckStatus::Activated))
            .await
            .unwrap()
            .single()
            .unwrap();
        assert!(check.is_activated());
    }

    #[tokio::test]
    async fn test_delete_returns_remote_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/deleteInvoice"))
            .and(query_param("invoice_id", "42"))
            .respond_with(ok(json!(true)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/deleteCheck"))
            .and(query_param("check_id", "5"))
            .respond_with(ok(json!(false)))
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(client.delete_invoice(42).await.unwrap());
        assert!(!client.delete_check(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_stats_sends_iso_bounds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getStats"))
            .and(query_param("start_at", "2024-03-01T00:00:00Z"))
            .and(query_param_is_missing("end_at"))
            .respond_with(ok(json!({
                "volume": "120.5",
                "conversion": "0.42",
                "unique_users_count": 10,
                "created_invoice_count": 24,
                "paid_invoice_count": 10,
                "start_at": "2024-03-01T00:00:00.000Z",
                "end_at": "2024-03-02T00:00:00.000Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let stats = client(&server).get_stats(Some(start), None).await.unwrap();
        assert_eq!(stats.paid_invoice_count, 10);
        assert_eq!(stats.volume, dec!(120.5));
    }

    #[tokio::test]
    async fn test_convert_fiat() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getExchangeRates"))
            .respond_with(ok(json!([
                {"is_valid": true, "is_crypto": true, "is_fiat": false, "source": "TON", "target": "USD", "rate": "2.5"},
                {"is_valid": false, "is_crypto": true, "is_fiat": false, "source": "BTC", "target": "USD", "rate": "60000"}
            ])))
            .mount(&server)
            .await;

        let client = client(&server);
        let amount = client
            .convert_fiat(dec!(10), &Asset::Ton, &Fiat::Usd)
            .await
            .unwrap();
        assert_eq!(amount, dec!(4));

        let missing = client
            .convert_fiat(dec!(10), &Asset::Btc, &Fiat::Usd)
            .await
            .unwrap_err();
        assert!(matches!(missing, ClientError::RateNotFound { ref asset, ref fiat } if asset == "BTC" && fiat == "USD"));
    }

    #[tokio::test]
    async fn test_close_before_and_after_use() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ok(json!([])))
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(!client.close().await);
        assert!(!client.close().await);

        client.get_balances().await.unwrap();
        assert!(client.is_open().await);
        assert!(client.clone().close().await);
        assert!(!client.close().await);

        client.get_currencies().await.unwrap();
        assert!(client.is_open().await);
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let err = CryptoPay::new("bad\ntoken", Network::Testnet).unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = CryptoPay::new(TOKEN, Network::Testnet).unwrap();
        assert!(!format!("{client:?}").contains(TOKEN));
    }

    #[test]
    fn test_dispatcher_uses_client_token() {
        let client = CryptoPay::new(TOKEN, Network::Testnet).unwrap();
        let dispatcher = client.dispatcher::<()>();
        let body = b"{}";
        let signature = cryptopay::webhook::signature(&cryptopay::webhook::signing_key(TOKEN), body).unwrap();
        assert!(dispatcher.verifier().verify(body, &signature));
    }
}
