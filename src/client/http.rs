//! HTTP client implementation for the Tradier API.

use reqwest::Method;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::{
    AccountsService, FundamentalsService, MarketsService, OrdersService, StreamingService,
    UserService, WatchlistsService,
};
use crate::{Endpoint, Error, Result};

use super::config::ClientConfig;
use super::envelope::{self, ResourceKind};
use super::query::Params;
use super::request::{self, RequestDescriptor};

/// The main client for interacting with the Tradier API.
///
/// A client holds an access token and the endpoint it talks to; both are
/// fixed at construction. Cloning is cheap and clones share the underlying
/// connection pool, so one client can serve any number of concurrent calls.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::{TradierClient, Endpoint, AccountId};
///
/// # async fn example() -> tradier_rs::Result<()> {
/// let client = TradierClient::new("your-access-token", Endpoint::Sandbox)?;
///
/// let profile = client.user().profile().await?;
/// for account in profile.account.iter() {
///     let balances = client.accounts().balances(&AccountId::new(&account.account_number)).await?;
///     println!("{}: {:?}", account.account_number, balances.total_equity);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TradierClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) token: SecretString,
    pub(crate) endpoint: Endpoint,
    pub(crate) config: ClientConfig,
}

impl TradierClient {
    /// Create a client for `endpoint` with default configuration.
    pub fn new(access_token: impl Into<String>, endpoint: Endpoint) -> Result<Self> {
        Self::with_config(access_token, endpoint, ClientConfig::default())
    }

    /// Create a client from an endpoint name (`prod`, `beta`, `sandbox`, `stream`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unknown endpoint name.
    pub fn from_endpoint_name(access_token: impl Into<String>, endpoint: &str) -> Result<Self> {
        Self::new(access_token, endpoint.parse()?)
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        access_token: impl Into<String>,
        endpoint: Endpoint,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = config.endpoints.resolve(endpoint);
        if base_url.is_empty() {
            return Err(Error::Config(format!(
                "endpoint `{}` has no base URL",
                endpoint
            )));
        }
        url::Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL for `{}`: {}", endpoint, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                token: SecretString::from(access_token.into()),
                endpoint,
                config,
            }),
        })
    }

    /// The endpoint this client was configured for.
    pub fn endpoint(&self) -> Endpoint {
        self.inner.endpoint
    }

    /// The base URL requests go to unless a call overrides it.
    pub fn base_url(&self) -> &str {
        self.inner.base_url(None)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Build an authenticated request without sending it.
    ///
    /// `base_override` routes the call to another endpoint; `None` uses the
    /// client's own.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: impl Into<Params>,
        base_override: Option<Endpoint>,
    ) -> Result<RequestDescriptor> {
        self.inner.build(method, path, params.into(), base_override)
    }

    /// Send a built request and return the raw JSON body.
    pub async fn send(&self, request: RequestDescriptor) -> Result<Value> {
        self.inner.send_json(request).await
    }

    /// Build and send an arbitrary request, returning the raw JSON body.
    ///
    /// Useful for resources this crate has no typed method for.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: impl Into<Params>,
        base_override: Option<Endpoint>,
    ) -> Result<Value> {
        let request = self.build_request(method, path, params, base_override)?;
        self.inner.send_json(request).await
    }

    /// Get the user service (`user/*`).
    pub fn user(&self) -> UserService {
        UserService::new(self.inner.clone())
    }

    /// Get the per-account data service (`accounts/{id}/*`).
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the trading service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the market data service.
    pub fn markets(&self) -> MarketsService {
        MarketsService::new(self.inner.clone())
    }

    /// Get the fundamentals service (always served from the beta endpoint).
    pub fn fundamentals(&self) -> FundamentalsService {
        FundamentalsService::new(self.inner.clone())
    }

    /// Get the watchlists service.
    pub fn watchlists(&self) -> WatchlistsService {
        WatchlistsService::new(self.inner.clone())
    }

    /// Get the streaming session service.
    pub fn streaming(&self) -> StreamingService {
        StreamingService::new(self.inner.clone())
    }
}

impl ClientInner {
    /// Effective base URL: the override if given, else the configured endpoint.
    pub(crate) fn base_url(&self, base_override: Option<Endpoint>) -> &str {
        self.config
            .endpoints
            .resolve(base_override.unwrap_or(self.endpoint))
    }

    pub(crate) fn build(
        &self,
        method: Method,
        path: &str,
        params: Params,
        base_override: Option<Endpoint>,
    ) -> Result<RequestDescriptor> {
        request::build(
            method,
            self.base_url(base_override),
            path,
            params,
            &self.token,
        )
    }

    /// Send a request; non-2xx statuses become [`Error::Api`].
    async fn execute(&self, request: RequestDescriptor) -> Result<reqwest::Response> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = request.into_request(&self.http).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = rejection_body(status.as_u16(), response.text().await);
        tracing::warn!(status = status.as_u16(), "request rejected by API");

        Err(Error::from_api_response(status.as_u16(), body))
    }

    pub(crate) async fn send_json(&self, request: RequestDescriptor) -> Result<Value> {
        let text = self.execute(request).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn send_text(&self, request: RequestDescriptor) -> Result<String> {
        Ok(self.execute(request).await?.text().await?)
    }

    /// Build, send and unwrap in one step.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
        base_override: Option<Endpoint>,
        kind: ResourceKind,
    ) -> Result<T> {
        let request = self.build(method, path, params, base_override)?;
        let raw = self.send_json(request).await?;
        envelope::unwrap_as(kind, raw)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        kind: ResourceKind,
    ) -> Result<T> {
        self.call(Method::GET, path, params, None, kind).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Params,
        kind: ResourceKind,
    ) -> Result<T> {
        self.call(Method::POST, path, body, None, kind).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Params,
        kind: ResourceKind,
    ) -> Result<T> {
        self.call(Method::PUT, path, body, None, kind).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        kind: ResourceKind,
    ) -> Result<T> {
        self.call(Method::DELETE, path, Params::new(), None, kind).await
    }
}

impl Clone for TradierClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TradierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradierClient")
            .field("endpoint", &self.inner.endpoint)
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Body of a rejected response: JSON when it parses, else the text as-is.
/// A body that could not be read is logged and left `null`.
fn rejection_body<E: std::fmt::Display>(
    status: u16,
    read: std::result::Result<String, E>,
) -> Value {
    match read {
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        Err(err) => {
            tracing::warn!(status, error = %err, "failed to read error response body");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::EndpointTable;

    #[test]
    fn test_rejection_body() {
        let json: std::result::Result<String, &str> =
            Ok(r#"{"errors": {"error": "bad"}}"#.to_string());
        assert_eq!(rejection_body(400, json), serde_json::json!({"errors": {"error": "bad"}}));

        let text: std::result::Result<String, &str> = Ok("Bad Gateway".to_string());
        assert_eq!(rejection_body(502, text), Value::String("Bad Gateway".into()));

        let unread: std::result::Result<String, &str> = Err("connection reset");
        let body = rejection_body(500, unread);
        assert_eq!(body, Value::Null);
        match Error::from_api_response(500, body) {
            Error::Api { message, .. } => assert_eq!(message, "Unknown API error"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_endpoint_name() {
        let result = TradierClient::from_endpoint_name("token", "staging");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = ClientConfig::default().with_endpoints(EndpointTable::default().with(Endpoint::Sandbox, ""));
        let result = TradierClient::with_config("token", Endpoint::Sandbox, config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_base_override() {
        let client = TradierClient::new("token", Endpoint::Production).unwrap();
        let req = client
            .build_request(Method::GET, "markets/fundamentals/company", "symbols=AAPL", Some(Endpoint::Beta))
            .unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://api.tradier.com/beta/markets/fundamentals/company?symbols=AAPL"
        );
        assert_eq!(client.base_url(), "https://api.tradier.com/v1/");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TradierClient::new("very-secret-token", Endpoint::Sandbox).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("Sandbox"));
    }
}
