//! Client configuration options.

use std::time::Duration;

use crate::Endpoint;

/// Base URLs for every [`Endpoint`].
///
/// The table is owned by the client configuration and never mutated after
/// the client is built. Production code uses the defaults; tests point the
/// table at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    production: String,
    beta: String,
    sandbox: String,
    stream: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            production: Endpoint::Production.base_url().to_string(),
            beta: Endpoint::Beta.base_url().to_string(),
            sandbox: Endpoint::Sandbox.base_url().to_string(),
            stream: Endpoint::Stream.base_url().to_string(),
        }
    }
}

impl EndpointTable {
    /// The base URL configured for `endpoint`.
    pub fn resolve(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Production => &self.production,
            Endpoint::Beta => &self.beta,
            Endpoint::Sandbox => &self.sandbox,
            Endpoint::Stream => &self.stream,
        }
    }

    /// Return a table with `endpoint` mapped to `url`.
    pub fn with(mut self, endpoint: Endpoint, url: impl Into<String>) -> Self {
        let slot = match endpoint {
            Endpoint::Production => &mut self.production,
            Endpoint::Beta => &mut self.beta,
            Endpoint::Sandbox => &mut self.sandbox,
            Endpoint::Stream => &mut self.stream,
        };
        *slot = url.into();
        self
    }

    /// Map every endpoint to the same URL.
    pub fn uniform(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            production: url.clone(),
            beta: url.clone(),
            sandbox: url.clone(),
            stream: url,
        }
    }
}

/// Configuration for the Tradier client.
///
/// # Example
///
/// ```
/// use tradier_rs::{ClientConfig, Endpoint};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0")
///     .with_base_url(Endpoint::Sandbox, "http://localhost:8080/v1/");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout, enforced by the HTTP transport
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Base URL per endpoint
    pub endpoints: EndpointTable,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("tradier-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            endpoints: EndpointTable::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the base URL of a single endpoint.
    pub fn with_base_url(mut self, endpoint: Endpoint, url: impl Into<String>) -> Self {
        self.endpoints = self.endpoints.with(endpoint, url);
        self
    }

    /// Replace the whole endpoint table.
    pub fn with_endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }
}
