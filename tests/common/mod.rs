//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tradier_rs::{ClientConfig, Endpoint, EndpointTable, TradierClient};
use wiremock::MockServer;

static INIT: Once = Once::new();

pub const TEST_TOKEN: &str = "test-token";

/// Install a test-writer subscriber once; `RUST_LOG` controls the filter.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Start a mock server.
pub async fn setup_mock_server() -> MockServer {
    init_logging();
    MockServer::start().await
}

/// Every endpoint routed to `server` under its own prefix:
/// prod `/v1/`, beta `/beta/`, sandbox `/sandbox/v1/`, stream `/stream`.
pub fn endpoints_for(server: &MockServer) -> EndpointTable {
    let uri = server.uri();
    EndpointTable::default()
        .with(Endpoint::Production, format!("{}/v1/", uri))
        .with(Endpoint::Beta, format!("{}/beta/", uri))
        .with(Endpoint::Sandbox, format!("{}/sandbox/v1/", uri))
        .with(Endpoint::Stream, format!("{}/stream", uri))
}

/// A client for `endpoint` whose endpoint table points at `server`.
pub fn client_for(server: &MockServer, endpoint: Endpoint) -> TradierClient {
    let config = ClientConfig::default().with_endpoints(endpoints_for(server));
    TradierClient::with_config(TEST_TOKEN, endpoint, config).expect("client should build")
}
