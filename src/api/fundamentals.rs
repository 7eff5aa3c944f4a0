//! Fundamentals service (`markets/fundamentals/*`).

use std::sync::Arc;

use reqwest::Method;

use crate::client::{ClientInner, Params, ResourceKind};
use crate::models::{FundamentalsResult, Symbols};
use crate::{Endpoint, Result};

/// Service for company fundamentals.
///
/// These resources only exist on the beta API, so every call is routed to
/// [`Endpoint::Beta`] whatever endpoint the client was built for.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// for result in client.fundamentals().company(["AAPL", "MSFT"]).await? {
///     println!("{}: {} records", result.request, result.results.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct FundamentalsService {
    inner: Arc<ClientInner>,
}

impl FundamentalsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Company profile and ownership.
    pub async fn company(&self, symbols: impl Into<Symbols>) -> Result<Vec<FundamentalsResult>> {
        self.fetch("company", symbols.into()).await
    }

    /// Corporate calendar events.
    pub async fn calendars(&self, symbols: impl Into<Symbols>) -> Result<Vec<FundamentalsResult>> {
        self.fetch("calendars", symbols.into()).await
    }

    /// Dividend history.
    pub async fn dividends(&self, symbols: impl Into<Symbols>) -> Result<Vec<FundamentalsResult>> {
        self.fetch("dividends", symbols.into()).await
    }

    /// Corporate actions (splits, mergers, ...).
    pub async fn corporate_actions(
        &self,
        symbols: impl Into<Symbols>,
    ) -> Result<Vec<FundamentalsResult>> {
        self.fetch("corporate_actions", symbols.into()).await
    }

    /// Operation, valuation and profitability ratios.
    pub async fn ratios(&self, symbols: impl Into<Symbols>) -> Result<Vec<FundamentalsResult>> {
        self.fetch("ratios", symbols.into()).await
    }

    /// Financial statements.
    pub async fn financials(&self, symbols: impl Into<Symbols>) -> Result<Vec<FundamentalsResult>> {
        self.fetch("financials", symbols.into()).await
    }

    /// Price statistics.
    pub async fn statistics(&self, symbols: impl Into<Symbols>) -> Result<Vec<FundamentalsResult>> {
        self.fetch("statistics", symbols.into()).await
    }

    async fn fetch(&self, resource: &str, symbols: Symbols) -> Result<Vec<FundamentalsResult>> {
        self.inner
            .call(
                Method::GET,
                &format!("markets/fundamentals/{}", resource),
                Params::new().with("symbols", symbols),
                Some(Endpoint::Beta),
                ResourceKind::Fundamentals,
            )
            .await
    }
}
