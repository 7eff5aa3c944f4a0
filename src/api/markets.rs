//! Market data service (`markets/*`).

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::client::{ClientInner, OneOrMany, Params, ResourceKind};
use crate::models::{
    Calendar, Clock, HistoryInterval, PriceBar, Quote, Security, SessionFilter, Symbols,
    TimeSeries, TimesalesInterval,
};
use crate::Result;

/// Query for time and sales.
///
/// Unset fields are left out of the request and the API applies its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimesalesQuery {
    /// Symbol
    pub symbol: String,
    /// Bar size
    pub interval: Option<TimesalesInterval>,
    /// Start of the window (exchange local time)
    pub start: Option<NaiveDateTime>,
    /// End of the window (exchange local time)
    pub end: Option<NaiveDateTime>,
    /// Session filter
    pub session_filter: Option<SessionFilter>,
}

impl TimesalesQuery {
    /// Time and sales for `symbol` with API defaults.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Set the bar size.
    pub fn interval(mut self, interval: TimesalesInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the window.
    pub fn between(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set the session filter.
    pub fn session_filter(mut self, filter: SessionFilter) -> Self {
        self.session_filter = Some(filter);
        self
    }
}

impl From<TimesalesQuery> for Params {
    fn from(q: TimesalesQuery) -> Self {
        Params::new()
            .with("symbol", q.symbol)
            .with("interval", q.interval)
            .with("start", q.start)
            .with("end", q.end)
            .with("session_filter", q.session_filter)
    }
}

/// Query for historical pricing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    /// Symbol
    pub symbol: String,
    /// Bar size
    pub interval: Option<HistoryInterval>,
    /// First date
    pub start: Option<NaiveDate>,
    /// Last date
    pub end: Option<NaiveDate>,
}

impl HistoryQuery {
    /// Pricing history for `symbol` with API defaults.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Set the bar size.
    pub fn interval(mut self, interval: HistoryInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the date range.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

impl From<HistoryQuery> for Params {
    fn from(q: HistoryQuery) -> Self {
        Params::new()
            .with("symbol", q.symbol)
            .with("interval", q.interval)
            .with("start", q.start)
            .with("end", q.end)
    }
}

/// Service for market data.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::api::TimesalesQuery;
/// use tradier_rs::models::TimesalesInterval;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// // One symbol or many
/// let quotes = client.markets().quotes(["AAPL", "MSFT"]).await?;
/// for quote in quotes.iter() {
///     println!("{}: {:?}", quote.symbol, quote.last);
/// }
///
/// let series = client
///     .markets()
///     .timesales(TimesalesQuery::new("SPY").interval(TimesalesInterval::FiveMinutes))
///     .await?;
/// println!("Records: {}", series.data.len());
/// # Ok(())
/// # }
/// ```
pub struct MarketsService {
    inner: Arc<ClientInner>,
}

impl MarketsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get quotes for one or more symbols.
    ///
    /// A single quote comes back as [`OneOrMany::One`], several as
    /// [`OneOrMany::Many`].
    pub async fn quotes(&self, symbols: impl Into<Symbols>) -> Result<OneOrMany<Quote>> {
        let params = Params::new().with("symbols", symbols.into());
        self.inner
            .get("markets/quotes", params, ResourceKind::Quotes)
            .await
    }

    /// Get time and sales.
    pub async fn timesales(&self, query: TimesalesQuery) -> Result<TimeSeries> {
        self.inner
            .get("markets/timesales", query.into(), ResourceKind::Timesales)
            .await
    }

    /// Get the option chain for one expiration.
    pub async fn option_chains(
        &self,
        symbol: &str,
        expiration: NaiveDate,
    ) -> Result<OneOrMany<Quote>> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("expiration", expiration);
        self.inner
            .get("markets/options/chains", params, ResourceKind::OptionChains)
            .await
    }

    /// Get the strikes available for one expiration.
    pub async fn option_strikes(
        &self,
        symbol: &str,
        expiration: NaiveDate,
    ) -> Result<OneOrMany<Decimal>> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("expiration", expiration);
        self.inner
            .get("markets/options/strikes", params, ResourceKind::OptionStrikes)
            .await
    }

    /// Get the expiration dates for an underlying.
    pub async fn option_expirations(
        &self,
        symbol: &str,
        include_all_roots: Option<bool>,
    ) -> Result<OneOrMany<NaiveDate>> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("includeAllRoots", include_all_roots);
        self.inner
            .get(
                "markets/options/expirations",
                params,
                ResourceKind::OptionExpirations,
            )
            .await
    }

    /// Get historical pricing.
    pub async fn history(&self, query: HistoryQuery) -> Result<OneOrMany<PriceBar>> {
        self.inner
            .get("markets/history", query.into(), ResourceKind::PriceHistory)
            .await
    }

    /// Get the market clock.
    pub async fn clock(&self) -> Result<Clock> {
        self.inner
            .get("markets/clock", Params::new(), ResourceKind::Clock)
            .await
    }

    /// Get the market calendar; defaults to the current month.
    pub async fn calendar(&self, month: Option<u32>, year: Option<i32>) -> Result<Calendar> {
        let params = Params::new()
            .with("month", month)
            .with("year", year);
        self.inner
            .get("markets/calendar", params, ResourceKind::Calendar)
            .await
    }

    /// Search companies by name.
    ///
    /// `indexes` defaults to `true` when not given.
    pub async fn search(&self, q: &str, indexes: Option<bool>) -> Result<OneOrMany<Security>> {
        let params = Params::new()
            .with("q", q)
            .with("indexes", indexes.unwrap_or(true));
        self.inner
            .get("markets/search", params, ResourceKind::Securities)
            .await
    }

    /// Look up symbols by prefix, optionally filtered by exchange and type
    /// (both comma-separated lists).
    pub async fn lookup(
        &self,
        q: &str,
        exchanges: Option<&str>,
        types: Option<&str>,
    ) -> Result<OneOrMany<Security>> {
        let params = Params::new()
            .with("q", q)
            .with("exchanges", exchanges)
            .with("types", types);
        self.inner
            .get("markets/lookup", params, ResourceKind::Securities)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timesales_query_params() {
        let start = NaiveDate::from_ymd_opt(2019, 5, 9)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 5, 9)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();

        let params = Params::from(
            TimesalesQuery::new("AAPL")
                .interval(TimesalesInterval::OneMinute)
                .between(start, end)
                .session_filter(SessionFilter::Open),
        );

        assert_eq!(params.get("start"), Some("2019-05-09 09:30"));
        assert_eq!(params.get("interval"), Some("1min"));
        assert_eq!(params.get("session_filter"), Some("open"));
    }

    #[test]
    fn test_history_query_defaults_omitted() {
        assert_eq!(Params::from(HistoryQuery::new("AAPL")).encode(), "symbol=AAPL");
    }
}
