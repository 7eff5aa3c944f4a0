//! Streaming session service.
//!
//! Only session creation and the events POST are provided; reading and
//! parsing the long-lived event stream is left to the caller.

use std::sync::Arc;

use reqwest::Method;

use crate::client::{ClientInner, Params, ResourceKind};
use crate::models::{StreamSession, Symbols};
use crate::{Endpoint, Result};

/// Request for market events on an open session.
#[derive(Debug, Clone, PartialEq)]
pub struct EventsQuery {
    /// Session id from [`StreamingService::create_session`]
    pub sessionid: String,
    /// Symbols to stream
    pub symbols: Symbols,
    /// Event types to include (comma-separated, e.g. "trade,quote")
    pub filter: Option<String>,
    /// Whether to insert a line break after each event
    pub linebreak: Option<bool>,
}

impl EventsQuery {
    /// Events for `symbols` on session `sessionid`.
    pub fn new(sessionid: impl Into<String>, symbols: impl Into<Symbols>) -> Self {
        Self {
            sessionid: sessionid.into(),
            symbols: symbols.into(),
            filter: None,
            linebreak: None,
        }
    }

    /// Restrict to the given event types.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Request a line break after each event.
    pub fn linebreak(mut self, linebreak: bool) -> Self {
        self.linebreak = Some(linebreak);
        self
    }
}

impl From<EventsQuery> for Params {
    fn from(q: EventsQuery) -> Self {
        Params::new()
            .with("sessionid", q.sessionid)
            .with("symbols", q.symbols)
            .with("filter", q.filter)
            .with("linebreak", q.linebreak)
    }
}

/// Access point for market streaming.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::api::EventsQuery;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let session = client.streaming().create_session().await?;
/// let payload = client
///     .streaming()
///     .events(EventsQuery::new(session.sessionid, ["SPY", "AAPL"]).linebreak(true))
///     .await?;
/// for line in payload.lines() {
///     println!("{}", line);
/// }
/// # Ok(())
/// # }
/// ```
pub struct StreamingService {
    inner: Arc<ClientInner>,
}

impl StreamingService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a streaming session on the client's own endpoint.
    pub async fn create_session(&self) -> Result<StreamSession> {
        self.inner
            .post(
                "markets/events/session",
                Params::new(),
                ResourceKind::StreamSession,
            )
            .await
    }

    /// Request events on the stream endpoint and return the raw payload.
    pub async fn events(&self, query: EventsQuery) -> Result<String> {
        let request = self.inner.build(
            Method::POST,
            "markets/events",
            query.into(),
            Some(Endpoint::Stream),
        )?;
        self.inner.send_text(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_query_params() {
        let params = Params::from(EventsQuery::new("abc-123", ["SPY", "AAPL"]).filter("trade"));
        assert_eq!(params.encode(), "sessionid=abc-123&symbols=SPY%2CAAPL&filter=trade");
    }
}
