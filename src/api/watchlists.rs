//! Watchlists service.

use std::sync::Arc;

use super::segment;
use crate::client::{ClientInner, OneOrMany, Params, ResourceKind};
use crate::models::{Symbols, Watchlist, WatchlistId};
use crate::Result;

/// Service for watchlist operations.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::WatchlistId;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let created = client.watchlists().create("tech", ["AAPL", "MSFT"]).await?;
/// let id = created.watchlist_id();
///
/// client.watchlists().add_symbols(&id, "NVDA").await?;
/// client.watchlists().remove_symbol(&id, "MSFT").await?;
///
/// let list = client.watchlists().get(&id).await?;
/// println!("{}: {:?}", list.name, list.symbols());
/// # Ok(())
/// # }
/// ```
pub struct WatchlistsService {
    inner: Arc<ClientInner>,
}

impl WatchlistsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the user's watchlists.
    pub async fn list(&self) -> Result<OneOrMany<Watchlist>> {
        self.inner
            .get("watchlists", Params::new(), ResourceKind::Watchlists)
            .await
    }

    /// Get a watchlist with its items.
    pub async fn get(&self, id: &WatchlistId) -> Result<Watchlist> {
        self.inner
            .get(
                &format!("watchlists/{}", segment(id.as_str())),
                Params::new(),
                ResourceKind::Watchlist,
            )
            .await
    }

    /// Create a watchlist.
    pub async fn create(&self, name: &str, symbols: impl Into<Symbols>) -> Result<Watchlist> {
        let body = Params::new()
            .with("name", name)
            .with("symbols", symbols.into());
        self.inner
            .post("watchlists", body, ResourceKind::Watchlist)
            .await
    }

    /// Rename a watchlist and replace its symbols.
    pub async fn update(
        &self,
        id: &WatchlistId,
        name: &str,
        symbols: impl Into<Symbols>,
    ) -> Result<Watchlist> {
        let body = Params::new()
            .with("name", name)
            .with("symbols", symbols.into());
        self.inner
            .put(
                &format!("watchlists/{}", segment(id.as_str())),
                body,
                ResourceKind::Watchlist,
            )
            .await
    }

    /// Delete a watchlist; returns the remaining watchlists.
    pub async fn delete(&self, id: &WatchlistId) -> Result<OneOrMany<Watchlist>> {
        self.inner
            .delete(
                &format!("watchlists/{}", segment(id.as_str())),
                ResourceKind::Watchlists,
            )
            .await
    }

    /// Add symbols to a watchlist.
    pub async fn add_symbols(&self, id: &WatchlistId, symbols: impl Into<Symbols>) -> Result<Watchlist> {
        let body = Params::new().with("symbols", symbols.into());
        self.inner
            .post(
                &format!("watchlists/{}/symbols", segment(id.as_str())),
                body,
                ResourceKind::Watchlist,
            )
            .await
    }

    /// Remove one symbol from a watchlist.
    pub async fn remove_symbol(&self, id: &WatchlistId, symbol: &str) -> Result<Watchlist> {
        self.inner
            .delete(
                &format!(
                    "watchlists/{}/symbols/{}",
                    segment(id.as_str()),
                    segment(symbol)
                ),
                ResourceKind::Watchlist,
            )
            .await
    }
}
