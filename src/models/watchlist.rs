//! Watchlist models.

use serde::{Deserialize, Serialize};

use crate::client::OneOrMany;

/// A watchlist.
///
/// Listing watchlists returns only `name`, `id` and `public_id`; fetching
/// one also returns its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watchlist {
    /// Display name
    pub name: String,
    /// Watchlist id used in paths
    pub id: String,
    /// Shareable public id
    #[serde(default)]
    pub public_id: Option<String>,
    /// Items wrapper; empty when the list has no symbols or was not expanded
    #[serde(default)]
    pub items: OneOrMany<WatchlistItems>,
}

/// Wrapper around a watchlist's items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistItems {
    /// Items, as the API sent them
    #[serde(default)]
    pub item: OneOrMany<WatchlistItem>,
}

/// One symbol on a watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistItem {
    /// Symbol
    pub symbol: String,
    /// Item id
    #[serde(default)]
    pub id: Option<String>,
}

impl Watchlist {
    /// The watchlist id as a strongly-typed value.
    pub fn watchlist_id(&self) -> super::WatchlistId {
        super::WatchlistId::new(&self.id)
    }

    /// Symbols on the list, in order.
    pub fn symbols(&self) -> Vec<&str> {
        self.items
            .iter()
            .flat_map(|items| items.item.iter())
            .map(|item| item.symbol.as_str())
            .collect()
    }
}
