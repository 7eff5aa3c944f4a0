//! API service modules for Tradier resources.
//!
//! Each service binds a group of resources to fixed verbs and paths and
//! forwards caller arguments to the shared request layer.

mod accounts;
mod fundamentals;
mod markets;
mod orders;
mod streaming;
mod user;
mod watchlists;

pub use accounts::AccountsService;
pub use fundamentals::FundamentalsService;
pub use markets::{HistoryQuery, MarketsService, TimesalesQuery};
pub use orders::OrdersService;
pub use streaming::{EventsQuery, StreamingService};
pub use user::UserService;
pub use watchlists::WatchlistsService;

/// Percent-encode a caller-supplied path segment.
pub(crate) fn segment(s: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(s)
}
