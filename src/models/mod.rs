//! Data models for the Tradier API.
//!
//! - [`primitives`] - identifiers, [`Symbols`] and the [`Endpoint`] enum
//! - [`enums`] - wire enums for order and market data requests
//! - [`account`] - profile, balances, positions, history, gain/loss
//! - [`order`] - orders, acknowledgements and the typed order request
//! - [`market_data`] - quotes, time and sales, options, clock, calendar, search
//! - [`fundamentals`] - beta fundamentals result envelopes
//! - [`watchlist`] - watchlists and their items
//! - [`streaming`] - streaming session handles

pub mod primitives;
pub mod enums;
pub mod account;
pub mod order;
pub mod market_data;
pub mod fundamentals;
pub mod watchlist;
pub mod streaming;

pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use order::*;
pub use market_data::*;
pub use fundamentals::*;
pub use watchlist::*;
pub use streaming::*;
