//! # tradier-rs
//!
//! An async Rust client for the Tradier brokerage REST API.
//!
//! The crate is a thin, typed layer over Tradier's HTTP endpoints: it builds
//! authenticated requests, sends them, and peels the response envelope down
//! to the payload. Request parameters are forwarded as given and nothing is
//! validated locally; the API is the authority on what it accepts.
//!
//! ## Features
//!
//! - **Accounts**: profile, balances, positions, history, gain/loss and orders
//! - **Trading**: create, preview, change and cancel orders
//! - **Market Data**: quotes, time and sales, option chains, history, clock,
//!   calendar and symbol search
//! - **Fundamentals**: company data, ratios, financials and more (beta API)
//! - **Watchlists**: full CRUD plus symbol add and remove
//! - **Streaming sessions**: create a session and poll the events endpoint
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tradier_rs::{TradierClient, Endpoint};
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     let client = TradierClient::new("your-access-token", Endpoint::Sandbox)?;
//!
//!     // One symbol gives one quote, several give several
//!     let quotes = client.markets().quotes("AAPL,MSFT").await?;
//!     for quote in quotes.iter() {
//!         println!("{}: {:?}", quote.symbol, quote.last);
//!     }
//!
//!     let clock = client.markets().clock().await?;
//!     println!("Market is {}", clock.state);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Order Placement
//!
//! ```rust,no_run
//! use tradier_rs::{TradierClient, Endpoint, AccountId};
//! use tradier_rs::models::{OrderRequest, OrderSide, OrderType, OrderDuration};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     let client = TradierClient::new("your-access-token", Endpoint::Sandbox)?;
//!     let account = AccountId::new("VA000001");
//!
//!     let order = OrderRequest::equity("AAPL", OrderSide::Buy, dec!(10))
//!         .order_type(OrderType::Limit)
//!         .duration(OrderDuration::Day)
//!         .price(dec!(150.00));
//!
//!     // Preview first to see the estimated cost
//!     let preview = client.orders().preview(&account, order.clone()).await?;
//!     println!("Estimated cost: {:?}", preview.cost);
//!
//!     let ack = client.orders().create(&account, order).await?;
//!     println!("Order placed: {:?}", ack.id);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod commands;
pub mod error;
pub mod models;

pub use client::{ClientConfig, EndpointTable, TradierClient};
pub use error::{Error, Result};
pub use models::{AccountId, Endpoint, OrderId, Symbols, WatchlistId};

/// Prelude module for convenient imports.
///
/// ```rust
/// use tradier_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{EventsQuery, HistoryQuery, TimesalesQuery};
    pub use crate::client::{ClientConfig, OneOrMany, Params, ResourceKind, TradierClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccountId, Endpoint, OrderId, Symbols, WatchlistId,
        // Enums
        HistoryInterval, OptionType, OrderClass, OrderDuration, OrderSide, OrderStatus,
        OrderType, SessionFilter, TimesalesInterval,
        // Account models
        Balances, Position, Profile,
        // Order models
        Order, OrderAck, OrderChange, OrderPreview, OrderRequest,
        // Market data
        Clock, Quote,
        // Watchlists
        Watchlist,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let account = AccountId::new("VA000001");
        assert_eq!(account.as_str(), "VA000001");
    }

    #[test]
    fn test_endpoint_urls() {
        assert_eq!(Endpoint::Production.base_url(), "https://api.tradier.com/v1/");
        assert_eq!(Endpoint::Sandbox.base_url(), "https://sandbox.tradier.com/v1/");
    }

    #[test]
    fn test_resolve_endpoint_name() {
        assert_eq!(Endpoint::resolve("prod").unwrap(), "https://api.tradier.com/v1/");
        assert!(matches!(Endpoint::resolve("staging"), Err(Error::Config(_))));
    }
}
