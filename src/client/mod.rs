//! The generic request layer for the Tradier API.
//!
//! Every resource method runs the same pipeline:
//!
//! 1. resolve the base URL ([`EndpointTable`], optionally overridden per call),
//! 2. encode parameters ([`Params`]),
//! 3. build an authenticated [`RequestDescriptor`],
//! 4. send it and unwrap the response envelope ([`unwrap`]).
//!
//! # Example
//!
//! ```no_run
//! use tradier_rs::{TradierClient, Endpoint};
//!
//! # async fn example() -> tradier_rs::Result<()> {
//! let client = TradierClient::new("access-token", Endpoint::Sandbox)?;
//! let quotes = client.markets().quotes(["AAPL", "MSFT"]).await?;
//! println!("{} quotes", quotes.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod envelope;
mod http;
mod query;
mod request;

pub use config::{ClientConfig, EndpointTable};
pub use envelope::{unwrap, unwrap_path, OneOrMany, ResourceKind};
pub use http::TradierClient;
pub use query::{ParamValue, Params};
pub use request::RequestDescriptor;
pub(crate) use envelope::is_empty_marker;
pub(crate) use http::ClientInner;
