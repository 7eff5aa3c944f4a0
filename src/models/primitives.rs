//! Primitive types and newtypes for type-safe API interactions.
//!
//! Identifiers are opaque strings on the wire; the newtypes only exist so
//! an account id can't be passed where an order id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// A brokerage account number.
    ///
    /// ```
    /// use tradier_rs::AccountId;
    ///
    /// let account = AccountId::new("VA000001");
    /// assert_eq!(account.to_string(), "VA000001");
    /// ```
    AccountId
);

string_id!(
    /// An order identifier as returned by order creation.
    OrderId
);

string_id!(
    /// An opaque watchlist identifier (e.g. `"default"` or a generated id).
    WatchlistId
);

/// One or more ticker symbols.
///
/// Every Tradier parameter that accepts several symbols takes them as a
/// single comma-separated string. `Symbols` accepts either one symbol or a
/// list and always encodes to that joined form.
///
/// ```
/// use tradier_rs::Symbols;
///
/// assert_eq!(Symbols::from("AAPL").joined(), "AAPL");
/// assert_eq!(Symbols::from(["AAPL", "MSFT"]).joined(), "AAPL,MSFT");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Symbols(Vec<String>);

impl Symbols {
    /// Create from any iterator of symbol-like values.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(symbols.into_iter().map(Into::into).collect())
    }

    /// The comma-joined wire form.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    /// The individual symbols as given.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no symbols were given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for Symbols {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for Symbols {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

impl From<&String> for Symbols {
    fn from(s: &String) -> Self {
        Self(vec![s.clone()])
    }
}

impl From<Vec<String>> for Symbols {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<Vec<&str>> for Symbols {
    fn from(v: Vec<&str>) -> Self {
        Self::new(v)
    }
}

impl From<&[&str]> for Symbols {
    fn from(v: &[&str]) -> Self {
        Self::new(v.iter().copied())
    }
}

impl From<&[String]> for Symbols {
    fn from(v: &[String]) -> Self {
        Self(v.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Symbols {
    fn from(v: [&str; N]) -> Self {
        Self::new(v)
    }
}

impl<const N: usize> From<&[&str; N]> for Symbols {
    fn from(v: &[&str; N]) -> Self {
        Self::new(v.iter().copied())
    }
}

/// One of the four Tradier API deployments.
///
/// # Example
///
/// ```
/// use tradier_rs::Endpoint;
///
/// let endpoint: Endpoint = "prod".parse().unwrap();
/// assert_eq!(endpoint.base_url(), "https://api.tradier.com/v1/");
/// assert!("staging".parse::<Endpoint>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    /// Live brokerage API.
    Production,
    /// Beta API; the only place fundamentals data is served.
    Beta,
    /// Paper-trading sandbox with delayed quotes.
    #[default]
    Sandbox,
    /// Streaming host for market events.
    Stream,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Production,
        Endpoint::Beta,
        Endpoint::Sandbox,
        Endpoint::Stream,
    ];

    /// The default base URL for this endpoint.
    pub fn base_url(&self) -> &'static str {
        match self {
            Endpoint::Production => "https://api.tradier.com/v1/",
            Endpoint::Beta => "https://api.tradier.com/beta/",
            Endpoint::Sandbox => "https://sandbox.tradier.com/v1/",
            Endpoint::Stream => "https://stream.tradier.com/v1",
        }
    }

    /// The short name used in configuration (`prod`, `beta`, `sandbox`, `stream`).
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Production => "prod",
            Endpoint::Beta => "beta",
            Endpoint::Sandbox => "sandbox",
            Endpoint::Stream => "stream",
        }
    }

    /// Resolve an endpoint name straight to its default base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for any name other than the four known ones.
    pub fn resolve(name: &str) -> Result<&'static str> {
        name.parse::<Endpoint>().map(|e| e.base_url())
    }

    /// Returns `true` if this endpoint trades real money.
    pub fn is_production(&self) -> bool {
        matches!(self, Endpoint::Production)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prod" => Ok(Endpoint::Production),
            "beta" => Ok(Endpoint::Beta),
            "sandbox" => Ok(Endpoint::Sandbox),
            "stream" => Ok(Endpoint::Stream),
            other => Err(Error::Config(format!(
                "unknown endpoint `{}` (expected prod, beta, sandbox or stream)",
                other
            ))),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_account_id() {
        let account = AccountId::new("VA000001");
        assert_eq!(account.as_str(), "VA000001");
        assert_eq!(account.to_string(), "VA000001");
    }

    #[test]
    fn test_symbols_single_and_list() {
        assert_eq!(Symbols::from("AAPL").joined(), "AAPL");
        assert_eq!(Symbols::from(vec!["AAPL", "MSFT"]).joined(), "AAPL,MSFT");
        assert_eq!(
            Symbols::from(vec!["AAPL".to_string(), "MSFT".to_string()]).joined(),
            "AAPL,MSFT"
        );
    }

    #[test]
    fn test_symbols_already_joined_passes_through() {
        assert_eq!(Symbols::from("AAPL,MSFT").joined(), "AAPL,MSFT");
    }

    #[test]
    fn test_endpoint_resolve_known_names() {
        let urls: HashSet<&str> = ["prod", "beta", "sandbox", "stream"]
            .iter()
            .map(|name| Endpoint::resolve(name).unwrap())
            .collect();

        assert_eq!(urls.len(), 4);
        assert!(urls.iter().all(|url| !url.is_empty()));
    }

    #[test]
    fn test_endpoint_resolve_unknown_name() {
        for name in ["", "production", "PROD", "live"] {
            assert!(matches!(Endpoint::resolve(name), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_endpoint_name_roundtrip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.name().parse::<Endpoint>().unwrap(), endpoint);
        }
        assert_eq!(Endpoint::default(), Endpoint::Sandbox);
    }
}
