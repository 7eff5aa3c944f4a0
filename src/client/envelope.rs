//! Response envelope unwrapping.
//!
//! Tradier wraps every payload in one or two keys named after the resource,
//! e.g. `{"quotes": {"quote": ...}}`. The key path is fixed per resource and
//! known at the call site; see [`ResourceKind::path`].
//!
//! The API returns a bare object when a collection holds one item and an
//! array when it holds several. Unwrapping does not paper over that: the
//! value at the key is returned as-is, and typed callers receive it as a
//! [`OneOrMany`].

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{Error, Result};

/// Every envelope shape the API returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `user/profile`
    Profile,
    /// `user/balances`, `user/positions`, ...: one entry per account
    UserAccounts,
    /// `*/balances`
    Balances,
    /// `*/positions`
    Positions,
    /// `*/history`
    AccountHistory,
    /// `*/gainloss`
    GainLoss,
    /// `*/orders`
    Orders,
    /// A single order, or the acknowledgement of an order operation
    Order,
    /// `markets/quotes`
    Quotes,
    /// `markets/timesales`
    Timesales,
    /// `markets/options/chains`
    OptionChains,
    /// `markets/options/strikes`
    OptionStrikes,
    /// `markets/options/expirations`
    OptionExpirations,
    /// `markets/history`
    PriceHistory,
    /// `markets/clock`
    Clock,
    /// `markets/calendar`
    Calendar,
    /// `markets/search` and `markets/lookup`
    Securities,
    /// `markets/fundamentals/*`; the payload is the top-level array
    Fundamentals,
    /// `GET watchlists`
    Watchlists,
    /// A single watchlist
    Watchlist,
    /// `markets/events/session`
    StreamSession,
}

impl ResourceKind {
    /// Keys to descend through, outermost first.
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Profile => &["profile"],
            ResourceKind::UserAccounts => &["accounts", "account"],
            ResourceKind::Balances => &["balances"],
            ResourceKind::Positions => &["positions", "position"],
            ResourceKind::AccountHistory => &["history", "event"],
            ResourceKind::GainLoss => &["gainloss", "closed_position"],
            ResourceKind::Orders => &["orders", "order"],
            ResourceKind::Order => &["order"],
            ResourceKind::Quotes => &["quotes", "quote"],
            ResourceKind::Timesales => &["series"],
            ResourceKind::OptionChains => &["options", "option"],
            ResourceKind::OptionStrikes => &["strikes", "strike"],
            ResourceKind::OptionExpirations => &["expirations", "date"],
            ResourceKind::PriceHistory => &["history", "day"],
            ResourceKind::Clock => &["clock"],
            ResourceKind::Calendar => &["calendar"],
            ResourceKind::Securities => &["securities", "security"],
            ResourceKind::Fundamentals => &[],
            ResourceKind::Watchlists => &["watchlists", "watchlist"],
            ResourceKind::Watchlist => &["watchlist"],
            ResourceKind::StreamSession => &["stream"],
        }
    }
}

/// The API's marker for an empty collection: JSON `null` or the string `"null"`.
pub(crate) fn is_empty_marker(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == "null",
        _ => false,
    }
}

static NULL: Value = Value::Null;

/// Extract the payload for `kind` from a raw response body.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tradier_rs::client::{unwrap, ResourceKind};
///
/// let raw = json!({"quotes": {"quote": {"symbol": "AAPL", "last": 150}}});
/// let quote = unwrap(ResourceKind::Quotes, raw).unwrap();
/// assert_eq!(quote, json!({"symbol": "AAPL", "last": 150}));
/// ```
pub fn unwrap(kind: ResourceKind, raw: Value) -> Result<Value> {
    unwrap_path(raw, kind.path())
}

/// Descend through `path` in `raw`.
///
/// An empty-collection marker met below the top level yields `Value::Null`.
/// A missing key yields [`Error::UnexpectedShape`] carrying the whole body,
/// which is how error envelopes sent with a 2xx status surface.
pub fn unwrap_path(raw: Value, path: &[&str]) -> Result<Value> {
    match locate(&raw, path) {
        Some(value) => Ok(value.clone()),
        None => Err(shape_error(path, raw)),
    }
}

/// Unwrap and deserialize in one step.
///
/// An empty marker is handed to `T` as `null`. Types that cannot represent
/// "nothing" reject it as [`Error::UnexpectedShape`] with the raw body.
pub(crate) fn unwrap_as<T: DeserializeOwned>(kind: ResourceKind, raw: Value) -> Result<T> {
    let path = kind.path();
    let value = match locate(&raw, path) {
        Some(value) => value,
        None => return Err(shape_error(path, raw)),
    };
    if value.is_null() {
        return T::deserialize(value).map_err(|_| shape_error(path, raw));
    }
    Ok(T::deserialize(value)?)
}

/// The value at `path`, with empty markers normalized to `null`; `None` when a
/// key is missing.
fn locate<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = raw;
    for (depth, key) in path.iter().enumerate() {
        if depth > 0 && is_empty_marker(current) {
            return Some(&NULL);
        }
        current = current.get(key)?;
    }

    if is_empty_marker(current) {
        Some(&NULL)
    } else {
        Some(current)
    }
}

fn shape_error(path: &[&str], raw: Value) -> Error {
    Error::UnexpectedShape {
        path: path.join("."),
        body: raw,
    }
}

/// A collection exactly as the API returned it.
///
/// # Example
///
/// ```
/// use tradier_rs::client::OneOrMany;
///
/// let one: OneOrMany<u32> = serde_json::from_str("7").unwrap();
/// let many: OneOrMany<u32> = serde_json::from_str("[7, 8]").unwrap();
/// let none: OneOrMany<u32> = serde_json::from_str("\"null\"").unwrap();
///
/// assert_eq!(one.into_vec(), vec![7]);
/// assert_eq!(many.len(), 2);
/// assert!(none.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    /// No items (`null` / `"null"`)
    Empty,
    /// A single bare object
    One(T),
    /// An array
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Number of items.
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::Empty => 0,
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the items regardless of shape.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::Empty => <&[T]>::default().iter(),
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }

    /// Flatten into a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Empty => Vec::new(),
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Empty
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if is_empty_marker(&value) {
            return Ok(OneOrMany::Empty);
        }
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map(OneOrMany::Many)
                .map_err(D::Error::custom),
            other => serde_json::from_value(other)
                .map(OneOrMany::One)
                .map_err(D::Error::custom),
        }
    }
}

impl<T: Serialize> Serialize for OneOrMany<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OneOrMany::Empty => serializer.serialize_unit(),
            OneOrMany::One(item) => item.serialize(serializer),
            OneOrMany::Many(items) => items.serialize(serializer),
        }
    }
}
