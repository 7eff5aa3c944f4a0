//! Parameter bags and their query-string / form-body encoding.
//!
//! A [`Params`] value is an ordered mapping from parameter name to an
//! optional value. Absent values stay in the bag (so callers can build bags
//! from optional arguments without branching) but are never encoded: no
//! `key=` pair is emitted for them.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::models::{
    AccountId, HistoryInterval, OrderClass, OrderDuration, OrderId, OrderSide, OrderType,
    SessionFilter, Symbols, TimesalesInterval, WatchlistId,
};

/// A value that can be placed in a [`Params`] bag.
///
/// `None` means the parameter is absent.
pub trait ParamValue {
    /// Convert into the wire string, or `None` when absent.
    fn into_param(self) -> Option<String>;
}

impl ParamValue for String {
    fn into_param(self) -> Option<String> {
        Some(self)
    }
}

impl ParamValue for &str {
    fn into_param(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for &String {
    fn into_param(self) -> Option<String> {
        Some(self.clone())
    }
}

impl ParamValue for bool {
    fn into_param(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for Decimal {
    fn into_param(self) -> Option<String> {
        Some(self.normalize().to_string())
    }
}

impl ParamValue for NaiveDate {
    fn into_param(self) -> Option<String> {
        Some(self.format("%Y-%m-%d").to_string())
    }
}

impl ParamValue for NaiveDateTime {
    fn into_param(self) -> Option<String> {
        Some(self.format("%Y-%m-%d %H:%M").to_string())
    }
}

impl ParamValue for Symbols {
    fn into_param(self) -> Option<String> {
        Some(self.joined())
    }
}

impl ParamValue for &Symbols {
    fn into_param(self) -> Option<String> {
        Some(self.joined())
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn into_param(self) -> Option<String> {
        self.and_then(ParamValue::into_param)
    }
}

macro_rules! display_param {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ParamValue for $ty {
                fn into_param(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

display_param!(
    i32,
    i64,
    u32,
    u64,
    usize,
    AccountId,
    &AccountId,
    OrderId,
    &OrderId,
    WatchlistId,
    &WatchlistId,
    OrderClass,
    OrderSide,
    OrderType,
    OrderDuration,
    TimesalesInterval,
    HistoryInterval,
    SessionFilter,
);

/// An ordered parameter bag.
///
/// # Example
///
/// ```
/// use tradier_rs::client::Params;
///
/// let params = Params::new()
///     .with("symbol", "AAPL")
///     .with("expiration", None::<String>)
///     .with("greeks", true);
///
/// assert_eq!(params.encode(), "symbol=AAPL&greeks=true");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, Option<String>)>,
}

impl Params {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a pre-encoded query string or form body into a bag.
    ///
    /// A leading `?` is ignored.
    pub fn parse(encoded: &str) -> Self {
        let encoded = encoded.strip_prefix('?').unwrap_or(encoded);
        form_urlencoded::parse(encoded.as_bytes())
            .map(|(k, v)| (k.into_owned(), Some(v.into_owned())))
            .collect()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl ParamValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, replacing any existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ParamValue) {
        let key = key.into();
        let value = value.into_param();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Merge `other` into this bag; keys present in `other` win.
    pub fn merge(mut self, other: impl Into<Params>) -> Self {
        for (key, value) in other.into().pairs {
            self.insert(key, value);
        }
        self
    }

    /// The value for `key`, if present and not absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns `true` if nothing would be encoded.
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, v)| v.is_none())
    }

    /// Iterate over the present `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// Absent values are skipped; an empty bag encodes to `""`.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl From<&str> for Params {
    fn from(encoded: &str) -> Self {
        Params::parse(encoded)
    }
}

impl From<String> for Params {
    fn from(encoded: String) -> Self {
        Params::parse(&encoded)
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Params::new()
    }
}

impl<K: Into<String>, V: ParamValue> From<Vec<(K, V)>> for Params {
    fn from(pairs: Vec<(K, V)>) -> Self {
        let mut params = Params::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_values_are_omitted() {
        let params = Params::new()
            .with("symbol", "SPY")
            .with("interval", None::<&str>)
            .with("start", None::<String>)
            .with("session_filter", "all");

        let encoded = params.encode();
        assert_eq!(encoded, "symbol=SPY&session_filter=all");
        assert!(!encoded.contains("interval"));
        assert!(!encoded.contains("start"));
    }

    #[test]
    fn test_empty_bag_encodes_empty() {
        assert_eq!(Params::new().encode(), "");
        assert!(Params::new().with("q", None::<String>).is_empty());
        assert_eq!(Params::new().with("q", None::<String>).encode(), "");
    }

    #[test]
    fn test_symbols_are_joined_then_escaped() {
        let params = Params::new().with("symbols", Symbols::from(["AAPL", "MSFT"]));
        assert_eq!(params.get("symbols"), Some("AAPL,MSFT"));
        assert_eq!(params.encode(), "symbols=AAPL%2CMSFT");
    }

    #[test]
    fn test_parse_roundtrip_normalizes() {
        let params = Params::from("?class=equity&symbol=AAPL&quantity=10");
        assert_eq!(params.get("class"), Some("equity"));
        assert_eq!(params.get("quantity"), Some("10"));
        assert_eq!(params.encode(), "class=equity&symbol=AAPL&quantity=10");

        let typed = Params::new()
            .with("class", OrderClass::Equity)
            .with("symbol", "AAPL")
            .with("quantity", 10u32);
        assert_eq!(typed, params);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let params = Params::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3");
        assert_eq!(params.encode(), "a=3&b=2");
    }

    #[test]
    fn test_merge_other_wins() {
        let params = Params::from("preview=false&symbol=AAPL").merge(vec![("preview", true)]);
        assert_eq!(params.encode(), "preview=true&symbol=AAPL");
    }

    #[test]
    fn test_value_formatting() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let params = Params::new()
            .with("price", dec!(150.50))
            .with("start", date)
            .with("indexes", false);
        assert_eq!(params.encode(), "price=150.5&start=2024-03-15&indexes=false");
    }
}
