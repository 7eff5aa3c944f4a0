//! Enumeration types for the Tradier API.
//!
//! Request-side enums expose `as_str()` giving the exact wire value used in
//! query strings and form bodies.

use serde::{Deserialize, Serialize};

macro_rules! wire_str {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// The value sent over the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(crate::Error::InvalidInput(format!(
                        "invalid {}: {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

/// Order class: what kind of instrument(s) the order trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    /// Single equity leg
    Equity,
    /// Single option leg
    Option,
    /// Up to four option legs on one underlying
    Multileg,
    /// One equity leg plus option legs
    Combo,
}

wire_str!(OrderClass {
    Equity => "equity",
    Option => "option",
    Multileg => "multileg",
    Combo => "combo",
});

/// Side of an order or order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Buy equity
    Buy,
    /// Buy equity to cover a short
    BuyToCover,
    /// Sell equity
    Sell,
    /// Sell equity short
    SellShort,
    /// Open a long option position
    BuyToOpen,
    /// Close a short option position
    BuyToClose,
    /// Open a short option position
    SellToOpen,
    /// Close a long option position
    SellToClose,
}

wire_str!(OrderSide {
    Buy => "buy",
    BuyToCover => "buy_to_cover",
    Sell => "sell",
    SellShort => "sell_short",
    BuyToOpen => "buy_to_open",
    BuyToClose => "buy_to_close",
    SellToOpen => "sell_to_open",
    SellToClose => "sell_to_close",
});

/// How an order is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Execute at the current market price
    Market,
    /// Execute at `price` or better
    Limit,
    /// Market order triggered at `stop`
    Stop,
    /// Limit order triggered at `stop`
    StopLimit,
    /// Multileg net debit
    Debit,
    /// Multileg net credit
    Credit,
    /// Multileg at even money
    Even,
}

wire_str!(OrderType {
    Market => "market",
    Limit => "limit",
    Stop => "stop",
    StopLimit => "stop_limit",
    Debit => "debit",
    Credit => "credit",
    Even => "even",
});

/// Time in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDuration {
    /// Good for the regular session
    Day,
    /// Good until cancelled
    Gtc,
    /// Pre-market session only
    Pre,
    /// Post-market session only
    Post,
}

wire_str!(OrderDuration {
    Day => "day",
    Gtc => "gtc",
    Pre => "pre",
    Post => "post",
});

/// Lifecycle status reported for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted by the API (order acknowledgements)
    Ok,
    /// Working at the exchange
    Open,
    /// Partially executed
    PartiallyFilled,
    /// Fully executed
    Filled,
    /// Reached end of its duration
    Expired,
    /// Cancelled
    Canceled,
    /// Awaiting routing
    Pending,
    /// Rejected
    Rejected,
    /// Other status not modelled here
    #[serde(other)]
    Unknown,
}

/// Bar size for time and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimesalesInterval {
    /// Every trade
    #[serde(rename = "tick")]
    Tick,
    /// One-minute bars
    #[serde(rename = "1min")]
    OneMinute,
    /// Five-minute bars
    #[serde(rename = "5min")]
    FiveMinutes,
    /// Fifteen-minute bars
    #[serde(rename = "15min")]
    FifteenMinutes,
}

wire_str!(TimesalesInterval {
    Tick => "tick",
    OneMinute => "1min",
    FiveMinutes => "5min",
    FifteenMinutes => "15min",
});

/// Bar size for historical pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryInterval {
    /// Daily bars
    Daily,
    /// Weekly bars
    Weekly,
    /// Monthly bars
    Monthly,
}

wire_str!(HistoryInterval {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
});

/// Which part of the trading day time and sales covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    /// Pre, regular and post market
    All,
    /// Regular session only
    Open,
}

wire_str!(SessionFilter {
    All => "all",
    Open => "open",
});

/// Put or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}
