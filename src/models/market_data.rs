//! Market data models: quotes, time and sales, options, pricing history,
//! market clock, calendar and symbol search.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::enums::OptionType;
use crate::client::{is_empty_marker, OneOrMany};

/// A quote for an equity, index or option.
///
/// Option chains return the same shape with the option-specific fields set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Exchange code
    #[serde(default)]
    pub exch: Option<String>,
    /// Security type ("stock", "option", "etf", "index", ...)
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,
    /// Last trade price
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Net change
    #[serde(default)]
    pub change: Option<Decimal>,
    /// Percent change
    #[serde(default)]
    pub change_percentage: Option<Decimal>,
    /// Session volume
    #[serde(default)]
    pub volume: Option<i64>,
    /// Average daily volume
    #[serde(default)]
    pub average_volume: Option<i64>,
    /// Size of the last trade
    #[serde(default)]
    pub last_volume: Option<i64>,
    /// Last trade time (epoch milliseconds)
    #[serde(default)]
    pub trade_date: Option<i64>,
    /// Session open
    #[serde(default)]
    pub open: Option<Decimal>,
    /// Session high
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Session low
    #[serde(default)]
    pub low: Option<Decimal>,
    /// Session close
    #[serde(default)]
    pub close: Option<Decimal>,
    /// Previous close
    #[serde(default)]
    pub prevclose: Option<Decimal>,
    /// 52-week high
    #[serde(default)]
    pub week_52_high: Option<Decimal>,
    /// 52-week low
    #[serde(default)]
    pub week_52_low: Option<Decimal>,
    /// Best bid
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Bid size
    #[serde(default)]
    pub bidsize: Option<i64>,
    /// Bid exchange
    #[serde(default)]
    pub bidexch: Option<String>,
    /// Bid time (epoch milliseconds)
    #[serde(default)]
    pub bid_date: Option<i64>,
    /// Best ask
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Ask size
    #[serde(default)]
    pub asksize: Option<i64>,
    /// Ask exchange
    #[serde(default)]
    pub askexch: Option<String>,
    /// Ask time (epoch milliseconds)
    #[serde(default)]
    pub ask_date: Option<i64>,
    /// Root symbols (equities with options)
    #[serde(default)]
    pub root_symbols: Option<String>,
    /// Underlying (options)
    #[serde(default)]
    pub underlying: Option<String>,
    /// Strike (options)
    #[serde(default)]
    pub strike: Option<Decimal>,
    /// Open interest (options)
    #[serde(default)]
    pub open_interest: Option<i64>,
    /// Contract multiplier (options)
    #[serde(default)]
    pub contract_size: Option<i64>,
    /// Expiration date (options)
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    /// Expiration type, e.g. "standard" or "weeklys" (options)
    #[serde(default)]
    pub expiration_type: Option<String>,
    /// Put or call (options)
    #[serde(default)]
    pub option_type: Option<OptionType>,
    /// Root symbol (options)
    #[serde(default)]
    pub root_symbol: Option<String>,
    /// Greeks, when requested on option chains
    #[serde(default)]
    pub greeks: Option<Greeks>,
}

impl Quote {
    /// Bid/ask spread, when both sides are quoted.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }
}

/// Option greeks and implied volatilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta
    #[serde(default)]
    pub delta: Option<f64>,
    /// Gamma
    #[serde(default)]
    pub gamma: Option<f64>,
    /// Theta
    #[serde(default)]
    pub theta: Option<f64>,
    /// Vega
    #[serde(default)]
    pub vega: Option<f64>,
    /// Rho
    #[serde(default)]
    pub rho: Option<f64>,
    /// Phi
    #[serde(default)]
    pub phi: Option<f64>,
    /// Implied volatility at the bid
    #[serde(default)]
    pub bid_iv: Option<f64>,
    /// Implied volatility at the mid
    #[serde(default)]
    pub mid_iv: Option<f64>,
    /// Implied volatility at the ask
    #[serde(default)]
    pub ask_iv: Option<f64>,
    /// ORATS final implied volatility
    #[serde(default)]
    pub smv_vol: Option<f64>,
    /// When the greeks were computed
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Time and sales series.
///
/// A window with no trades arrives as `"series": null`; that deserializes to
/// an empty `data`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeSeries {
    /// Bars or ticks; a single entry arrives unwrapped
    pub data: OneOrMany<TimeSale>,
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Series {
            #[serde(default)]
            data: OneOrMany<TimeSale>,
        }

        let value = Value::deserialize(deserializer)?;
        if is_empty_marker(&value) {
            return Ok(TimeSeries::default());
        }
        let series = Series::deserialize(value).map_err(D::Error::custom)?;
        Ok(TimeSeries { data: series.data })
    }
}

/// One time and sales bar (or tick).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSale {
    /// Local exchange time
    pub time: NaiveDateTime,
    /// Epoch seconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Trade price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Bar open
    #[serde(default)]
    pub open: Option<Decimal>,
    /// Bar high
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Bar low
    #[serde(default)]
    pub low: Option<Decimal>,
    /// Bar close
    #[serde(default)]
    pub close: Option<Decimal>,
    /// Volume
    #[serde(default)]
    pub volume: Option<i64>,
    /// Volume-weighted average price
    #[serde(default)]
    pub vwap: Option<Decimal>,
}

/// One bar of historical pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar date
    pub date: NaiveDate,
    /// Open
    #[serde(default)]
    pub open: Option<Decimal>,
    /// High
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Low
    #[serde(default)]
    pub low: Option<Decimal>,
    /// Close
    #[serde(default)]
    pub close: Option<Decimal>,
    /// Volume
    #[serde(default)]
    pub volume: Option<i64>,
}

/// Current market state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Trading date
    pub date: NaiveDate,
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,
    /// "premarket", "open", "postmarket" or "closed"
    pub state: String,
    /// Epoch seconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Time of the next state change (HH:MM)
    #[serde(default)]
    pub next_change: Option<String>,
    /// The next state
    #[serde(default)]
    pub next_state: Option<String>,
}

impl Clock {
    /// Returns `true` during the regular session.
    pub fn is_open(&self) -> bool {
        self.state == "open"
    }
}

/// Market calendar for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    /// Month (1-12)
    pub month: u32,
    /// Year
    pub year: i32,
    /// Days of the month
    pub days: CalendarDays,
}

/// Wrapper around the calendar's day list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDays {
    /// Days, as the API sent them
    #[serde(default)]
    pub day: OneOrMany<CalendarDay>,
}

/// One calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Date
    pub date: NaiveDate,
    /// "open" or "closed"
    pub status: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Pre-market session hours
    #[serde(default)]
    pub premarket: Option<SessionHours>,
    /// Regular session hours
    #[serde(default)]
    pub open: Option<SessionHours>,
    /// Post-market session hours
    #[serde(default)]
    pub postmarket: Option<SessionHours>,
}

/// Start and end of a session (HH:MM, exchange local time).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHours {
    /// Session start
    pub start: String,
    /// Session end
    pub end: String,
}

/// A security found by search or lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    /// Symbol
    pub symbol: String,
    /// Exchange code
    #[serde(default)]
    pub exchange: Option<String>,
    /// Security type
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,
    /// Company or fund name
    #[serde(default)]
    pub description: Option<String>,
}
