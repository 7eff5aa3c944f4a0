//! Account, balance and position models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::OneOrMany;

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Accounts the user can access; a single account arrives unwrapped
    #[serde(default)]
    pub account: OneOrMany<AccountSummary>,
}

/// Summary of one brokerage account within a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account number
    pub account_number: String,
    /// Account classification (e.g. "individual", "joint")
    #[serde(default)]
    pub classification: Option<String>,
    /// When the account was opened
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    /// Whether flagged as a pattern day trader
    #[serde(default)]
    pub day_trader: bool,
    /// Approved options level
    #[serde(default)]
    pub option_level: Option<i32>,
    /// Account status (e.g. "active")
    #[serde(default)]
    pub status: Option<String>,
    /// "cash" or "margin"
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
    /// Last profile update
    #[serde(default)]
    pub last_update_date: Option<DateTime<Utc>>,
}

impl AccountSummary {
    /// The account number as a strongly-typed value.
    pub fn account_id(&self) -> super::AccountId {
        super::AccountId::new(&self.account_number)
    }
}

/// Current balances for an account.
///
/// Margin, cash and PDT accounts each add a sub-object with type-specific
/// buying power figures; those are kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balances {
    /// Account number
    #[serde(default)]
    pub account_number: Option<String>,
    /// "cash", "margin" or "pdt"
    #[serde(default)]
    pub account_type: Option<String>,
    /// Total account equity
    #[serde(default)]
    pub total_equity: Option<Decimal>,
    /// Total cash
    #[serde(default)]
    pub total_cash: Option<Decimal>,
    /// Market value of all positions
    #[serde(default)]
    pub market_value: Option<Decimal>,
    /// Long market value
    #[serde(default)]
    pub long_market_value: Option<Decimal>,
    /// Short market value
    #[serde(default)]
    pub short_market_value: Option<Decimal>,
    /// Open profit/loss
    #[serde(default)]
    pub open_pl: Option<Decimal>,
    /// Realized profit/loss for the day
    #[serde(default)]
    pub close_pl: Option<Decimal>,
    /// Maintenance requirement
    #[serde(default)]
    pub current_requirement: Option<Decimal>,
    /// Cash awaiting settlement
    #[serde(default)]
    pub pending_cash: Option<Decimal>,
    /// Number of open orders
    #[serde(default)]
    pub pending_orders_count: Option<i64>,
    /// Uncleared deposits
    #[serde(default)]
    pub uncleared_funds: Option<Decimal>,
    /// Margin account details
    #[serde(default)]
    pub margin: Option<Value>,
    /// Cash account details
    #[serde(default)]
    pub cash: Option<Value>,
    /// Pattern day trader account details
    #[serde(default)]
    pub pdt: Option<Value>,
}

/// An open position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Position id
    #[serde(default)]
    pub id: Option<i64>,
    /// Symbol (OCC symbol for options)
    pub symbol: String,
    /// Signed quantity
    pub quantity: Decimal,
    /// Total cost basis
    #[serde(default)]
    pub cost_basis: Option<Decimal>,
    /// When the position was opened
    #[serde(default)]
    pub date_acquired: Option<DateTime<Utc>>,
}

/// An account history event (trade, journal, dividend, ...).
///
/// The type-specific detail object (e.g. `trade`, `journal`) is kept in
/// `details` under its original key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Cash amount of the event
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Event date
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Event type (e.g. "trade", "journal", "dividend")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Type-specific detail
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A closed position, as reported by gain/loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedPosition {
    /// Symbol
    pub symbol: String,
    /// Quantity closed
    pub quantity: Decimal,
    /// Total cost
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Total proceeds
    #[serde(default)]
    pub proceeds: Option<Decimal>,
    /// Realized gain or loss
    #[serde(default)]
    pub gain_loss: Option<Decimal>,
    /// Realized gain or loss in percent
    #[serde(default)]
    pub gain_loss_percent: Option<Decimal>,
    /// Open date
    #[serde(default)]
    pub open_date: Option<DateTime<Utc>>,
    /// Close date
    #[serde(default)]
    pub close_date: Option<DateTime<Utc>>,
    /// Holding period in days
    #[serde(default)]
    pub term: Option<i64>,
}

/// One account's slice of a user-level (`user/*`) response.
///
/// The payload under the account (e.g. `balances`, `positions`) keeps the
/// per-account envelope the API sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccountEntry {
    /// Account number
    pub account_number: String,
    /// Remaining per-account payload
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_profile_with_single_account() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "id-gcostanza",
            "name": "George Costanza",
            "account": {
                "account_number": "VA000001",
                "classification": "individual",
                "date_created": "2016-08-01T21:08:55.000Z",
                "day_trader": false,
                "option_level": 6,
                "status": "active",
                "type": "margin",
                "last_update_date": "2016-08-01T21:08:55.000Z"
            }
        }))
        .unwrap();

        assert!(matches!(profile.account, OneOrMany::One(_)));
        let account = profile.account.iter().next().unwrap();
        assert_eq!(account.account_id().as_str(), "VA000001");
        assert_eq!(account.account_type.as_deref(), Some("margin"));
    }

    #[test]
    fn test_history_event_keeps_details() {
        let event: HistoryEvent = serde_json::from_value(json!({
            "amount": -3000.00,
            "date": "2018-05-23T00:00:00Z",
            "type": "journal",
            "journal": { "description": "6YA-00005 TO 6YA-00102", "quantity": 0.0 }
        }))
        .unwrap();

        assert_eq!(event.event_type, "journal");
        assert_eq!(event.amount, Some(dec!(-3000)));
        assert!(event.details.contains_key("journal"));
    }
}
