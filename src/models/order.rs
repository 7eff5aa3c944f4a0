//! Order models: typed order input and order responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{OrderClass, OrderDuration, OrderSide, OrderStatus, OrderType};
use crate::client::{OneOrMany, Params};

/// One option leg of a multileg or combo order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLegRequest {
    /// OCC option symbol
    pub option_symbol: String,
    /// Side of the leg
    pub side: OrderSide,
    /// Number of contracts
    pub quantity: Decimal,
}

/// A new order, converted into form fields when submitted.
///
/// Nothing here is validated locally; the API rejects incomplete orders.
///
/// # Example
///
/// ```
/// use tradier_rs::client::Params;
/// use tradier_rs::models::{OrderRequest, OrderSide, OrderType, OrderDuration};
/// use rust_decimal_macros::dec;
///
/// let order = OrderRequest::equity("AAPL", OrderSide::Buy, dec!(10))
///     .order_type(OrderType::Limit)
///     .duration(OrderDuration::Day)
///     .price(dec!(150.00));
///
/// let params = Params::from(order);
/// assert_eq!(params.get("type"), Some("limit"));
/// assert_eq!(params.get("price"), Some("150"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    class: OrderClass,
    symbol: String,
    side: Option<OrderSide>,
    quantity: Option<Decimal>,
    order_type: Option<OrderType>,
    duration: Option<OrderDuration>,
    price: Option<Decimal>,
    stop: Option<Decimal>,
    option_symbol: Option<String>,
    tag: Option<String>,
    legs: Vec<OrderLegRequest>,
}

impl OrderRequest {
    /// Start an order of `class` on `symbol` (the underlying for options).
    pub fn new(class: OrderClass, symbol: impl Into<String>) -> Self {
        Self {
            class,
            symbol: symbol.into(),
            side: None,
            quantity: None,
            order_type: None,
            duration: None,
            price: None,
            stop: None,
            option_symbol: None,
            tag: None,
            legs: Vec::new(),
        }
    }

    /// A single-leg equity order.
    pub fn equity(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(OrderClass::Equity, symbol).side(side).quantity(quantity)
    }

    /// A single-leg option order on `underlying`.
    pub fn option(
        underlying: impl Into<String>,
        option_symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
    ) -> Self {
        Self::new(OrderClass::Option, underlying)
            .option_symbol(option_symbol)
            .side(side)
            .quantity(quantity)
    }

    /// Set the side (single-leg orders).
    pub fn side(mut self, side: OrderSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the quantity (single-leg orders).
    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Set the time in force.
    pub fn duration(mut self, duration: OrderDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stop price.
    pub fn stop(mut self, stop: Decimal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Set the OCC option symbol (single-leg option orders).
    pub fn option_symbol(mut self, option_symbol: impl Into<String>) -> Self {
        self.option_symbol = Some(option_symbol.into());
        self
    }

    /// Attach a client-side tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add an option leg (multileg and combo orders).
    pub fn leg(mut self, option_symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        self.legs.push(OrderLegRequest {
            option_symbol: option_symbol.into(),
            side,
            quantity,
        });
        self
    }
}

impl From<OrderRequest> for Params {
    fn from(order: OrderRequest) -> Self {
        let mut params = Params::new()
            .with("class", order.class)
            .with("symbol", order.symbol)
            .with("option_symbol", order.option_symbol)
            .with("side", order.side)
            .with("quantity", order.quantity)
            .with("type", order.order_type)
            .with("duration", order.duration)
            .with("price", order.price)
            .with("stop", order.stop)
            .with("tag", order.tag);

        for (i, leg) in order.legs.into_iter().enumerate() {
            params.insert(format!("option_symbol[{}]", i), leg.option_symbol);
            params.insert(format!("side[{}]", i), leg.side);
            params.insert(format!("quantity[{}]", i), leg.quantity);
        }
        params
    }
}

/// Fields that can be modified on a working order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderChange {
    /// New order type
    pub order_type: Option<OrderType>,
    /// New time in force
    pub duration: Option<OrderDuration>,
    /// New limit price
    pub price: Option<Decimal>,
    /// New stop price
    pub stop: Option<Decimal>,
}

impl From<OrderChange> for Params {
    fn from(change: OrderChange) -> Self {
        Params::new()
            .with("type", change.order_type)
            .with("duration", change.duration)
            .with("price", change.price)
            .with("stop", change.stop)
    }
}

/// An order as reported by the orders endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    pub id: i64,
    /// Order type
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    /// Symbol (underlying for option orders)
    #[serde(default)]
    pub symbol: Option<String>,
    /// Side
    #[serde(default)]
    pub side: Option<String>,
    /// Ordered quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Status
    pub status: OrderStatus,
    /// Time in force
    #[serde(default)]
    pub duration: Option<String>,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub avg_fill_price: Option<Decimal>,
    /// Filled quantity
    #[serde(default)]
    pub exec_quantity: Option<Decimal>,
    /// Price of the last fill
    #[serde(default)]
    pub last_fill_price: Option<Decimal>,
    /// Quantity of the last fill
    #[serde(default)]
    pub last_fill_quantity: Option<Decimal>,
    /// Unfilled quantity
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
    /// Creation time
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,
    /// Last transaction time
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
    /// Order class
    #[serde(default)]
    pub class: Option<OrderClass>,
    /// OCC option symbol for single-leg option orders
    #[serde(default)]
    pub option_symbol: Option<String>,
    /// Number of legs for multileg orders
    #[serde(default)]
    pub num_legs: Option<i32>,
    /// Strategy name for multileg orders
    #[serde(default)]
    pub strategy: Option<String>,
    /// Client tag
    #[serde(default)]
    pub tag: Option<String>,
    /// Legs of a multileg order, in whatever shape the API sent
    #[serde(default)]
    pub leg: OneOrMany<Value>,
}

/// Acknowledgement returned by create, change and cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAck {
    /// Order id
    #[serde(default)]
    pub id: Option<i64>,
    /// "ok" on success
    pub status: String,
    /// Partner id, when present
    #[serde(default)]
    pub partner_id: Option<String>,
}

/// Result of a preview (validate-only) order submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPreview {
    /// "ok" when the order would be accepted
    pub status: String,
    /// Whether the preview succeeded
    #[serde(default)]
    pub result: Option<bool>,
    /// Estimated commission
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Estimated total cost
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Estimated fees
    #[serde(default)]
    pub fees: Option<Decimal>,
    /// Cost of the order excluding fees
    #[serde(default)]
    pub order_cost: Option<Decimal>,
    /// Change in margin requirement
    #[serde(default)]
    pub margin_change: Option<Decimal>,
    /// Remaining fields (strategy, day trades, request date, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_equity_order_fields() {
        let params = Params::from(
            OrderRequest::equity("AAPL", OrderSide::Buy, dec!(10))
                .order_type(OrderType::Market)
                .duration(OrderDuration::Day),
        );

        assert_eq!(
            params.encode(),
            "class=equity&symbol=AAPL&side=buy&quantity=10&type=market&duration=day"
        );
    }

    #[test]
    fn test_multileg_order_fields() {
        let params = Params::from(
            OrderRequest::new(OrderClass::Multileg, "SPY")
                .order_type(OrderType::Credit)
                .duration(OrderDuration::Day)
                .price(dec!(1.25))
                .leg("SPY240119C00480000", OrderSide::SellToOpen, dec!(1))
                .leg("SPY240119C00485000", OrderSide::BuyToOpen, dec!(1)),
        );

        assert_eq!(params.get("option_symbol[0]"), Some("SPY240119C00480000"));
        assert_eq!(params.get("side[1]"), Some("buy_to_open"));
        assert_eq!(params.get("quantity[1]"), Some("1"));
        assert_eq!(params.get("side"), None);
        assert!(params.encode().contains("option_symbol%5B0%5D=SPY240119C00480000"));
    }

    #[test]
    fn test_order_change_skips_unset() {
        let change = OrderChange {
            price: Some(dec!(151.5)),
            ..Default::default()
        };
        assert_eq!(Params::from(change).encode(), "price=151.5");
    }

    #[test]
    fn test_order_deserialize() {
        let order: Order = serde_json::from_value(json!({
            "id": 228175,
            "type": "limit",
            "symbol": "AAPL",
            "side": "buy",
            "quantity": 50.0,
            "status": "open",
            "duration": "pre",
            "price": 22.0,
            "avg_fill_price": 0.0,
            "exec_quantity": 0.0,
            "last_fill_price": 0.0,
            "last_fill_quantity": 0.0,
            "remaining_quantity": 0.0,
            "create_date": "2018-06-01T12:02:29.682Z",
            "transaction_date": "2018-06-01T12:30:02.385Z",
            "class": "equity"
        }))
        .unwrap();

        assert_eq!(order.id, 228175);
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.class, Some(OrderClass::Equity));
        assert!(order.leg.is_empty());
    }
}
