//! Trading service: create, preview, change and cancel orders.

use std::sync::Arc;

use super::segment;
use crate::client::{ClientInner, Params, ResourceKind};
use crate::models::{AccountId, OrderAck, OrderId, OrderPreview};
use crate::Result;

/// Service for order placement and management.
///
/// Order bodies accept anything convertible into [`Params`]: a typed
/// [`OrderRequest`](crate::models::OrderRequest), a hand-built bag, or a
/// pre-encoded form string.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::AccountId;
/// use tradier_rs::models::{OrderRequest, OrderSide, OrderType, OrderDuration};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let account = AccountId::new("VA000001");
/// let order = OrderRequest::equity("AAPL", OrderSide::Buy, dec!(10))
///     .order_type(OrderType::Limit)
///     .duration(OrderDuration::Day)
///     .price(dec!(150.00));
///
/// // Validate first
/// let preview = client.orders().preview(&account, order.clone()).await?;
/// println!("Estimated cost: {:?}", preview.cost);
///
/// // Then place it
/// let ack = client.orders().create(&account, order).await?;
/// println!("Order id: {:?}", ack.id);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Place an order.
    pub async fn create(&self, account: &AccountId, order: impl Into<Params>) -> Result<OrderAck> {
        self.inner
            .post(
                &format!("accounts/{}/orders", segment(account.as_str())),
                order.into(),
                ResourceKind::Order,
            )
            .await
    }

    /// Validate an order and estimate its cost without placing it.
    ///
    /// `preview=true` is always sent, overriding any `preview` key in `order`.
    pub async fn preview(
        &self,
        account: &AccountId,
        order: impl Into<Params>,
    ) -> Result<OrderPreview> {
        self.inner
            .post(
                &format!("accounts/{}/orders", segment(account.as_str())),
                preview_body(order),
                ResourceKind::Order,
            )
            .await
    }

    /// Modify a working order.
    pub async fn change(
        &self,
        account: &AccountId,
        order_id: &OrderId,
        changes: impl Into<Params>,
    ) -> Result<OrderAck> {
        self.inner
            .put(
                &format!(
                    "accounts/{}/orders/{}",
                    segment(account.as_str()),
                    segment(order_id.as_str())
                ),
                changes.into(),
                ResourceKind::Order,
            )
            .await
    }

    /// Cancel a working order.
    pub async fn cancel(&self, account: &AccountId, order_id: &OrderId) -> Result<OrderAck> {
        self.inner
            .delete(
                &format!(
                    "accounts/{}/orders/{}",
                    segment(account.as_str()),
                    segment(order_id.as_str())
                ),
                ResourceKind::Order,
            )
            .await
    }
}

/// The caller's order with the preview flag forced on.
pub(crate) fn preview_body(order: impl Into<Params>) -> Params {
    order.into().with("preview", true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_flag_added() {
        let body = preview_body("class=equity&symbol=AAPL");
        assert_eq!(body.encode(), "class=equity&symbol=AAPL&preview=true");
    }

    #[test]
    fn test_preview_flag_wins_over_caller_value() {
        let body = preview_body(Params::new().with("preview", false).with("symbol", "AAPL"));
        assert_eq!(body.get("preview"), Some("true"));
        assert_eq!(body.encode(), "preview=true&symbol=AAPL");

        let body = preview_body("preview=false");
        assert_eq!(body.encode(), "preview=true");
    }
}
