//! Per-account data service (`accounts/{id}/*`).

use std::sync::Arc;

use super::segment;
use crate::client::{ClientInner, OneOrMany, Params, ResourceKind};
use crate::models::{AccountId, Balances, ClosedPosition, HistoryEvent, Order, OrderId, Position};
use crate::Result;

/// Service for a single account's balances, positions, history and orders.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::AccountId;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let account = AccountId::new("VA000001");
///
/// let balances = client.accounts().balances(&account).await?;
/// println!("Equity: {:?}", balances.total_equity);
///
/// for position in client.accounts().positions(&account).await? {
///     println!("{}: {}", position.symbol, position.quantity);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get current balances.
    pub async fn balances(&self, account: &AccountId) -> Result<Balances> {
        self.inner
            .get(
                &format!("accounts/{}/balances", segment(account.as_str())),
                Params::new(),
                ResourceKind::Balances,
            )
            .await
    }

    /// Get open positions.
    pub async fn positions(&self, account: &AccountId) -> Result<OneOrMany<Position>> {
        self.inner
            .get(
                &format!("accounts/{}/positions", segment(account.as_str())),
                Params::new(),
                ResourceKind::Positions,
            )
            .await
    }

    /// Get account activity history.
    pub async fn history(&self, account: &AccountId) -> Result<OneOrMany<HistoryEvent>> {
        self.inner
            .get(
                &format!("accounts/{}/history", segment(account.as_str())),
                Params::new(),
                ResourceKind::AccountHistory,
            )
            .await
    }

    /// Get realized gain/loss on closed positions.
    pub async fn gainloss(&self, account: &AccountId) -> Result<OneOrMany<ClosedPosition>> {
        self.inner
            .get(
                &format!("accounts/{}/gainloss", segment(account.as_str())),
                Params::new(),
                ResourceKind::GainLoss,
            )
            .await
    }

    /// Get the account's orders.
    pub async fn orders(&self, account: &AccountId) -> Result<OneOrMany<Order>> {
        self.inner
            .get(
                &format!("accounts/{}/orders", segment(account.as_str())),
                Params::new(),
                ResourceKind::Orders,
            )
            .await
    }

    /// Get a single order.
    pub async fn order(&self, account: &AccountId, order: &OrderId) -> Result<Order> {
        self.inner
            .get(
                &format!(
                    "accounts/{}/orders/{}",
                    segment(account.as_str()),
                    segment(order.as_str())
                ),
                Params::new(),
                ResourceKind::Order,
            )
            .await
    }
}
