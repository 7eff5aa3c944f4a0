//! User-level data service (`user/*`).

use std::sync::Arc;

use crate::client::{ClientInner, OneOrMany, Params, ResourceKind};
use crate::models::{Profile, UserAccountEntry};
use crate::Result;

/// Service for data spanning all of the user's accounts.
///
/// Apart from the profile, every resource here answers with one entry per
/// account; the per-account payload is kept as the API sent it.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let profile = client.user().profile().await?;
/// println!("Hello, {}!", profile.name);
///
/// for entry in client.user().balances().await? {
///     println!("{}: {:?}", entry.account_number, entry.data.get("balances"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct UserService {
    inner: Arc<ClientInner>,
}

impl UserService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the user's profile and account list.
    pub async fn profile(&self) -> Result<Profile> {
        self.inner
            .get("user/profile", Params::new(), ResourceKind::Profile)
            .await
    }

    /// Get balances for every account.
    pub async fn balances(&self) -> Result<OneOrMany<UserAccountEntry>> {
        self.per_account("user/balances").await
    }

    /// Get positions for every account.
    pub async fn positions(&self) -> Result<OneOrMany<UserAccountEntry>> {
        self.per_account("user/positions").await
    }

    /// Get history for every account.
    pub async fn history(&self) -> Result<OneOrMany<UserAccountEntry>> {
        self.per_account("user/history").await
    }

    /// Get gain/loss for every account.
    pub async fn gainloss(&self) -> Result<OneOrMany<UserAccountEntry>> {
        self.per_account("user/gainloss").await
    }

    /// Get orders for every account.
    pub async fn orders(&self) -> Result<OneOrMany<UserAccountEntry>> {
        self.per_account("user/orders").await
    }

    async fn per_account(&self, path: &str) -> Result<OneOrMany<UserAccountEntry>> {
        self.inner
            .get(path, Params::new(), ResourceKind::UserAccounts)
            .await
    }
}
