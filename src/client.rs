//! High-level client — `SwapbookClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the accessor methods, and the `OrderBackend`
//! implementation that wires [`crate::domain::order::tracker::OrderTracker`]
//! to the live backend.
//!
//! There is deliberately no order/chunk cache here: trackers re-fetch and
//! wholly replace their snapshots, so serving a stale order would only
//! reintroduce the reconciliation bugs the snapshot model exists to prevent.

use crate::domain::balance::client::Balances;
use crate::domain::balance::{OrderDepositBalance, WalletBalance};
use crate::domain::order::client::Orders;
use crate::domain::order::tracker::OrderBackend;
use crate::domain::order::{Chunk, Order};
use crate::error::SdkError;
use crate::http::SwapbookHttp;
use crate::shared::{DepositPrincipal, DepositSubId, OrderId};

use async_trait::async_trait;
use rust_decimal::Decimal;

// Re-export sub-client types for convenience.
pub use crate::domain::balance::client::Balances as BalancesClient;
pub use crate::domain::order::client::Orders as OrdersClient;

/// The primary entry point for the Swapbook SDK.
///
/// Provides nested sub-client accessors per domain: `client.orders()`,
/// `client.balances()`.
#[derive(Clone)]
pub struct SwapbookClient {
    pub(crate) http: SwapbookHttp,
}

impl SwapbookClient {
    pub fn builder() -> SwapbookClientBuilder {
        SwapbookClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn balances(&self) -> Balances<'_> {
        Balances { client: self }
    }

    /// Set or clear the bearer token used for authenticated calls.
    pub async fn set_auth_token(&self, token: Option<String>) {
        self.http.set_auth_token(token).await;
    }
}

#[async_trait]
impl OrderBackend for SwapbookClient {
    async fn order(&self, id: OrderId) -> Result<Option<Order>, SdkError> {
        self.orders().get(id).await
    }

    async fn chunks(&self, id: OrderId) -> Result<Vec<Chunk>, SdkError> {
        self.orders().chunks(id).await
    }

    async fn deposit_balance(
        &self,
        principal: &DepositPrincipal,
        sub_id: &DepositSubId,
    ) -> Result<OrderDepositBalance, SdkError> {
        self.balances().deposit(principal, sub_id).await
    }

    async fn wallet_balance(&self) -> Result<WalletBalance, SdkError> {
        self.balances().wallet().await
    }

    async fn confirm_funding(&self, id: OrderId) -> Result<(), SdkError> {
        self.orders().confirm_funding(id).await
    }

    async fn cancel_order(&self, id: OrderId) -> Result<(), SdkError> {
        self.orders().cancel(id).await
    }

    async fn set_max_price(
        &self,
        id: OrderId,
        value: Decimal,
        locked_count: usize,
    ) -> Result<(), SdkError> {
        self.orders().set_max_price(id, value, locked_count).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SwapbookClientBuilder {
    base_url: String,
    auth_token: Option<String>,
}

impl Default for SwapbookClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            auth_token: None,
        }
    }
}

impl SwapbookClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Pre-set the bearer token on construction.
    pub fn auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    pub fn build(self) -> Result<SwapbookClient, SdkError> {
        Ok(SwapbookClient {
            http: SwapbookHttp::with_initial_token(&self.base_url, self.auth_token),
        })
    }
}
