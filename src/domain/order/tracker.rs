//! Order tracking — fetch, reconcile, and act on one order.
//!
//! [`OrderTracker`] is the app-owned orchestrator for a single order: it
//! pulls a fresh order/chunk snapshot plus both balance observations, runs
//! [`reconcile`], and issues the mutations the derived view permits. Every
//! operation replaces the snapshot wholesale; nothing is merged into stale
//! derived state, so out-of-order network completions cannot corrupt it.
//!
//! Auto-activation holds an exclusive in-flight token: a second balance
//! observation arriving while a confirmation attempt is pending never issues
//! a second attempt.

use super::state::{reconcile, OrderFundingView};
use super::{Chunk, Order};
use crate::domain::balance::{OrderDepositBalance, WalletBalance};
use crate::error::SdkError;
use crate::shared::{DepositPrincipal, DepositSubId, OrderId};
use async_lock::Mutex;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

/// The backend operations the tracker sequences.
///
/// `SwapbookClient` implements this over HTTP; tests substitute an
/// in-memory backend.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn order(&self, id: OrderId) -> Result<Option<Order>, SdkError>;
    async fn chunks(&self, id: OrderId) -> Result<Vec<Chunk>, SdkError>;
    async fn deposit_balance(
        &self,
        principal: &DepositPrincipal,
        sub_id: &DepositSubId,
    ) -> Result<OrderDepositBalance, SdkError>;
    async fn wallet_balance(&self) -> Result<WalletBalance, SdkError>;
    async fn confirm_funding(&self, id: OrderId) -> Result<(), SdkError>;
    async fn cancel_order(&self, id: OrderId) -> Result<(), SdkError>;
    async fn set_max_price(
        &self,
        id: OrderId,
        value: Decimal,
        locked_count: usize,
    ) -> Result<(), SdkError>;
}

/// One wholly fetched order state plus its derived view.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub order: Order,
    pub chunks: Vec<Chunk>,
    pub deposit_balance: Option<OrderDepositBalance>,
    pub wallet_balance: Option<WalletBalance>,
    pub view: OrderFundingView,
    pub fetched_at: DateTime<Utc>,
}

/// App-owned tracker for a single order.
///
/// Clones share the activation token (so clones cannot double-activate) but
/// hold independent snapshots.
#[derive(Clone)]
pub struct OrderTracker {
    id: OrderId,
    snapshot: Option<OrderSnapshot>,
    activation: Arc<Mutex<()>>,
}

impl OrderTracker {
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            snapshot: None,
            activation: Arc::new(Mutex::new(())),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The most recently fetched snapshot, if any.
    pub fn snapshot(&self) -> Option<&OrderSnapshot> {
        self.snapshot.as_ref()
    }

    /// Fetch fresh state, re-derive the view, and auto-activate when the
    /// observed deposit covers the total cost of a not-yet-funded order.
    ///
    /// Activation attempts are serialized through a single in-flight token;
    /// if one is already pending this refresh returns the derived view
    /// without issuing another. A failed confirmation surfaces as an error —
    /// the order stays `AwaitingDeposit` and a later refresh may re-attempt.
    pub async fn refresh<B: OrderBackend>(
        &mut self,
        backend: &B,
    ) -> Result<OrderFundingView, SdkError> {
        let view = self.fetch_and_derive(backend).await?;

        if view.should_auto_activate {
            match self.activation.try_lock_arc() {
                Some(_token) => {
                    tracing::debug!(order_id = %self.id, "deposit covers total cost; confirming funding");
                    if let Err(e) = backend.confirm_funding(self.id).await {
                        tracing::warn!(order_id = %self.id, error = %e, "funding confirmation failed");
                        return Err(e);
                    }
                    // Authoritative state changed; replace the snapshot.
                    return self.fetch_and_derive(backend).await;
                }
                None => {
                    tracing::debug!(order_id = %self.id, "activation already in flight; not re-issuing");
                }
            }
        }

        Ok(view)
    }

    /// Cancel the order, gated on a freshly derived view.
    pub async fn cancel<B: OrderBackend>(
        &mut self,
        backend: &B,
    ) -> Result<OrderFundingView, SdkError> {
        let view = self.fetch_and_derive(backend).await?;
        if !view.can_cancel {
            return Err(SdkError::Validation(format!(
                "order {} is not cancellable in its current state",
                self.id
            )));
        }
        backend.cancel_order(self.id).await?;
        self.fetch_and_derive(backend).await
    }

    /// Update the price ceiling and re-fetch.
    pub async fn set_max_price<B: OrderBackend>(
        &mut self,
        backend: &B,
        value: Decimal,
    ) -> Result<OrderFundingView, SdkError> {
        let view = self.fetch_and_derive(backend).await?;
        backend
            .set_max_price(self.id, value, view.chunks.locked)
            .await?;
        self.fetch_and_derive(backend).await
    }

    /// Fetch order, chunks, and both balances, then reconcile.
    ///
    /// A failed balance query degrades to an unobserved balance (the view
    /// suppresses funding/refund figures) instead of failing the refresh;
    /// order and chunk fetches are required.
    async fn fetch_and_derive<B: OrderBackend>(
        &mut self,
        backend: &B,
    ) -> Result<OrderFundingView, SdkError> {
        let order = backend
            .order(self.id)
            .await?
            .ok_or_else(|| SdkError::Other(format!("order {} not found", self.id)))?;
        let chunks = backend.chunks(self.id).await?;

        let deposit_balance = match backend
            .deposit_balance(&order.deposit_principal, &order.deposit_sub_id)
            .await
        {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!(order_id = %self.id, error = %e, "deposit balance query failed");
                None
            }
        };
        let wallet_balance = match backend.wallet_balance().await {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!(order_id = %self.id, error = %e, "wallet balance query failed");
                None
            }
        };

        let view = reconcile(&order, &chunks, deposit_balance, wallet_balance);
        self.snapshot = Some(OrderSnapshot {
            order,
            chunks,
            deposit_balance,
            wallet_balance,
            view: view.clone(),
            fetched_at: Utc::now(),
        });
        Ok(view)
    }
}
