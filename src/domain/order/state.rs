//! Funding/settlement reconciliation — the derived view of one order.
//!
//! [`reconcile`] is pure: it consumes one freshly fetched order/chunk
//! snapshot plus the two balance observations and derives everything the UI
//! and orchestrator act on. Derived state is never patched incrementally;
//! callers re-run this on every new snapshot.
//!
//! The two balances are deliberately distinct types. Funding, shortfall, and
//! refund math use [`OrderDepositBalance`] exclusively; the wallet balance is
//! informational.

use super::{Chunk, ChunkStatus, Order};
use crate::domain::balance::{OrderDepositBalance, WalletBalance};
use crate::shared::fees;
use rust_decimal::Decimal;
use serde::Serialize;

// ─── ChunkCounts ─────────────────────────────────────────────────────────────

/// Chunk tally by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChunkCounts {
    pub filled: usize,
    pub locked: usize,
    pub available: usize,
    pub idle: usize,
    pub refunding: usize,
    pub refunded: usize,
}

impl ChunkCounts {
    pub fn tally(chunks: &[Chunk]) -> Self {
        let mut counts = ChunkCounts::default();
        for chunk in chunks {
            match chunk.status {
                ChunkStatus::Filled => counts.filled += 1,
                ChunkStatus::Locked => counts.locked += 1,
                ChunkStatus::Available => counts.available += 1,
                ChunkStatus::Idle => counts.idle += 1,
                ChunkStatus::Refunding => counts.refunding += 1,
                ChunkStatus::Refunded => counts.refunded += 1,
            }
        }
        counts
    }

    /// Chunks a new price ceiling would apply to.
    pub fn editable(&self) -> usize {
        self.available + self.idle
    }

    /// Chunks eligible for a cancellation refund.
    pub fn refundable(&self) -> usize {
        self.available + self.idle
    }

    pub fn total(&self) -> usize {
        self.filled + self.locked + self.available + self.idle + self.refunding + self.refunded
    }
}

// ─── RefundBreakdown ─────────────────────────────────────────────────────────

/// What a cancellation would return to the maker, itemized.
///
/// Only computed from an observed deposit balance — an un-queried balance
/// yields no breakdown rather than a fictitious zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefundBreakdown {
    /// Σ amount over chunks currently in `Locked` status.
    pub locked_amount: Decimal,
    /// Locked principal grossed up by the filler incentive. Must remain at
    /// the deposit location while counterparties are claiming; off-limits to
    /// the maker even on cancellation.
    pub locked_with_incentive: Decimal,
    /// Activation fee already paid to treasury (funded orders). Shown for
    /// transparency only — it is not part of the deposit balance, so it is
    /// never subtracted here.
    pub activation_fee: Decimal,
    /// Flat network transfer fee, shown when refunding a never-funded
    /// deposit. Display-only.
    pub network_fee: Option<Decimal>,
    /// Amount the backend would actually return. Never negative.
    pub refundable: Decimal,
}

impl RefundBreakdown {
    fn compute(order: &Order, locked_amount: Decimal, deposit: OrderDepositBalance) -> Self {
        let balance = deposit.amount();
        let locked_with_incentive =
            fees::with_percent(locked_amount, fees::filler_incentive_percent());

        let funded = order.is_funded();
        let refundable = if balance <= Decimal::ZERO {
            // Nothing deposited: cancellation is a plain removal, no fund
            // movement.
            Decimal::ZERO
        } else if funded {
            (balance - locked_with_incentive).max(Decimal::ZERO)
        } else {
            // Never reached backend-confirmed funding: whatever was
            // deposited comes back; no locked chunks can exist yet.
            balance
        };

        let activation_fee = if funded {
            fees::percent_of(order.amount_usd, fees::activation_fee_percent())
        } else {
            Decimal::ZERO
        };

        let network_fee = if !funded && balance > Decimal::ZERO {
            Some(fees::network_transfer_fee_usd())
        } else {
            None
        };

        RefundBreakdown {
            locked_amount,
            locked_with_incentive,
            activation_fee,
            network_fee,
            refundable,
        }
    }
}

// ─── OrderFundingView ────────────────────────────────────────────────────────

/// The derived view-model for one order snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderFundingView {
    /// `amount_usd` grossed up by the full maker fee.
    pub total_cost: Decimal,
    /// Backend-recorded fee sum when both components are known, else the
    /// flat estimate.
    pub actual_maker_fee: Decimal,
    /// True only when an observed, non-zero deposit balance falls strictly
    /// short of `total_cost`. An un-queried balance never reports shortfall.
    pub has_shortfall: bool,
    pub shortfall_amount: Option<Decimal>,
    pub chunks: ChunkCounts,
    pub can_cancel: bool,
    pub can_edit_price: bool,
    /// Present iff the deposit balance was observed.
    pub refund: Option<RefundBreakdown>,
    /// Recommendation to request funding confirmation: the order is not yet
    /// backend-funded and the observed deposit covers the total cost.
    pub should_auto_activate: bool,
    pub wallet_balance: Option<WalletBalance>,
    /// Whether the wallet could top up the shortfall; only meaningful when
    /// both a shortfall and a wallet observation exist.
    pub wallet_covers_shortfall: Option<bool>,
}

/// Derive the view-model from one order/chunk snapshot and the latest
/// balance observations.
pub fn reconcile(
    order: &Order,
    chunks: &[Chunk],
    deposit: Option<OrderDepositBalance>,
    wallet: Option<WalletBalance>,
) -> OrderFundingView {
    let total_cost = fees::with_percent(order.amount_usd, fees::maker_fee_percent());
    let actual_maker_fee = recorded_or_estimated_fee(order);

    let counts = ChunkCounts::tally(chunks);
    let locked_amount: Decimal = chunks
        .iter()
        .filter(|c| c.status == ChunkStatus::Locked)
        .map(|c| c.amount_usd)
        .sum();

    let (has_shortfall, shortfall_amount) = match deposit {
        Some(b) if b.amount() > Decimal::ZERO && b.amount() < total_cost => {
            (true, Some(total_cost - b.amount()))
        }
        _ => (false, None),
    };

    let should_auto_activate = order.funded_at.is_none()
        && deposit.is_some_and(|b| b.amount() >= total_cost);

    let refund = deposit.map(|b| RefundBreakdown::compute(order, locked_amount, b));

    // Hard precondition: a funded order whose entire deposit is reserved for
    // in-flight fills cannot be cancelled. Without a balance observation the
    // structural rule stands and the backend stays authoritative.
    let refund_blocked = order.is_funded()
        && refund.is_some_and(|r| r.refundable <= Decimal::ZERO);
    let can_cancel =
        counts.refundable() > 0 && order.status.is_cancellable() && !refund_blocked;

    let can_edit_price = order.is_funded() && counts.editable() > 0;

    let wallet_covers_shortfall = match (wallet, has_shortfall, shortfall_amount) {
        (Some(w), true, Some(gap)) => Some(w.amount() >= gap),
        _ => None,
    };

    OrderFundingView {
        total_cost,
        actual_maker_fee,
        has_shortfall,
        shortfall_amount,
        chunks: counts,
        can_cancel,
        can_edit_price,
        refund,
        should_auto_activate,
        wallet_balance: wallet,
        wallet_covers_shortfall,
    }
}

/// Prefer the backend-recorded fee components when both are present and
/// non-zero; otherwise fall back to the flat estimate. A lone recorded
/// component understates the fee by a whole term, so it does not qualify.
fn recorded_or_estimated_fee(order: &Order) -> Decimal {
    match (order.activation_fee_usd, order.filler_incentive_reserved) {
        (Some(activation), Some(incentive))
            if !activation.is_zero() && !incentive.is_zero() =>
        {
            activation + incentive
        }
        _ => fees::percent_of(order.amount_usd, fees::maker_fee_percent()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use crate::shared::{ChunkId, DepositPrincipal, DepositSubId, OrderId};
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn order(status: OrderStatus, amount: &str, funded: bool) -> Order {
        Order {
            id: OrderId::new(1),
            amount_usd: dec(amount),
            max_bsv_price: dec("52.10"),
            status,
            funded_at: funded.then(Utc::now),
            activation_fee_usd: None,
            filler_incentive_reserved: None,
            deposit_principal: DepositPrincipal::from("principal"),
            deposit_sub_id: DepositSubId::from("order-1"),
            allow_partial_fill: true,
            total_filled_usd: Decimal::ZERO,
            total_locked_usd: Decimal::ZERO,
            total_idle_usd: Decimal::ZERO,
            refund_count: 0,
            created_at: Utc::now(),
        }
    }

    fn chunk(id: i64, amount: &str, status: ChunkStatus) -> Chunk {
        Chunk {
            id: ChunkId::new(id),
            order_id: OrderId::new(1),
            amount_usd: dec(amount),
            status,
        }
    }

    fn deposit(s: &str) -> Option<OrderDepositBalance> {
        Some(OrderDepositBalance::new(dec(s)))
    }

    #[test]
    fn test_total_cost_grosses_up_maker_fee() {
        let view = reconcile(
            &order(OrderStatus::AwaitingDeposit, "90", false),
            &[],
            None,
            None,
        );
        assert_eq!(view.total_cost, dec("96.30"));
        assert_eq!(view.actual_maker_fee, dec("6.30"));
    }

    #[test]
    fn test_recorded_fee_preferred_when_both_components_present() {
        let mut o = order(OrderStatus::Active, "90", true);
        o.activation_fee_usd = Some(dec("2.20"));
        o.filler_incentive_reserved = Some(dec("4.10"));
        let view = reconcile(&o, &[], None, None);
        assert_eq!(view.actual_maker_fee, dec("6.30"));
    }

    #[test]
    fn test_lone_recorded_component_falls_back_to_estimate() {
        let mut o = order(OrderStatus::Active, "90", true);
        o.activation_fee_usd = Some(dec("2.20"));
        o.filler_incentive_reserved = None;
        let view = reconcile(&o, &[], None, None);
        assert_eq!(view.actual_maker_fee, dec("6.30"));

        o.filler_incentive_reserved = Some(Decimal::ZERO);
        let view = reconcile(&o, &[], None, None);
        assert_eq!(view.actual_maker_fee, dec("6.30"));
    }

    #[test]
    fn test_unqueried_balance_suppresses_shortfall_and_refund() {
        let view = reconcile(
            &order(OrderStatus::AwaitingDeposit, "90", false),
            &[chunk(1, "90", ChunkStatus::Available)],
            None,
            None,
        );
        assert!(!view.has_shortfall);
        assert!(view.shortfall_amount.is_none());
        assert!(view.refund.is_none());
        assert!(!view.should_auto_activate);
    }

    #[test]
    fn test_zero_observed_balance_is_not_a_shortfall() {
        let view = reconcile(
            &order(OrderStatus::AwaitingDeposit, "90", false),
            &[],
            deposit("0"),
            None,
        );
        assert!(!view.has_shortfall);
        assert_eq!(view.refund.unwrap().refundable, Decimal::ZERO);
    }

    #[test]
    fn test_shortfall_strictly_below_total_cost() {
        let o = order(OrderStatus::AwaitingDeposit, "90", false);
        let view = reconcile(&o, &[], deposit("50"), None);
        assert!(view.has_shortfall);
        assert_eq!(view.shortfall_amount, Some(dec("46.30")));

        let view = reconcile(&o, &[], deposit("96.30"), None);
        assert!(!view.has_shortfall);
        assert!(view.shortfall_amount.is_none());
    }

    #[test]
    fn test_auto_activate_requires_unfunded_and_covered() {
        let o = order(OrderStatus::AwaitingDeposit, "90", false);
        assert!(reconcile(&o, &[], deposit("96.30"), None).should_auto_activate);
        assert!(reconcile(&o, &[], deposit("100"), None).should_auto_activate);
        assert!(!reconcile(&o, &[], deposit("96.29"), None).should_auto_activate);

        // Already backend-funded: the authoritative flag wins.
        let funded = order(OrderStatus::Active, "90", true);
        assert!(!reconcile(&funded, &[], deposit("200"), None).should_auto_activate);
    }

    #[test]
    fn test_refund_excludes_locked_with_incentive() {
        let o = order(OrderStatus::PartiallyFilled, "90", true);
        let chunks = vec![
            chunk(1, "20", ChunkStatus::Locked),
            chunk(2, "70", ChunkStatus::Available),
        ];
        let view = reconcile(&o, &chunks, deposit("96.30"), None);
        let refund = view.refund.unwrap();
        assert_eq!(refund.locked_amount, dec("20"));
        assert_eq!(refund.locked_with_incentive, dec("20.9"));
        assert_eq!(refund.refundable, dec("75.40"));
        assert!(refund.network_fee.is_none());
        assert_eq!(refund.activation_fee, dec("2.25"));
    }

    #[test]
    fn test_refund_clamped_to_zero() {
        let o = order(OrderStatus::PartiallyFilled, "90", true);
        let chunks = vec![chunk(1, "20", ChunkStatus::Locked)];
        let view = reconcile(&o, &chunks, deposit("10"), None);
        assert_eq!(view.refund.unwrap().refundable, Decimal::ZERO);
    }

    #[test]
    fn test_cancel_disabled_when_everything_reserved() {
        let o = order(OrderStatus::PartiallyFilled, "90", true);
        let chunks = vec![
            chunk(1, "20", ChunkStatus::Locked),
            chunk(2, "70", ChunkStatus::Available),
        ];
        // Deposit exactly covers the locked reservation: nothing refundable.
        let view = reconcile(&o, &chunks, deposit("20.9"), None);
        assert_eq!(view.refund.unwrap().refundable, Decimal::ZERO);
        assert!(!view.can_cancel);
    }

    #[test]
    fn test_unfunded_refund_returns_full_deposit_with_network_fee() {
        let o = order(OrderStatus::AwaitingDeposit, "90", false);
        let view = reconcile(&o, &[chunk(1, "90", ChunkStatus::Available)], deposit("50"), None);
        let refund = view.refund.unwrap();
        assert_eq!(refund.refundable, dec("50"));
        assert_eq!(refund.network_fee, Some(fees::network_transfer_fee_usd()));
        assert_eq!(refund.activation_fee, Decimal::ZERO);
        assert!(view.can_cancel);
    }

    #[test]
    fn test_cancel_requires_refundable_chunks() {
        let o = order(OrderStatus::PartiallyFilled, "90", true);
        let chunks = vec![
            chunk(1, "45", ChunkStatus::Filled),
            chunk(2, "45", ChunkStatus::Locked),
        ];
        let view = reconcile(&o, &chunks, deposit("96.30"), None);
        assert_eq!(view.chunks.refundable(), 0);
        assert!(!view.can_cancel);
    }

    #[test]
    fn test_cancel_requires_cancellable_status() {
        let o = order(OrderStatus::Cancelled, "90", true);
        let chunks = vec![chunk(1, "90", ChunkStatus::Available)];
        let view = reconcile(&o, &chunks, deposit("96.30"), None);
        assert!(!view.can_cancel);
    }

    #[test]
    fn test_edit_price_requires_funded_and_editable() {
        let chunks_locked = vec![
            chunk(1, "45", ChunkStatus::Locked),
            chunk(2, "45", ChunkStatus::Filled),
        ];
        let funded = order(OrderStatus::PartiallyFilled, "90", true);
        assert!(!reconcile(&funded, &chunks_locked, None, None).can_edit_price);

        let chunks_mixed = vec![
            chunk(1, "45", ChunkStatus::Locked),
            chunk(2, "45", ChunkStatus::Idle),
        ];
        assert!(reconcile(&funded, &chunks_mixed, None, None).can_edit_price);

        let unfunded = order(OrderStatus::AwaitingDeposit, "90", false);
        assert!(!reconcile(&unfunded, &chunks_mixed, None, None).can_edit_price);
    }

    #[test]
    fn test_chunk_counts_tally() {
        let chunks = vec![
            chunk(1, "10", ChunkStatus::Filled),
            chunk(2, "10", ChunkStatus::Filled),
            chunk(3, "10", ChunkStatus::Locked),
            chunk(4, "10", ChunkStatus::Available),
            chunk(5, "10", ChunkStatus::Idle),
            chunk(6, "10", ChunkStatus::Refunding),
            chunk(7, "10", ChunkStatus::Refunded),
        ];
        let counts = ChunkCounts::tally(&chunks);
        assert_eq!(counts.filled, 2);
        assert_eq!(counts.locked, 1);
        assert_eq!(counts.editable(), 2);
        assert_eq!(counts.refundable(), 2);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_wallet_covers_shortfall() {
        let o = order(OrderStatus::AwaitingDeposit, "90", false);
        let wallet = Some(WalletBalance::new(dec("100")));
        let view = reconcile(&o, &[], deposit("50"), wallet);
        assert_eq!(view.wallet_covers_shortfall, Some(true));

        let poor = Some(WalletBalance::new(dec("10")));
        let view = reconcile(&o, &[], deposit("50"), poor);
        assert_eq!(view.wallet_covers_shortfall, Some(false));

        // No shortfall → the flag is meaningless and absent.
        let view = reconcile(&o, &[], deposit("96.30"), wallet);
        assert_eq!(view.wallet_covers_shortfall, None);
    }
}
