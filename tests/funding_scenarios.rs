//! End-to-end reconciliation scenarios, run through the public API.
//!
//! Each scenario builds one order/chunk snapshot, feeds it to the engine the
//! way the tracker does, and checks the full derived view.

use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;
use swapbook_sdk::prelude::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn order(amount: &str, funded: bool) -> Order {
    Order {
        id: OrderId::new(7),
        amount_usd: dec(amount),
        max_bsv_price: dec("52.10"),
        status: if funded {
            OrderStatus::Active
        } else {
            OrderStatus::AwaitingDeposit
        },
        funded_at: funded.then(Utc::now),
        activation_fee_usd: None,
        filler_incentive_reserved: None,
        deposit_principal: DepositPrincipal::from("swap-deposit-7f3a"),
        deposit_sub_id: DepositSubId::from("order-7"),
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
        order_id: OrderId::new(7),
        amount_usd: dec(amount),
        status,
    }
}

fn observed(s: &str) -> Option<OrderDepositBalance> {
    Some(OrderDepositBalance::new(dec(s)))
}

/// A 90 USD order with the full 7% maker fee deposited is ready to activate.
#[test]
fn scenario_exact_deposit_triggers_activation() {
    let o = order("90", false);
    let chunks = [chunk(1, "90", ChunkStatus::Available)];
    let view = reconcile(&o, &chunks, observed("96.30"), None);

    assert_eq!(view.total_cost, dec("96.30"));
    assert!(view.should_auto_activate);
    assert!(!view.has_shortfall);
}

/// The same order with a partial deposit reports the exact gap.
#[test]
fn scenario_partial_deposit_reports_shortfall() {
    let o = order("90", false);
    let chunks = [chunk(1, "90", ChunkStatus::Available)];
    let view = reconcile(&o, &chunks, observed("50"), None);

    assert!(view.has_shortfall);
    assert_eq!(view.shortfall_amount, Some(dec("46.30")));
    assert!(!view.should_auto_activate);
}

/// A funded order with one locked 20 USD chunk keeps the chunk plus its
/// 4.5% filler incentive out of the refund.
#[test]
fn scenario_locked_chunk_reserved_from_refund() {
    let o = order("90", true);
    let chunks = [
        chunk(1, "20", ChunkStatus::Locked),
        chunk(2, "70", ChunkStatus::Available),
    ];
    let view = reconcile(&o, &chunks, observed("96.30"), None);

    let refund = view.refund.expect("balance observed");
    assert_eq!(refund.locked_with_incentive, dec("20.9"));
    assert_eq!(refund.refundable, dec("75.40"));
    assert!(view.can_cancel);
}

/// When the deposit only covers the locked reservation, nothing is
/// refundable and cancellation is disabled outright.
#[test]
fn scenario_fully_reserved_deposit_blocks_cancellation() {
    let o = order("90", true);
    let chunks = [
        chunk(1, "20", ChunkStatus::Locked),
        chunk(2, "70", ChunkStatus::Available),
    ];
    let view = reconcile(&o, &chunks, observed("20.9"), None);

    let refund = view.refund.expect("balance observed");
    assert_eq!(refund.refundable, Decimal::ZERO);
    assert!(!view.can_cancel);
}

/// Cancelling a never-funded order with an empty deposit location moves no
/// funds: it is a plain removal.
#[test]
fn scenario_empty_unfunded_deposit_cancels_as_removal() {
    let o = order("90", false);
    let chunks = [chunk(1, "90", ChunkStatus::Available)];
    let view = reconcile(&o, &chunks, observed("0"), None);

    let refund = view.refund.expect("balance observed");
    assert_eq!(refund.refundable, Decimal::ZERO);
    assert!(refund.network_fee.is_none());
    assert!(!view.has_shortfall);
    assert!(view.can_cancel);
}

/// An un-queried balance renders no definite funding figures at all.
#[test]
fn scenario_unqueried_balance_suppresses_figures() {
    let o = order("90", false);
    let chunks = [chunk(1, "90", ChunkStatus::Available)];
    let view = reconcile(&o, &chunks, None, Some(WalletBalance::new(dec("500"))));

    assert!(!view.has_shortfall);
    assert!(view.shortfall_amount.is_none());
    assert!(view.refund.is_none());
    assert!(!view.should_auto_activate);
    assert_eq!(view.wallet_covers_shortfall, None);
}
