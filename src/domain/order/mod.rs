//! Order domain — orders, chunks, funding reconciliation.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod tracker;
pub mod wire;

use crate::shared::{ChunkId, DepositPrincipal, DepositSubId, OrderId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::{reconcile, ChunkCounts, OrderFundingView, RefundBreakdown};

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Order lifecycle status. Backend-driven; the client only observes.
///
/// `Active` and `Idle` are both "funded, price-sensitive" — the backend flips
/// between them as the market price crosses the order's ceiling. `Cancelled`
/// is transient pending refund confirmation; `Filled` and `Refunded` are
/// terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    AwaitingDeposit,
    Active,
    Idle,
    PartiallyFilled,
    Filled,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::AwaitingDeposit => "AwaitingDeposit",
            OrderStatus::Active => "Active",
            OrderStatus::Idle => "Idle",
            OrderStatus::PartiallyFilled => "PartiallyFilled",
            OrderStatus::Filled => "Filled",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AwaitingDeposit" => Some(OrderStatus::AwaitingDeposit),
            "Active" => Some(OrderStatus::Active),
            "Idle" => Some(OrderStatus::Idle),
            "PartiallyFilled" => Some(OrderStatus::PartiallyFilled),
            "Filled" => Some(OrderStatus::Filled),
            "Cancelled" => Some(OrderStatus::Cancelled),
            "Refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }

    /// No further transitions from these states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Refunded)
    }

    /// States from which a user-initiated cancellation may be requested.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            OrderStatus::AwaitingDeposit
                | OrderStatus::Active
                | OrderStatus::Idle
                | OrderStatus::PartiallyFilled
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── ChunkStatus ─────────────────────────────────────────────────────────────

/// Chunk lifecycle status.
///
/// A `Locked` chunk has a trade price already agreed with a filler: its value
/// (principal + filler incentive) is off-limits to the maker until the fill
/// completes or the lock releases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChunkStatus {
    Available,
    Locked,
    Filled,
    Idle,
    Refunding,
    Refunded,
}

impl ChunkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStatus::Available => "Available",
            ChunkStatus::Locked => "Locked",
            ChunkStatus::Filled => "Filled",
            ChunkStatus::Idle => "Idle",
            ChunkStatus::Refunding => "Refunding",
            ChunkStatus::Refunded => "Refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(ChunkStatus::Available),
            "Locked" => Some(ChunkStatus::Locked),
            "Filled" => Some(ChunkStatus::Filled),
            "Idle" => Some(ChunkStatus::Idle),
            "Refunding" => Some(ChunkStatus::Refunding),
            "Refunded" => Some(ChunkStatus::Refunded),
            _ => None,
        }
    }

    /// A new price ceiling applies only to chunks without an agreed price.
    pub fn is_editable(&self) -> bool {
        matches!(self, ChunkStatus::Available | ChunkStatus::Idle)
    }

    /// Only unlocked, unfilled chunks are eligible for cancellation refunds.
    pub fn is_refundable(&self) -> bool {
        matches!(self, ChunkStatus::Available | ChunkStatus::Idle)
    }
}

impl std::fmt::Display for ChunkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A validated, domain-level sell order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Nominal order size in USD. Immutable once set.
    pub amount_usd: Decimal,
    /// Ceiling price per BSV. Mutable while editable chunks remain.
    pub max_bsv_price: Decimal,
    pub status: OrderStatus,
    /// Backend-authoritative funded flag. A locally observed sufficient
    /// balance is a trigger to request confirmation, never a substitute.
    pub funded_at: Option<DateTime<Utc>>,
    /// Recorded by the backend once charged; estimate from the fee schedule
    /// while absent.
    pub activation_fee_usd: Option<Decimal>,
    pub filler_incentive_reserved: Option<Decimal>,
    pub deposit_principal: DepositPrincipal,
    pub deposit_sub_id: DepositSubId,
    pub allow_partial_fill: bool,
    // Backend-maintained counters, read-only here.
    pub total_filled_usd: Decimal,
    pub total_locked_usd: Decimal,
    pub total_idle_usd: Decimal,
    pub refund_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Whether the backend has confirmed sufficient deposit.
    pub fn is_funded(&self) -> bool {
        self.funded_at.is_some()
    }
}

// ─── Chunk ───────────────────────────────────────────────────────────────────

/// A partitionable slice of an order's amount, independently fillable.
///
/// Owned by its order; the client classifies and aggregates chunks but never
/// mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub order_id: OrderId,
    pub amount_usd: Decimal,
    pub status: ChunkStatus,
}
