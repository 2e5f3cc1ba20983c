//! # Swapbook SDK
//!
//! A unified Rust client for the Swapbook USDC/BSV peer-to-peer order book,
//! supporting both native and WASM targets.
//!
//! The backend owns the authoritative order, chunk, and chain-settlement
//! state; this crate owns everything the client needs to reason about it:
//!
//! 1. **Core** — Shared newtypes, domain models, the funding/refund
//!    reconciliation engine (always available, WASM-safe)
//! 2. **HTTP API** — `SwapbookHttp` with per-endpoint retry policies
//! 3. **High-Level Client** — `SwapbookClient` with nested sub-clients
//! 4. **Orchestration** — `OrderTracker`: snapshot refresh, guarded
//!    auto-activation, mutation-then-refetch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swapbook_sdk::prelude::*;
//!
//! let client = SwapbookClient::builder()
//!     .base_url("https://api.swapbook.exchange")
//!     .build()?;
//!
//! let mut tracker = OrderTracker::new(OrderId::new(42));
//! let view = tracker.refresh(&client).await?;
//! if view.can_cancel {
//!     tracker.cancel(&client).await?;
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, fee schedule, serde helpers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `SwapbookClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + fee schedule
    pub use crate::shared::fees;
    pub use crate::shared::{ChunkId, DepositPrincipal, DepositSubId, OrderId};

    // Domain types — balances (two distinct shapes, never interchangeable)
    pub use crate::domain::balance::{OrderDepositBalance, WalletBalance};

    // Domain types — order
    pub use crate::domain::order::{Chunk, ChunkStatus, Order, OrderStatus};

    // Reconciliation engine output
    pub use crate::domain::order::state::{
        reconcile, ChunkCounts, OrderFundingView, RefundBreakdown,
    };

    // Orchestration
    pub use crate::domain::order::tracker::{OrderBackend, OrderSnapshot, OrderTracker};

    // Errors
    pub use crate::error::{DecodeError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        BalancesClient, OrdersClient, SwapbookClient, SwapbookClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
