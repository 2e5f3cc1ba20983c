//! Balance domain — the two balance shapes the backend resolves.
//!
//! An order's dedicated deposit location and the caller's general-purpose
//! wallet are semantically distinct numbers: funding and activation decisions
//! depend on the deposit balance exclusively. They are kept as two separate
//! newtypes so the compiler rejects accidental substitution — never hold
//! either in a bare `Decimal`.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── OrderDepositBalance ─────────────────────────────────────────────────────

/// USD balance resident at an order's dedicated deposit location.
///
/// This is the number funding, shortfall, and refund math runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepositBalance(Decimal);

impl OrderDepositBalance {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl std::fmt::Display for OrderDepositBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── WalletBalance ───────────────────────────────────────────────────────────

/// The caller's general-purpose USD balance.
///
/// Informational in this SDK: it tells the UI whether a shortfall could be
/// topped up, and is deliberately not convertible into
/// [`OrderDepositBalance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance(Decimal);

impl WalletBalance {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for WalletBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
