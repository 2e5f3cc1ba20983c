//! The maker fee schedule.
//!
//! Percentages are fixed protocol parameters: the activation fee is paid to
//! treasury when the backend confirms funding, and the filler incentive is
//! reserved per chunk for whichever filler completes it. The maker fee is
//! their sum. The backend records the actual charged amounts on the order
//! once known; these constants back the client-side estimate until then.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    static ref ACTIVATION_FEE_PERCENT: Decimal = Decimal::from_str("2.5").unwrap();
    static ref FILLER_INCENTIVE_PERCENT: Decimal = Decimal::from_str("4.5").unwrap();
    static ref NETWORK_TRANSFER_FEE_USD: Decimal = Decimal::from_str("0.25").unwrap();
    static ref HUNDRED: Decimal = Decimal::from(100);
}

/// Percentage of `amount_usd` charged to treasury on confirmed funding.
/// Non-refundable once the order is funded.
pub fn activation_fee_percent() -> Decimal {
    *ACTIVATION_FEE_PERCENT
}

/// Percentage of a chunk's amount reserved for the filler who completes it.
pub fn filler_incentive_percent() -> Decimal {
    *FILLER_INCENTIVE_PERCENT
}

/// Total maker fee percentage: activation fee + filler incentive.
pub fn maker_fee_percent() -> Decimal {
    *ACTIVATION_FEE_PERCENT + *FILLER_INCENTIVE_PERCENT
}

/// Flat network transfer fee, shown when refunding a never-funded deposit.
/// Display-only: it does not change the amount the backend moves.
pub fn network_transfer_fee_usd() -> Decimal {
    *NETWORK_TRANSFER_FEE_USD
}

/// Scale a USD amount by a percentage: `amount * percent / 100`.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / *HUNDRED
}

/// Gross up a USD amount by a percentage: `amount * (1 + percent / 100)`.
pub fn with_percent(amount: Decimal, percent: Decimal) -> Decimal {
    amount + percent_of(amount, percent)
}
