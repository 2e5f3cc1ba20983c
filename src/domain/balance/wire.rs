//! Wire types for balance queries.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /api/balances` response.
#[derive(Deserialize, Debug, Clone)]
pub struct BalanceResponse {
    pub balance: Decimal,
}
