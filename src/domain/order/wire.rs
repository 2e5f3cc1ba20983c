//! Wire types for order and chunk endpoints.

use crate::shared::{serde_util, ChunkId, DepositPrincipal, DepositSubId, OrderId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /api/orders/{id}` response.
#[derive(Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub id: OrderId,
    pub amount_usd: Decimal,
    pub max_bsv_price: Decimal,
    pub status: String,
    #[serde(default, with = "serde_util::timestamp_ms_opt")]
    pub funded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub activation_fee_usd: Option<Decimal>,
    #[serde(default)]
    pub filler_incentive_reserved: Option<Decimal>,
    pub deposit_principal: DepositPrincipal,
    pub deposit_sub_id: DepositSubId,
    pub allow_partial_fill: bool,
    pub total_filled_usd: Decimal,
    pub total_locked_usd: Decimal,
    pub total_idle_usd: Decimal,
    pub refund_count: u32,
    #[serde(with = "serde_util::timestamp_ms")]
    pub created_at: DateTime<Utc>,
}

/// Individual chunk within a chunks response.
#[derive(Deserialize, Debug, Clone)]
pub struct ChunkResponse {
    pub id: ChunkId,
    pub order_id: OrderId,
    pub amount_usd: Decimal,
    pub status: String,
}

/// `GET /api/orders/{id}/chunks` response.
#[derive(Deserialize, Debug, Clone)]
pub struct ChunksResponse {
    pub chunks: Vec<ChunkResponse>,
}

/// Result envelope for mutating calls — tagged `ok` / `error`.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MutationResponse {
    Ok,
    Error { message: String },
}

impl MutationResponse {
    /// Fold the envelope into a `Result`, surfacing the backend message
    /// verbatim.
    pub fn into_result(self) -> Result<(), String> {
        match self {
            MutationResponse::Ok => Ok(()),
            MutationResponse::Error { message } => Err(message),
        }
    }
}
