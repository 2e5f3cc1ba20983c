//! Conversion: wire responses → domain types (TryFrom + status decoding).
//!
//! Status strings decode into closed sum types. An unrecognized status is a
//! hard error: defaulting would silently misclassify an order the client is
//! about to act on.

use super::wire;
use super::{Chunk, ChunkStatus, Order, OrderStatus};
use crate::error::DecodeError;

impl TryFrom<wire::OrderResponse> for Order {
    type Error = DecodeError;

    fn try_from(source: wire::OrderResponse) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&source.status)
            .ok_or(DecodeError::UnknownOrderStatus(source.status))?;

        Ok(Order {
            id: source.id,
            amount_usd: source.amount_usd,
            max_bsv_price: source.max_bsv_price,
            status,
            funded_at: source.funded_at,
            activation_fee_usd: source.activation_fee_usd,
            filler_incentive_reserved: source.filler_incentive_reserved,
            deposit_principal: source.deposit_principal,
            deposit_sub_id: source.deposit_sub_id,
            allow_partial_fill: source.allow_partial_fill,
            total_filled_usd: source.total_filled_usd,
            total_locked_usd: source.total_locked_usd,
            total_idle_usd: source.total_idle_usd,
            refund_count: source.refund_count,
            created_at: source.created_at,
        })
    }
}

impl TryFrom<wire::ChunkResponse> for Chunk {
    type Error = DecodeError;

    fn try_from(source: wire::ChunkResponse) -> Result<Self, Self::Error> {
        let status = ChunkStatus::from_str(&source.status)
            .ok_or(DecodeError::UnknownChunkStatus(source.status))?;

        Ok(Chunk {
            id: source.id,
            order_id: source.order_id,
            amount_usd: source.amount_usd,
            status,
        })
    }
}

impl TryFrom<wire::ChunksResponse> for Vec<Chunk> {
    type Error = DecodeError;

    fn try_from(source: wire::ChunksResponse) -> Result<Self, Self::Error> {
        source.chunks.into_iter().map(Chunk::try_from).collect()
    }
}
