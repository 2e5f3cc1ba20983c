//! Orders sub-client — query, confirm funding, cancel, edit price ceiling.

use crate::client::SwapbookClient;
use crate::domain::order::wire::{ChunksResponse, MutationResponse, OrderResponse};
use crate::domain::order::{Chunk, Order};
use crate::error::{HttpError, SdkError};
use crate::http::RetryPolicy;
use crate::shared::OrderId;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct MaxPriceBody {
    value: Decimal,
}

pub struct Orders<'a> {
    pub(crate) client: &'a SwapbookClient,
}

impl<'a> Orders<'a> {
    /// Fetch one order. `None` when the backend has no such order.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, SdkError> {
        let url = format!("{}/api/orders/{}", self.client.http.base_url(), id);
        let resp: Result<OrderResponse, HttpError> =
            self.client.http.get(&url, RetryPolicy::Idempotent).await;
        match resp {
            Ok(wire) => Ok(Some(Order::try_from(wire)?)),
            Err(HttpError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch the order's chunks, in backend order.
    pub async fn chunks(&self, id: OrderId) -> Result<Vec<Chunk>, SdkError> {
        let url = format!("{}/api/orders/{}/chunks", self.client.http.base_url(), id);
        let resp: ChunksResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        Ok(Vec::<Chunk>::try_from(resp)?)
    }

    /// Ask the backend to confirm funding and activate the order.
    ///
    /// The backend re-checks the deposit itself; a locally observed
    /// sufficient balance is only the trigger for this call.
    pub async fn confirm_funding(&self, id: OrderId) -> Result<(), SdkError> {
        let url = format!(
            "{}/api/orders/{}/confirm-funding",
            self.client.http.base_url(),
            id
        );
        let resp: MutationResponse = self
            .client
            .http
            .post(&url, &serde_json::json!({}), RetryPolicy::None)
            .await?;
        resp.into_result().map_err(SdkError::Rejected)
    }

    /// Request cancellation. Refund confirmation arrives as a later status
    /// transition (`Cancelled` → `Refunded`).
    pub async fn cancel(&self, id: OrderId) -> Result<(), SdkError> {
        let url = format!("{}/api/orders/{}/cancel", self.client.http.base_url(), id);
        let resp: MutationResponse = self
            .client
            .http
            .post(&url, &serde_json::json!({}), RetryPolicy::None)
            .await?;
        resp.into_result().map_err(SdkError::Rejected)
    }

    /// Update the order's BSV price ceiling.
    ///
    /// Locked and filled chunks keep their already-agreed execution price;
    /// the new ceiling affects `Available`/`Idle` chunks going forward. The
    /// backend enforces this — the SDK only warns.
    pub async fn set_max_price(
        &self,
        id: OrderId,
        value: Decimal,
        locked_count: usize,
    ) -> Result<(), SdkError> {
        if value <= Decimal::ZERO {
            return Err(SdkError::Validation(format!(
                "max price must be positive, got {}",
                value
            )));
        }
        if locked_count > 0 {
            tracing::warn!(
                order_id = %id,
                locked_count,
                "updating price ceiling with locked chunks; agreed prices are unaffected"
            );
        }

        let url = format!(
            "{}/api/orders/{}/max-price",
            self.client.http.base_url(),
            id
        );
        let resp: MutationResponse = self
            .client
            .http
            .post(&url, &MaxPriceBody { value }, RetryPolicy::None)
            .await?;
        resp.into_result().map_err(SdkError::Rejected)
    }
}
