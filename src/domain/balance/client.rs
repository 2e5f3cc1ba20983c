//! Balances sub-client — the two `getBalance` call shapes.

use crate::client::SwapbookClient;
use crate::domain::balance::wire::BalanceResponse;
use crate::domain::balance::{OrderDepositBalance, WalletBalance};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::{DepositPrincipal, DepositSubId};

pub struct Balances<'a> {
    pub(crate) client: &'a SwapbookClient,
}

impl<'a> Balances<'a> {
    /// Balance at an order's dedicated deposit location.
    pub async fn deposit(
        &self,
        principal: &DepositPrincipal,
        sub_id: &DepositSubId,
    ) -> Result<OrderDepositBalance, SdkError> {
        let url = format!(
            "{}/api/balances?principal={}&sub_id={}",
            self.client.http.base_url(),
            urlencoding::encode(principal.as_str()),
            urlencoding::encode(sub_id.as_str())
        );
        let resp: BalanceResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        Ok(OrderDepositBalance::new(resp.balance))
    }

    /// The caller's general-purpose balance.
    pub async fn wallet(&self) -> Result<WalletBalance, SdkError> {
        let url = format!("{}/api/balances", self.client.http.base_url());
        let resp: BalanceResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        Ok(WalletBalance::new(resp.balance))
    }
}
