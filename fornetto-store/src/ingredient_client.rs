use async_trait::async_trait;
use fornetto_core::{ClientError, IngredientClient, Order};
use std::time::Duration;
use tracing::debug;

/// HTTP implementation of the ingredient/inventory port.
/// Every call carries the order's full shape (size, thickness, recipe id,
/// customization map) as the pricing/reversal basis. Calls are bounded by a
/// timeout and never retried automatically.
pub struct HttpIngredientClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIngredientClient {
    pub fn new(base_url: String, timeout_ms: u64) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl IngredientClient for HttpIngredientClient {
    async fn price_order(&self, order: &Order) -> Result<i64, ClientError> {
        let url = format!("{}/ingredients/price-order", self.base_url);
        debug!(%url, "pricing order");

        let response = self
            .http
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }

        // The service replies with a bare number of cents.
        response
            .json::<i64>()
            .await
            .map_err(|e| ClientError::Rejected(e.to_string()))
    }

    async fn reverse_order(&self, order: &Order) -> Result<(), ClientError> {
        let url = format!("{}/ingredients/reverse-order", self.base_url);
        debug!(%url, order_id = ?order.id, "reversing order ingredients");

        let response = self
            .http
            .put(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
