use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::OutboundConfig;
use crate::model::Payment;

/// Client for the payment processor. Same request/timeout semantics as the
/// registry client: no retries, failures bubble up for a 502.
#[derive(Debug, Clone)]
pub struct PaymentProcessorClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    external_id: &'a str,
    amount_cents: i64,
    currency: &'a str,
    memo: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub reference: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessorStatus {
    pub reference: String,
    pub status: String,
}

impl PaymentProcessorClient {
    pub fn new(config: &OutboundConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build payment processor HTTP client")?;

        Ok(Self {
            client,
            base_url: config.payment_processor_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("Authorization", format!("Bearer {}", key)),
            None => req,
        }
    }

    /// Submit a pending payment; returns the processor's reference
    pub async fn submit_payment(&self, payment: &Payment) -> Result<SubmitResponse> {
        let endpoint = format!("{}/payouts", self.base_url);
        let request = SubmitRequest {
            external_id: &payment.id,
            amount_cents: payment.amount_cents,
            currency: &payment.currency,
            memo: payment.memo.as_deref(),
        };

        let response = self
            .authorize(self.client.post(&endpoint).json(&request))
            .send()
            .await
            .context("Payment processor request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Payment processor rejected payout: {} - {}", status, body);
        }

        response
            .json::<SubmitResponse>()
            .await
            .context("Failed to decode payment processor response")
    }

    /// Current processor-side status for a previously submitted payout
    pub async fn check_payment(&self, reference: &str) -> Result<ProcessorStatus> {
        let endpoint = format!("{}/payouts/{}", self.base_url, reference);

        let response = self
            .authorize(self.client.get(&endpoint))
            .send()
            .await
            .context("Payment processor request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Payment processor status lookup failed: {} - {}", status, body);
        }

        response
            .json::<ProcessorStatus>()
            .await
            .context("Failed to decode payment processor status")
    }
}
