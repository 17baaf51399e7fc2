use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::OutboundConfig;
use crate::model::Product;

/// A registration attempt either never reached the registry or was
/// answered with a non-success status. Callers treat the two
/// differently: only a definitive rejection is recorded as failed.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("GS1 registry is unreachable: {0}")]
    Unreachable(String),
    #[error("GS1 registry rejected the request: {status} - {body}")]
    Rejected { status: u16, body: String },
}

impl RegistryError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, RegistryError::Rejected { .. })
    }
}

/// Client for the third-party GS1 identifier registry. One request per call,
/// bounded by the configured timeout, no retries.
#[derive(Debug, Clone)]
pub struct Gs1RegistryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    gtin: &'a str,
    title: &'a str,
    brand: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub reference: String,
    #[serde(default)]
    pub accepted: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegistryStatus {
    pub gtin: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

impl Gs1RegistryClient {
    pub fn new(config: &OutboundConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build GS1 registry HTTP client")?;

        Ok(Self {
            client,
            base_url: config.gs1_registry_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("Authorization", format!("Bearer {}", key)),
            None => req,
        }
    }

    /// Submit a product's GTIN for registration. The caller is responsible for
    /// having validated the GTIN already; the registry rejects invalid ones too.
    pub async fn register_gtin(
        &self,
        product: &Product,
        gtin: &str,
    ) -> Result<RegisterResponse, RegistryError> {
        let endpoint = format!("{}/gtins", self.base_url);
        let request = RegisterRequest {
            gtin,
            title: &product.title,
            brand: product.label_name.as_deref(),
        };

        let response = self
            .authorize(self.client.post(&endpoint).json(&request))
            .send()
            .await
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RegisterResponse>()
            .await
            .map_err(|e| RegistryError::Unreachable(e.to_string()))
    }

    /// Look up the registry's view of a GTIN
    pub async fn check_status(&self, gtin: &str) -> Result<RegistryStatus> {
        let endpoint = format!("{}/gtins/{}", self.base_url, gtin);

        let response = self
            .authorize(self.client.get(&endpoint))
            .send()
            .await
            .context("GS1 registry request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("GS1 registry status lookup failed: {} - {}", status, body);
        }

        response
            .json::<RegistryStatus>()
            .await
            .context("Failed to decode GS1 registry status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_an_answered_refusal_counts_as_rejection() {
        let rejected = RegistryError::Rejected {
            status: 422,
            body: "invalid gtin".to_string(),
        };
        assert!(rejected.is_rejection());

        let unreachable = RegistryError::Unreachable("connection timed out".to_string());
        assert!(!unreachable.is_rejection());
    }
}
