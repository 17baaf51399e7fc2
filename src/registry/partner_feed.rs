use anyhow::{Context, Result};
use std::time::Duration;

use crate::model::Partner;

/// Fetches a partner's JSON feed and passes the document through untouched.
/// The platform does not interpret feed contents.
#[derive(Debug, Clone)]
pub struct PartnerFeedClient {
    client: reqwest::Client,
}

impl PartnerFeedClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build partner feed HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch_feed(&self, partner: &Partner) -> Result<serde_json::Value> {
        let feed_url = partner
            .feed_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Partner '{}' has no feed URL configured", partner.name))?;

        let response = self
            .client
            .get(feed_url)
            .send()
            .await
            .with_context(|| format!("Feed request to partner '{}' failed", partner.name))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Partner feed returned {}", status);
        }

        response
            .json::<serde_json::Value>()
            .await
            .with_context(|| format!("Partner '{}' feed is not valid JSON", partner.name))
    }
}
