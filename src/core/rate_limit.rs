use crate::domain::model::RateLimitStatus;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct RateLimitEnvelope {
    rate: RateLimitStatus,
}

/// Queries the quota endpoint before each page fetch and suspends the caller
/// until the reset time when the quota is exhausted.
pub struct RateLimitGuard {
    client: Client,
    api_base: String,
    token: String,
    timeout: Duration,
}

impl RateLimitGuard {
    pub fn new(client: Client, api_base: String, token: String, timeout: Duration) -> Self {
        Self {
            client,
            api_base,
            token,
            timeout,
        }
    }

    /// Blocks only when the quota is exhausted. A failed quota query fails
    /// open: the fetch proceeds and relies on the next request's own failure
    /// path.
    pub async fn wait_if_exhausted(&self) {
        let status = match self.fetch_status().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Failed to fetch rate limit: {}", e);
                return;
            }
        };

        if let Some(delay) = delay_until_reset(&status, Utc::now()) {
            tracing::info!(
                "Rate limit exceeded. Waiting {:.2} seconds...",
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn fetch_status(&self) -> Result<RateLimitStatus> {
        let response = self
            .client
            .get(format!("{}/rate_limit", self.api_base))
            .header(AUTHORIZATION, format!("token {}", self.token))
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let envelope: RateLimitEnvelope = response.json().await?;
        Ok(envelope.rate)
    }
}

/// Time to suspend before the next request, or `None` while quota remains.
/// The wait is (reset - now), clamped to zero when the reset time has already
/// passed. The caller does not re-check after waking.
pub fn delay_until_reset(status: &RateLimitStatus, now: DateTime<Utc>) -> Option<Duration> {
    if status.remaining > 0 {
        return None;
    }

    let reset = DateTime::from_timestamp(status.reset, 0)?;
    Some((reset - now).to_std().unwrap_or(Duration::ZERO))
}
