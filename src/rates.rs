//! Exchange-rate API client
//!
//! Fetches the live TWD-denominated rate table from the configured endpoint.
//! Uses a long-lived reqwest::Client with a bounded timeout; one fetch per
//! user message, no caching.

use crate::error::{BotError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, info};

/// One query's worth of rates: currency code → foreign units per 1 TWD.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Direct key fetch.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}

/// Reusable rate-API client (connection-pooled)
pub struct RateClient {
    client: Client,
    endpoint: String,
}

impl RateClient {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Fetch the current rate table.
    ///
    /// Transport errors, timeouts and malformed JSON all surface as
    /// `RateFetchError`; callers map that to an "unavailable" reply.
    pub async fn fetch(&self) -> Result<RateTable> {
        info!("Fetching exchange rates from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| {
                error!("Rate API request failed: {}", e);
                BotError::RateFetchError(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Rate API returned {}", status);
            return Err(BotError::RateFetchError(format!(
                "unexpected status: {}",
                status
            )));
        }

        let table: RateTable = response.json().await.map_err(|e| {
            error!("Failed to parse rate API response: {}", e);
            BotError::RateFetchError(format!("invalid payload: {}", e))
        })?;

        Ok(table)
    }
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, f64)]) -> RateTable {
        RateTable {
            rates: pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
        }
    }

    #[test]
    fn test_rate_lookup() {
        let t = table(&[("USD", 31.5), ("JPY", 4.6)]);
        assert_eq!(t.rate("USD"), Some(31.5));
        assert_eq!(t.rate("JPY"), Some(4.6));
        assert_eq!(t.rate("GBP"), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(31.5), 31.5);
        assert_eq!(round2(1.0 / 31.5), 0.03);
        assert_eq!(round2(100.0 / 31.5), 3.17);
        assert_eq!(round2(3.14159), 3.14);
    }

    #[test]
    fn test_rate_table_deserialization() {
        let json = r#"{"base":"TWD","rates":{"USD":0.0317,"JPY":4.68}}"#;
        let t: RateTable = serde_json::from_str(json).unwrap();
        assert_eq!(t.rate("USD"), Some(0.0317));
        assert_eq!(t.rate("JPY"), Some(4.68));
    }
}
