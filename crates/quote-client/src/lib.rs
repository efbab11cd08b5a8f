//! HTTP client for the upstream quote/watchlist JSON API.
//!
//! The upstream owns all market-data sourcing; this client only fetches,
//! decodes and retries. Response shapes live in `dashboard-core`.

use std::time::Duration;

use async_trait::async_trait;
use dashboard_core::{DashboardError, QuoteBoard, QuoteSource, WatchlistBoard};
use reqwest::Client;
use serde::Deserialize;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_WAIT_SECS: u64 = 2;

#[derive(Debug, Deserialize)]
struct PingResponse {
    ok: bool,
}

#[derive(Clone)]
pub struct UpstreamClient {
    base_url: String,
    client: Client,
}

impl UpstreamClient {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with bounded retry on transport errors, 429 and 5xx.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = self.endpoint(path);

        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            let response = match self.client.get(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Upstream {} attempt {}/{} failed: {}", path, attempt, MAX_ATTEMPTS, e);
                    last_err = Some(DashboardError::UpstreamError(e.to_string()));
                    tokio::time::sleep(Duration::from_secs(RETRY_WAIT_SECS)).await;
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                tracing::warn!(
                    "Upstream {} returned {}, retry {}/{}",
                    path,
                    status,
                    attempt,
                    MAX_ATTEMPTS
                );
                last_err = Some(DashboardError::UpstreamError(format!("HTTP {status}")));
                tokio::time::sleep(Duration::from_secs(RETRY_WAIT_SECS)).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(DashboardError::UpstreamError(format!(
                    "HTTP {}: {}",
                    status,
                    body.chars().take(200).collect::<String>()
                )));
            }

            return response
                .json::<T>()
                .await
                .map_err(|e| DashboardError::DecodeError(e.to_string()));
        }

        Err(last_err.unwrap_or_else(|| {
            DashboardError::UpstreamError(format!("{path}: retries exhausted"))
        }))
    }

    /// Liveness probe against the upstream's ping endpoint.
    pub async fn ping(&self) -> Result<bool, DashboardError> {
        let ping: PingResponse = self.get_json("/api/ping").await?;
        Ok(ping.ok)
    }
}

#[async_trait]
impl QuoteSource for UpstreamClient {
    async fn quotes(&self) -> Result<QuoteBoard, DashboardError> {
        self.get_json("/api/quotes").await
    }

    async fn watchlist(&self) -> Result<WatchlistBoard, DashboardError> {
        self.get_json("/api/watchlist").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let client = UpstreamClient::new("https://quotes.example.com/".to_string());
        assert_eq!(
            client.endpoint("/api/quotes"),
            "https://quotes.example.com/api/quotes"
        );

        let bare = UpstreamClient::new("https://quotes.example.com".to_string());
        assert_eq!(bare.endpoint("/api/ping"), "https://quotes.example.com/api/ping");
    }
}
