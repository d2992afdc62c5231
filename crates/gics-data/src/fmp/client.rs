//! Financial Modeling Prep HTTP client with rate limiting.

use super::{FundamentalsRecord, FundamentalsSource, Statement, normalize_symbol};
use crate::config::ApiKeyConfig;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// FMP stable API base URL
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Default spacing between requests
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(250);

/// Field FMP uses to report failures in a 200 response
const ERROR_FIELD: &str = "Error Message";

/// Keeps consecutive requests at least `min_interval` apart.
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Live FMP client.
pub struct FmpClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the key out of logs.
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FmpClient {
    /// Create a client with the default rate limit.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_rate_limit(api_key, DEFAULT_RATE_LIMIT)
    }

    /// Create a client, resolving the key from configuration.
    pub fn from_config(config: &ApiKeyConfig) -> Result<Self> {
        Self::new(config.resolve()?)
    }

    /// Create a client with a custom minimum interval between requests.
    pub fn with_rate_limit(api_key: impl Into<String>, min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
            base_url: FMP_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at another host, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Request URL for a dataset. `symbol` must already be normalised.
    fn url(&self, statement: Statement, symbol: &str) -> String {
        format!(
            "{}/{}?symbol={}&apikey={}",
            self.base_url,
            statement.endpoint(),
            symbol,
            self.api_key
        )
    }
}

/// Reject FMP's in-band error bodies and empty results.
fn check_payload(symbol: &str, payload: serde_json::Value) -> Result<serde_json::Value> {
    if let Some(message) = payload.get(ERROR_FIELD).and_then(|m| m.as_str()) {
        return Err(DataError::Provider(message.to_string()));
    }
    if payload.as_array().is_some_and(Vec::is_empty) {
        return Err(DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "provider returned no rows".to_string(),
        });
    }
    Ok(payload)
}

#[async_trait]
impl FundamentalsSource for FmpClient {
    fn name(&self) -> &str {
        "Financial Modeling Prep"
    }

    async fn fetch(&self, statement: Statement, symbol: &str) -> Result<FundamentalsRecord> {
        let symbol = normalize_symbol(symbol)?;

        self.rate_limiter.lock().await.wait().await;

        debug!(%symbol, endpoint = statement.endpoint(), "requesting FMP");
        let response = self
            .client
            .get(self.url(statement, &symbol))
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "{} for {symbol}: HTTP {}",
                statement.endpoint(),
                response.status()
            )));
        }

        let payload = check_payload(&symbol, response.json().await?)?;

        Ok(FundamentalsRecord {
            symbol,
            statement,
            fetched_at: Utc::now(),
            payload,
        })
    }
}
