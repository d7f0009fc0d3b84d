use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::cache::Cache;
use crate::core::rates::RateProvider;

/// How long a fetched base table stays fresh before refetching.
const RATE_TTL: Duration = Duration::from_secs(3600);

/// Rate source backed by the exchangerate-api `latest` endpoint. One batched
/// request serves every currency in a command; the response is cached per
/// base currency.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
    cache: Arc<Cache<String, HashMap<String, f64>>>,
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

impl ExchangeRateApiProvider {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        cache: Arc<Cache<String, HashMap<String, f64>>>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("subtrack/1.0")
            .timeout(timeout)
            .build()?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            client,
            cache,
        })
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "RateFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn fetch_base_table(&self, base: &str) -> Result<HashMap<String, f64>> {
        if let Some(cached) = self.cache.get(&base.to_string()).await {
            return Ok(cached);
        }

        let url = format!("{}/v4/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rates response for {}: {}", base, e))?;

        self.cache
            .put(base.to_string(), data.rates.clone(), Some(RATE_TTL))
            .await;

        Ok(data.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v4/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(base_url: &str, timeout: Duration) -> ExchangeRateApiProvider {
        ExchangeRateApiProvider::new(base_url, timeout, Arc::new(Cache::new()))
            .expect("Failed to build provider")
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{
            "base": "INR",
            "rates": {
                "INR": 1,
                "USD": 0.012,
                "EUR": 0.011
            }
        }"#;

        let mock_server = create_mock_server("INR", mock_response).await;
        let provider = provider(&mock_server.uri(), Duration::from_secs(5));

        let table = provider.fetch_base_table("INR").await.unwrap();
        assert_eq!(table.get("USD"), Some(&0.012));
        assert_eq!(table.get("EUR"), Some(&0.011));
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/INR"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri(), Duration::from_secs(5));
        let result = provider.fetch_base_table("INR").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: INR"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        // "quotes" instead of "rates"
        let mock_response = r#"{"quotes": {}}"#;
        let mock_server = create_mock_server("INR", mock_response).await;
        let provider = provider(&mock_server.uri(), Duration::from_secs(5));

        let result = provider.fetch_base_table("INR").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse rates response for INR")
        );
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let mock_response = r#"{"rates": {"USD": 0.012}}"#;
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/INR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri(), Duration::from_secs(5));
        let first = provider.fetch_base_table("INR").await.unwrap();
        let second = provider.fetch_base_table("INR").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_response = r#"{"rates": {"USD": 0.012}}"#;
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/INR"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(mock_response)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let provider = provider(&mock_server.uri(), Duration::from_millis(50));
        let result = provider.fetch_base_table("INR").await;
        assert!(result.is_err());
    }
}
