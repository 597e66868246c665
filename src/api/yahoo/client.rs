use reqwest::Client as HttpClient;

use super::models::{ApiError, ChartResponse, ChartResult};
use crate::models::{QuoteSummary, Series};

/// Yahoo Finance chart API client, the bot's only price source.
pub struct YahooFinanceClient {
    http_client: HttpClient,
    base_url: String,
}

impl YahooFinanceClient {
    const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/v8/finance/chart";

    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    async fn fetch_chart(&self, url: &str) -> Result<ChartResult, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16() as i32;
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpError(status, body));
        }

        let parsed = response
            .json::<ChartResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        parsed
            .chart
            .result
            .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
            .ok_or_else(|| ApiError::NoData(url.to_string()))
    }

    /// GET /{symbol}
    ///
    /// Current quote for a symbol, derived from the chart metadata.
    pub async fn get_current_quote(&self, symbol: &str) -> Result<QuoteSummary, ApiError> {
        let url = format!("{}/{}", self.base_url, symbol);
        let result = self.fetch_chart(&url).await?;
        result
            .to_quote(symbol)
            .ok_or_else(|| ApiError::NoData(symbol.to_string()))
    }

    /// GET /{symbol}?range={range}&interval={interval}
    ///
    /// Historical OHLCV series for charting. Records without a close are
    /// dropped during conversion; an entirely empty result is `NoData`.
    pub async fn get_historical_series(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Series, ApiError> {
        let url = format!(
            "{}/{}?range={}&interval={}",
            self.base_url, symbol, range, interval
        );
        let result = self.fetch_chart(&url).await?;
        result
            .to_series(Some(symbol.to_string()))
            .ok_or_else(|| ApiError::NoData(symbol.to_string()))
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}
