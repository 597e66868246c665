//! Yahoo Finance v8 chart endpoint response models

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::models::{PricePoint, QuoteSummary, Series};

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    pub currency: Option<String>,
    pub symbol: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "previousClose")]
    pub previous_close: Option<f64>,
    #[serde(rename = "chartPreviousClose")]
    pub chart_previous_close: Option<f64>,
    #[serde(rename = "marketState")]
    pub market_state: Option<String>,
    #[serde(rename = "regularMarketTime")]
    pub regular_market_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteBlock>,
}

/// Parallel OHLCV arrays; individual entries can be null for halted or
/// partial sessions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteBlock {
    pub open: Option<Vec<Option<f64>>>,
    pub high: Option<Vec<Option<f64>>>,
    pub low: Option<Vec<Option<f64>>>,
    pub close: Option<Vec<Option<f64>>>,
    pub volume: Option<Vec<Option<u64>>>,
}

impl ChartResult {
    /// Build the ordered price series, dropping every record without a
    /// close so downstream mapping never sees a hole.
    pub fn to_series(&self, label: Option<String>) -> Option<Series> {
        let timestamps = self.timestamp.as_ref()?;
        let quote = self.indicators.as_ref()?.quote.first()?;
        let closes = quote.close.as_ref()?;

        let at = |arr: &Option<Vec<Option<f64>>>, i: usize| -> Option<f64> {
            arr.as_ref().and_then(|v| v.get(i).copied().flatten())
        };

        let points: Vec<PricePoint> = timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let close = closes.get(i).copied().flatten()?;
                Some(PricePoint {
                    timestamp: Utc.timestamp_opt(ts, 0).single(),
                    open: at(&quote.open, i),
                    high: at(&quote.high, i),
                    low: at(&quote.low, i),
                    close,
                    volume: quote.volume.as_ref().and_then(|v| v.get(i).copied().flatten()),
                })
            })
            .collect();

        if points.is_empty() {
            return None;
        }
        Some(Series::new(label, points))
    }

    /// Derive the current quote snapshot from the chart metadata.
    pub fn to_quote(&self, symbol: &str) -> Option<QuoteSummary> {
        let current_price = self.meta.regular_market_price?;
        let previous_close = self
            .meta
            .previous_close
            .or(self.meta.chart_previous_close)?;
        let change = current_price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };
        let timestamp: Option<DateTime<Utc>> = self
            .meta
            .regular_market_time
            .and_then(|t| Utc.timestamp_opt(t, 0).single());
        Some(QuoteSummary {
            symbol: symbol.to_string(),
            current_price,
            previous_close,
            change,
            change_percent,
            currency: self.meta.currency.clone(),
            market_state: self.meta.market_state.clone(),
            timestamp,
        })
    }
}

/// Errors from the price source.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Non-success HTTP status
    HttpError(i32, String),
    /// Network/request failure
    RequestError(String),
    /// Body did not parse as the expected shape
    DeserializationError(String),
    /// Response parsed but carried no usable result for the symbol
    NoData(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
            ApiError::NoData(symbol) => write!(f, "No data for symbol {}", symbol),
        }
    }
}
