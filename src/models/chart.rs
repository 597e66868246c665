//! Chart input and output models

use chrono::{DateTime, Utc};

/// A single observation on a price chart.
///
/// `close` is mandatory; records coming back from the price source without a
/// close are dropped before they ever become a `PricePoint`.
#[derive(Debug, Clone)]
pub struct PricePoint {
    pub timestamp: Option<DateTime<Utc>>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PricePoint {
    /// Convenience constructor for a close-only point (tests, synthetic data)
    pub fn from_close(close: f64) -> Self {
        PricePoint {
            timestamp: None,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// One symbol's ordered price history, ascending by timestamp.
#[derive(Debug, Clone)]
pub struct Series {
    /// Display label for legends; falls back to an ordinal when absent
    pub label: Option<String>,
    pub points: Vec<PricePoint>,
}

impl Series {
    pub fn new(label: Option<String>, points: Vec<PricePoint>) -> Self {
        Series { label, points }
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }
}

/// A rendered chart ready for upload.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub title: String,
}
