//! Current quote models

use chrono::{DateTime, Utc};

/// Snapshot of a symbol's current market state, derived from the
/// price source's quote metadata.
#[derive(Debug, Clone)]
pub struct QuoteSummary {
    pub symbol: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub currency: Option<String>,
    pub market_state: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}
