//! Data models shared across services and API clients

pub mod chart;
pub mod price;

pub use chart::{ChartImage, PricePoint, Series};
pub use price::QuoteSummary;
