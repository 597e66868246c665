//! Static watchlist and chart configuration.
//!
//! Slack credentials come from the environment (`SLACK_BOT_TOKEN`,
//! `SLACK_CHANNEL_ID`); everything else is fixed at compile time.

/// A symbol to report on, with its display name.
#[derive(Debug, Clone, Copy)]
pub struct WatchedSymbol {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Individual stocks (Yahoo Finance symbols)
pub const STOCKS: &[WatchedSymbol] = &[WatchedSymbol {
    symbol: "215A.T",
    name: "タイミー",
}];

/// Market indices
pub const INDICES: &[WatchedSymbol] = &[
    WatchedSymbol {
        symbol: "^N225",
        name: "日経平均株価",
    },
    WatchedSymbol {
        symbol: "^TPX",
        name: "TOPIX",
    },
];

/// Canvas size and history window for rendered charts.
#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub range: &'static str,
    pub interval: &'static str,
}

pub const CHART: ChartConfig = ChartConfig {
    width: 800,
    height: 400,
    range: "1mo",
    interval: "1d",
};

pub const SLACK_TOKEN_VAR: &str = "SLACK_BOT_TOKEN";
pub const SLACK_CHANNEL_VAR: &str = "SLACK_CHANNEL_ID";
