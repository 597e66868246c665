//! One reporting cycle: fetch quotes and history, render charts, and post
//! everything to Slack. A failed chart never aborts the other charts.

use chrono::{FixedOffset, Utc};
use tracing::{info, warn};

use crate::api::slack::{SlackError, SlackNotifier};
use crate::api::yahoo::YahooFinanceClient;
use crate::chart::ChartRenderer;
use crate::config::{ChartConfig, WatchedSymbol};
use crate::models::{ChartImage, QuoteSummary, Series};

/// Outcome counters for one reporting cycle.
#[derive(Debug, Default)]
pub struct ReportSummary {
    pub quotes_fetched: usize,
    pub charts_generated: usize,
    pub charts_failed: usize,
}

/// Fetch current quotes for the watchlist, skipping symbols that fail.
/// A price-source failure means "no data", never a cycle abort.
pub async fn fetch_quotes(
    fetcher: &YahooFinanceClient,
    symbols: &[WatchedSymbol],
) -> Vec<QuoteSummary> {
    let mut quotes = Vec::with_capacity(symbols.len());
    for entry in symbols {
        match fetcher.get_current_quote(entry.symbol).await {
            Ok(quote) => quotes.push(quote),
            Err(e) => warn!("Error fetching quote for {}: {}", entry.symbol, e),
        }
    }
    quotes
}

/// Fetch the charting history for one symbol, downgrading failures to None.
pub async fn fetch_series(
    fetcher: &YahooFinanceClient,
    symbol: &str,
    chart: &ChartConfig,
) -> Option<Series> {
    match fetcher
        .get_historical_series(symbol, chart.range, chart.interval)
        .await
    {
        Ok(series) => Some(series),
        Err(e) => {
            warn!("Error fetching history for {}: {}", symbol, e);
            None
        }
    }
}

/// Slack-safe filename for a symbol's chart.
fn chart_filename(symbol: &str) -> String {
    format!("{}_chart.png", symbol.replace('^', "").replace('.', "_"))
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Build the market summary text: indices first, then individual stocks,
/// each line with a trend emoji and the signed change.
pub fn format_market_message(stocks: &[QuoteSummary], indices: &[QuoteSummary]) -> String {
    let jst = Utc::now().with_timezone(&FixedOffset::east_opt(9 * 3600).expect("valid JST offset"));
    let mut message = format!("📈 *株価情報* ({})\n\n", jst.format("%Y年%-m月%-d日 %H:%M"));

    if !indices.is_empty() {
        message.push_str("*📊 主要指数*\n");
        for quote in indices {
            message.push_str(&quote_line(quote));
        }
        message.push('\n');
    }

    if !stocks.is_empty() {
        message.push_str("*🏢 個別銘柄*\n");
        for quote in stocks {
            message.push_str(&quote_line(quote));
        }
    }

    message
}

fn quote_line(quote: &QuoteSummary) -> String {
    let icon = if quote.change >= 0.0 { "📈" } else { "📉" };
    format!(
        "{} *{}*: {} ({} / {}%)\n",
        icon,
        quote.symbol,
        crate::utils::format_currency(quote.current_price),
        signed(quote.change),
        signed(quote.change_percent),
    )
}

/// Render one line chart per watched symbol. Render failures are collected
/// as textual notices instead of images so the notification still goes out.
pub async fn build_charts(
    fetcher: &YahooFinanceClient,
    renderer: &ChartRenderer,
    watchlist: &[(&WatchedSymbol, &str)],
    chart: &ChartConfig,
) -> (Vec<ChartImage>, Vec<String>) {
    let mut images = Vec::new();
    let mut failures = Vec::new();

    for (entry, title_suffix) in watchlist {
        let Some(series) = fetch_series(fetcher, entry.symbol, chart).await else {
            failures.push(format!("⚠️ {} のデータが取得できませんでした", entry.name));
            continue;
        };
        let title = format!("{} ({})", entry.name, entry.symbol);
        match renderer.render_line_chart(&series, &title).await {
            Ok(bytes) => images.push(ChartImage {
                bytes,
                filename: chart_filename(entry.symbol),
                title: format!("{}{}", entry.name, title_suffix),
            }),
            Err(e) => {
                warn!("Chart render failed for {}: {}", entry.symbol, e);
                failures.push(format!("⚠️ {} のチャート生成に失敗しました", entry.name));
            }
        }
    }

    (images, failures)
}

/// Run one full reporting cycle.
pub async fn run_report(
    fetcher: &YahooFinanceClient,
    renderer: &ChartRenderer,
    notifier: &SlackNotifier,
    stocks: &[WatchedSymbol],
    indices: &[WatchedSymbol],
    chart: &ChartConfig,
) -> Result<ReportSummary, SlackError> {
    info!("Fetching current prices...");
    let stock_quotes = fetch_quotes(fetcher, stocks).await;
    let index_quotes = fetch_quotes(fetcher, indices).await;

    info!("Generating charts...");
    let watchlist: Vec<(&WatchedSymbol, &str)> = stocks
        .iter()
        .map(|s| (s, "の株価チャート"))
        .chain(indices.iter().map(|s| (s, "のチャート")))
        .collect();
    let (images, failures) = build_charts(fetcher, renderer, &watchlist, chart).await;

    let mut message = format_market_message(&stock_quotes, &index_quotes);
    if !failures.is_empty() {
        message.push('\n');
        for notice in &failures {
            message.push_str(notice);
            message.push('\n');
        }
    }

    info!("Sending notification to Slack...");
    notifier.send_message_with_images(&message, &images).await?;

    let summary = ReportSummary {
        quotes_fetched: stock_quotes.len() + index_quotes.len(),
        charts_generated: images.len(),
        charts_failed: failures.len(),
    };
    info!(
        "Report complete: {} quotes, {} charts, {} failures",
        summary.quotes_fetched, summary.charts_generated, summary.charts_failed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, change: f64) -> QuoteSummary {
        QuoteSummary {
            symbol: symbol.to_string(),
            current_price: 38742.0,
            previous_close: 38742.0 - change,
            change,
            change_percent: change / (38742.0 - change) * 100.0,
            currency: Some("JPY".to_string()),
            market_state: Some("CLOSED".to_string()),
            timestamp: None,
        }
    }

    #[test]
    fn test_message_sections() {
        let message = format_market_message(&[quote("215A.T", 12.0)], &[quote("^N225", -120.5)]);
        assert!(message.contains("*📊 主要指数*"));
        assert!(message.contains("*🏢 個別銘柄*"));
        assert!(message.contains("*^N225*"));
        assert!(message.contains("*215A.T*"));
    }

    #[test]
    fn test_quote_line_trend_icons_and_signs() {
        let up = quote_line(&quote("UP", 12.0));
        assert!(up.starts_with("📈"));
        assert!(up.contains("+12.00"));

        let down = quote_line(&quote("DOWN", -120.5));
        assert!(down.starts_with("📉"));
        assert!(down.contains("-120.50"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let message = format_market_message(&[], &[]);
        assert!(!message.contains("主要指数"));
        assert!(!message.contains("個別銘柄"));
    }

    #[test]
    fn test_chart_filename_strips_symbol_punctuation() {
        assert_eq!(chart_filename("215A.T"), "215A_T_chart.png");
        assert_eq!(chart_filename("^N225"), "N225_chart.png");
    }
}
