use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod chart;
mod config;
mod models;
mod services;
mod utils;

use api::slack::SlackNotifier;
use api::yahoo::YahooFinanceClient;
use chart::ChartRenderer;
use services::{calendar_service, report_service};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("kabubot=debug".parse().expect("valid directive")),
        )
        .with_target(true)
        .init();

    info!("📈 Starting kabubot stock price notification...");

    let token = match std::env::var(config::SLACK_TOKEN_VAR) {
        Ok(v) => v,
        Err(_) => {
            error!("{} not set", config::SLACK_TOKEN_VAR);
            std::process::exit(1);
        }
    };
    let channel_id = match std::env::var(config::SLACK_CHANNEL_VAR) {
        Ok(v) => v,
        Err(_) => {
            error!("{} not set", config::SLACK_CHANNEL_VAR);
            std::process::exit(1);
        }
    };

    // Skip the whole cycle when the Tokyo market is closed
    if let Some(reason) = calendar_service::market_closed_reason(calendar_service::today_jst()) {
        info!("{} - skipping report", reason);
        return;
    }

    let fetcher = YahooFinanceClient::new();
    let renderer = ChartRenderer::new(config::CHART.width, config::CHART.height);
    let notifier = SlackNotifier::new(token, channel_id);

    match report_service::run_report(
        &fetcher,
        &renderer,
        &notifier,
        config::STOCKS,
        config::INDICES,
        &config::CHART,
    )
    .await
    {
        Ok(summary) => {
            info!(
                "Stock price notification completed: {} quotes, {} charts ({} failed)",
                summary.quotes_fetched, summary.charts_generated, summary.charts_failed
            );
        }
        Err(e) => {
            error!("Report cycle failed: {}", e);
            if let Err(notify_err) = notifier.send_error_message(&e.to_string()).await {
                error!("Failed to send error notification to Slack: {}", notify_err);
            }
            std::process::exit(1);
        }
    }
}
