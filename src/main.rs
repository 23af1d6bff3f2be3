use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::task::JoinSet;

use deriv_signal_bot::config::Config;
use deriv_signal_bot::market_data::{CandleSource, JsonCandleSource};
use deriv_signal_bot::model::candle::Candle;
use deriv_signal_bot::model::signal::SignalResult;
use deriv_signal_bot::pattern::detect_patterns;
use deriv_signal_bot::trade_session::{evaluate_timeframes, TradingSession};

const CONFIG_PATH: &str = "config/default.toml";
const DEFAULT_CANDLE_DIR: &str = "data/candles";
const DEFAULT_BALANCE: f64 = 1_000.0;

struct SymbolReport {
    symbol: String,
    signals: Vec<(String, SignalResult)>,
    latest: Option<Vec<Candle>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load_from_path(Path::new(CONFIG_PATH))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.logging.level)
            }),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let candle_dir = args
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_CANDLE_DIR.to_string());
    let balance: f64 = match args.get(1) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid balance '{}'", raw))?,
        None => DEFAULT_BALANCE,
    };

    let now = Utc::now();
    let session = TradingSession::new(config, now)?;
    if !session.is_trading_time(now.time()) {
        tracing::info!("outside trading hours, nothing to plan");
        return Ok(());
    }

    let source = Arc::new(JsonCandleSource::new(&candle_dir));
    let timeframes = session.config().deriv.timeframes.clone();
    let lookback = session.config().analysis.lookback_periods;

    // one blocking task per symbol
    let mut tasks = JoinSet::new();
    for symbol in session.config().deriv.tradable_symbols() {
        let source = Arc::clone(&source);
        let timeframes = timeframes.clone();
        tasks.spawn_blocking(move || {
            let signals = evaluate_timeframes(source.as_ref(), &symbol, &timeframes, lookback);
            let latest = timeframes
                .first()
                .and_then(|tf| source.fetch(&symbol, tf, 3).ok());
            SymbolReport {
                symbol,
                signals,
                latest,
            }
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        reports.push(joined.context("symbol evaluation task panicked")?);
    }
    reports.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    for report in reports {
        if let Some(candles) = &report.latest {
            for pattern in detect_patterns(candles) {
                tracing::info!(symbol = %report.symbol, pattern = %pattern, "candlestick pattern");
            }
        }
        if !session.due_for_analysis(&report.symbol, now) {
            continue;
        }
        let signals: Vec<SignalResult> = report.signals.into_iter().map(|(_, s)| s).collect();
        match session.plan_trade(&report.symbol, &signals, balance, now) {
            Some(trade) => println!("{}", serde_json::to_string(&trade)?),
            None => tracing::info!(symbol = %report.symbol, "no trade opportunity"),
        }
    }

    session.performance_summary(Utc::now());
    Ok(())
}
