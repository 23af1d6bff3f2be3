use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::AppError;
use crate::model::candle::Candle;

/// Synthetic volatility indices the bot trades.
pub const VOLATILITY_SYMBOLS: [&str; 10] = [
    "R_10", "R_10_1S", "R_25", "R_25_1S", "R_50", "R_50_1S", "R_75", "R_75_1S", "R_100",
    "R_100_1S",
];

/// Source of historical candles. Implementations must return candles sorted
/// by timestamp with no duplicates; volume may be zero-filled.
pub trait CandleSource {
    fn fetch(&self, symbol: &str, timeframe: &str, count: usize) -> Result<Vec<Candle>>;
}

/// Reads `<root>/<SYMBOL>_<timeframe>.json`, each a JSON array of candles.
#[derive(Debug, Clone)]
pub struct JsonCandleSource {
    root: PathBuf,
}

impl JsonCandleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.root.join(format!("{}_{}.json", symbol, timeframe))
    }
}

impl CandleSource for JsonCandleSource {
    fn fetch(&self, symbol: &str, timeframe: &str, count: usize) -> Result<Vec<Candle>> {
        let path = self.path_for(symbol, timeframe);
        let mut candles =
            read_candles(&path).with_context(|| format!("failed to load {}", path.display()))?;
        normalize(&mut candles);
        if candles.is_empty() {
            return Err(AppError::MarketData(format!(
                "no candles for {} {}",
                symbol, timeframe
            ))
            .into());
        }
        let skip = candles.len().saturating_sub(count);
        Ok(candles.split_off(skip))
    }
}

fn read_candles(path: &Path) -> Result<Vec<Candle>, AppError> {
    let payload = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&payload)?)
}

/// Chronological order, first candle kept per timestamp.
pub fn normalize(candles: &mut Vec<Candle>) {
    candles.sort_by_key(|c| c.timestamp_ms);
    candles.dedup_by_key(|c| c.timestamp_ms);
}
