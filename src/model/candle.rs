use serde::{Deserialize, Serialize};

/// One OHLC bar. `high >= max(open, close)` and `low <= min(open, close)` are
/// the caller's responsibility; nothing here enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp_ms: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp_ms: u64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Full high-to-low span of the bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
