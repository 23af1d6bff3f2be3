use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("insufficient data: need at least {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid signal value: {0}")]
    InvalidSignalValue(String),

    #[error("invalid signal result: {0}")]
    InvalidSignalResult(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("market data error: {0}")]
    MarketData(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
