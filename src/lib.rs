pub mod config;
pub mod error;
pub mod indicator;
pub mod market_data;
pub mod model;
pub mod pattern;
pub mod strategy;
pub mod trade_session;
pub mod trade_stats;

pub use indicator::frame::compute_indicators;
pub use pattern::detect_patterns;
pub use strategy::get_trading_signal;
