pub mod candle;
pub mod pattern;
pub mod signal;
pub mod trade;
