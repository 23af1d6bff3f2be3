pub mod directional;
pub mod ema;
pub mod frame;
pub mod oscillators;
pub mod rolling;
pub mod sma;
pub mod volatility;

pub use frame::{compute_indicators, IndicatorFrame, IndicatorRow, MIN_CANDLES};
