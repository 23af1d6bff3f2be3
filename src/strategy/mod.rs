pub mod ensemble_vote;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::indicator::frame::compute_indicators;
use crate::model::candle::Candle;
use crate::model::signal::SignalResult;

pub use ensemble_vote::{EnsembleVote, EnsembleVoteConfig, Vote};

pub const REASON_INSUFFICIENT_DATA: &str = "Insufficient data";

/// Result of evaluating a candle series: either a decision, or the routine
/// "not enough history yet" case.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Ready(SignalResult),
    InsufficientData { required: usize, actual: usize },
}

impl Evaluation {
    /// Collapses the insufficient-data case into the NEUTRAL fallback result.
    pub fn into_signal_result(self) -> SignalResult {
        self.into_signal_result_at(Utc::now())
    }

    pub fn into_signal_result_at(self, timestamp: DateTime<Utc>) -> SignalResult {
        match self {
            Evaluation::Ready(result) => result,
            Evaluation::InsufficientData { .. } => {
                SignalResult::neutral(REASON_INSUFFICIENT_DATA, timestamp)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Evaluation::Ready(_))
    }
}

/// Runs the indicator stack and the weighted vote with `engine`.
pub fn evaluate_series_with(
    engine: &EnsembleVote,
    candles: &[Candle],
    timestamp: DateTime<Utc>,
) -> Evaluation {
    match compute_indicators(candles) {
        Ok(frame) => Evaluation::Ready(engine.evaluate_at(&frame, timestamp)),
        Err(AppError::InsufficientData { required, actual }) => {
            Evaluation::InsufficientData { required, actual }
        }
        Err(err) => {
            // compute_indicators only rejects short input
            tracing::warn!(error = %err, "indicator computation failed");
            Evaluation::InsufficientData {
                required: crate::indicator::MIN_CANDLES,
                actual: candles.len(),
            }
        }
    }
}

pub fn evaluate_series(candles: &[Candle]) -> Evaluation {
    evaluate_series_with(&EnsembleVote::default(), candles, Utc::now())
}

/// Signal for the latest bar of `candles` with the default rule set. Short
/// series resolve to NEUTRAL "Insufficient data" instead of an error.
pub fn get_trading_signal(candles: &[Candle]) -> SignalResult {
    evaluate_series(candles).into_signal_result()
}
