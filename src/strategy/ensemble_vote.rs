use chrono::{DateTime, Utc};

use crate::indicator::frame::{IndicatorFrame, IndicatorRow};
use crate::model::signal::{Signal, SignalResult, Targets};

pub const REASON_RANGING: &str = "Market is ranging";
pub const REASON_NO_CONFIRMATION: &str = "No strong confirmation";

/// Thresholds and weights of the weighted multi-indicator vote.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleVoteConfig {
    pub adx_trend_threshold: f64,
    pub reversal_lookback: usize,
    pub reversal_band: f64,
    pub reversal_rsi_bullish: f64,
    pub reversal_rsi_bearish: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stoch_oversold: f64,
    pub stoch_overbought: f64,
    pub decision_threshold: f64,
    pub stop_loss_atr: f64,
    pub take_profit_atr: f64,
    pub weight_reversal: f64,
    pub weight_rsi: f64,
    pub weight_ma_cross: f64,
    pub weight_long_trend: f64,
    pub weight_macd_cross: f64,
    pub weight_bollinger: f64,
    pub weight_stochastic: f64,
}

impl Default for EnsembleVoteConfig {
    fn default() -> Self {
        Self {
            adx_trend_threshold: 25.0,
            reversal_lookback: 20,
            reversal_band: 0.005,
            reversal_rsi_bullish: 45.0,
            reversal_rsi_bearish: 55.0,
            rsi_oversold: 35.0,
            rsi_overbought: 65.0,
            stoch_oversold: 20.0,
            stoch_overbought: 80.0,
            decision_threshold: 0.18,
            stop_loss_atr: 1.2,
            take_profit_atr: 2.5,
            weight_reversal: 3.5,
            weight_rsi: 3.0,
            weight_ma_cross: 2.5,
            weight_long_trend: 1.5,
            weight_macd_cross: 2.0,
            weight_bollinger: 1.0,
            weight_stochastic: 2.0,
        }
    }
}

/// One fired rule: direction (+1 bullish, -1 bearish) and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub direction: i8,
    pub weight: f64,
    pub reason: String,
}

/// Stateless weighted vote over the latest row of an [`IndicatorFrame`].
#[derive(Debug, Clone, Default)]
pub struct EnsembleVote {
    config: EnsembleVoteConfig,
}

impl EnsembleVote {
    pub fn new(config: EnsembleVoteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnsembleVoteConfig {
        &self.config
    }

    pub fn evaluate(&self, frame: &IndicatorFrame) -> SignalResult {
        self.evaluate_at(frame, Utc::now())
    }

    /// Same as [`evaluate`](Self::evaluate) with the result stamped at `timestamp`.
    pub fn evaluate_at(&self, frame: &IndicatorFrame, timestamp: DateTime<Utc>) -> SignalResult {
        let (Some(latest), Some(previous)) = (frame.latest(), frame.previous()) else {
            return SignalResult::neutral(REASON_NO_CONFIRMATION, timestamp);
        };

        // Trend gate; an undefined ADX fails the comparison and does not gate.
        let ranging = lt(latest.adx, self.config.adx_trend_threshold);
        if ranging {
            tracing::debug!(adx = ?latest.adx, "ADX below trend threshold");
            return SignalResult::neutral(REASON_RANGING, timestamp);
        }

        let votes = self.collect_votes(frame, &latest, &previous);
        let Some(first) = votes.first() else {
            return SignalResult::neutral(REASON_NO_CONFIRMATION, timestamp);
        };

        let total_weight: f64 = votes.iter().map(|v| v.weight).sum();
        let weighted_sum: f64 = votes.iter().map(|v| f64::from(v.direction) * v.weight).sum();
        let average = weighted_sum / total_weight;
        let strength = average.abs().min(1.0);

        let signal = if average > self.config.decision_threshold {
            Signal::Call
        } else if average < -self.config.decision_threshold {
            Signal::Put
        } else {
            Signal::Neutral
        };

        // The stop/target side follows the first rule that fired, not the
        // weighted decision.
        let targets = if signal.is_directional() {
            latest.atr.map(|atr| self.targets(latest.close, atr, first.direction))
        } else {
            None
        };

        tracing::debug!(
            signal = %signal,
            average,
            votes = votes.len(),
            first_direction = first.direction,
            "ensemble vote decided"
        );

        let reasons = votes.into_iter().map(|v| v.reason).collect();
        SignalResult::new(signal, reasons, strength, timestamp, targets).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding malformed signal result");
            SignalResult::neutral(REASON_NO_CONFIRMATION, timestamp)
        })
    }

    /// Every rule that fires on the latest row, in evaluation order.
    pub fn collect_votes(
        &self,
        frame: &IndicatorFrame,
        latest: &IndicatorRow,
        previous: &IndicatorRow,
    ) -> Vec<Vote> {
        let cfg = &self.config;
        let mut votes = Vec::new();
        let mut cast = |direction: i8, weight: f64, reason: String| {
            votes.push(Vote {
                direction,
                weight,
                reason,
            });
        };

        // Voter 1: reversal off the recent extreme
        let lookback = cfg.reversal_lookback.min(frame.len());
        let recent = frame.candles[frame.len() - lookback..].iter().map(|c| c.close);
        let (recent_low, recent_high) = recent.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });
        if latest.close > recent_low * (1.0 + cfg.reversal_band)
            && lt(latest.rsi, cfg.reversal_rsi_bullish)
        {
            cast(1, cfg.weight_reversal, "Potential bullish reversal".to_string());
        } else if latest.close < recent_high * (1.0 - cfg.reversal_band)
            && gt(latest.rsi, cfg.reversal_rsi_bearish)
        {
            cast(-1, cfg.weight_reversal, "Potential bearish reversal".to_string());
        }

        // Voter 2: RSI extremes
        if let Some(rsi) = latest.rsi {
            if rsi < cfg.rsi_oversold {
                cast(1, cfg.weight_rsi, format!("RSI oversold ({:.2})", rsi));
            } else if rsi > cfg.rsi_overbought {
                cast(-1, cfg.weight_rsi, format!("RSI overbought ({:.2})", rsi));
            }
        }

        // Voter 3: fast/medium MA crossover
        match crossover(latest.sma_5, latest.sma_13, previous.sma_5, previous.sma_13) {
            Some(1) => cast(1, cfg.weight_ma_cross, "Fast MA crossed above medium MA".to_string()),
            Some(-1) => cast(-1, cfg.weight_ma_cross, "Fast MA crossed below medium MA".to_string()),
            _ => {}
        }

        // Voter 4: long-term trend
        if let (Some(fast), Some(long)) = (latest.sma_5, latest.sma_50) {
            if fast > long {
                cast(1, cfg.weight_long_trend, "Above long-term MA".to_string());
            } else if fast < long {
                cast(-1, cfg.weight_long_trend, "Below long-term MA".to_string());
            }
        }

        // Voter 5: MACD vs signal line
        match crossover(latest.macd, latest.macd_signal, previous.macd, previous.macd_signal) {
            Some(1) => cast(1, cfg.weight_macd_cross, "MACD crossed above signal".to_string()),
            Some(-1) => cast(-1, cfg.weight_macd_cross, "MACD crossed below signal".to_string()),
            _ => {}
        }

        // Voter 6: Bollinger extremes
        if latest.bb_lower.map(|lower| latest.close < lower).unwrap_or(false) {
            cast(1, cfg.weight_bollinger, "Price below lower band".to_string());
        } else if latest.bb_upper.map(|upper| latest.close > upper).unwrap_or(false) {
            cast(-1, cfg.weight_bollinger, "Price above upper band".to_string());
        }

        // Voter 7: stochastic turn inside an extreme zone
        if let (Some(k), Some(d)) = (latest.stoch_k, latest.stoch_d) {
            if k < cfg.stoch_oversold && d < cfg.stoch_oversold && k > d {
                cast(
                    1,
                    cfg.weight_stochastic,
                    "Stochastic Oscillator indicates oversold".to_string(),
                );
            } else if k > cfg.stoch_overbought && d > cfg.stoch_overbought && k < d {
                cast(
                    -1,
                    cfg.weight_stochastic,
                    "Stochastic Oscillator indicates overbought".to_string(),
                );
            }
        }

        votes
    }

    fn targets(&self, base: f64, atr: f64, direction: i8) -> Targets {
        let risk = atr * self.config.stop_loss_atr;
        let reward = atr * self.config.take_profit_atr;
        if direction > 0 {
            Targets {
                stop_loss: base - risk,
                take_profit: base + reward,
            }
        } else {
            Targets {
                stop_loss: base + risk,
                take_profit: base - reward,
            }
        }
    }
}

fn lt(value: Option<f64>, bound: f64) -> bool {
    value.map(|v| v < bound).unwrap_or(false)
}

fn gt(value: Option<f64>, bound: f64) -> bool {
    value.map(|v| v > bound).unwrap_or(false)
}

/// `Some(1)` when `fast` moved from at-or-below `slow` to above it, `Some(-1)`
/// for the mirror move, `None` otherwise or when any operand is undefined.
fn crossover(
    fast: Option<f64>,
    slow: Option<f64>,
    prev_fast: Option<f64>,
    prev_slow: Option<f64>,
) -> Option<i8> {
    let (f, s, pf, ps) = (fast?, slow?, prev_fast?, prev_slow?);
    if f > s && pf <= ps {
        Some(1)
    } else if f < s && pf >= ps {
        Some(-1)
    } else {
        None
    }
}
