use crate::indicator::rolling::{rolling_max, rolling_min};
use crate::indicator::sma::sma_series;
use crate::model::candle::Candle;

/// RSI from simple `period`-bar averages of gains and losses.
///
/// The first row has no delta and counts as flat, so the first defined value
/// lands on row `period - 1`. Flat deltas feed neither bucket. With zero average loss the
/// reading is 100 when there was any gain and undefined when the window was
/// completely flat.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    for (i, close) in closes.iter().enumerate() {
        if i == 0 {
            gains.push(Some(0.0));
            losses.push(Some(0.0));
            continue;
        }
        let delta = close - closes[i - 1];
        gains.push(Some(delta.max(0.0)));
        losses.push(Some((-delta).max(0.0)));
    }

    let avg_gain = sma_series(&gains, period);
    let avg_loss = sma_series(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| {
            let (gain, loss) = ((*gain)?, (*loss)?);
            if loss <= 0.0 {
                return if gain > 0.0 { Some(100.0) } else { None };
            }
            let rs = gain / loss;
            Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stochastic {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator: `%K` against the `k_period` high/low range, `%D` the
/// `d_period` mean of `%K`. A zero range leaves `%K` undefined.
pub fn stochastic(candles: &[Candle], k_period: usize, d_period: usize) -> Stochastic {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let highest = rolling_max(&highs, k_period);
    let lowest = rolling_min(&lows, k_period);

    let k: Vec<Option<f64>> = candles
        .iter()
        .zip(highest.iter().zip(&lowest))
        .map(|(candle, (high, low))| {
            let (high, low) = ((*high)?, (*low)?);
            let range = high - low;
            if range <= 0.0 {
                return None;
            }
            Some(100.0 * (candle.close - low) / range)
        })
        .collect();
    let d = sma_series(&k, d_period);

    Stochastic { k, d }
}
