use crate::indicator::rolling::rolling_std;
use crate::indicator::sma::sma_series;
use crate::model::candle::Candle;

/// `max(high - low, |high - prev_close|, |low - prev_close|)`. Row 0 has no
/// previous close and is undefined.
pub fn true_range(candles: &[Candle]) -> Vec<Option<f64>> {
    candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let prev_close = candles.get(i.checked_sub(1)?)?.close;
            Some(
                (c.high - c.low)
                    .max((c.high - prev_close).abs())
                    .max((c.low - prev_close).abs()),
            )
        })
        .collect()
}

/// Average true range as a plain rolling mean of the true range.
pub fn atr(true_range: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    sma_series(true_range, period)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bands at `middle ± width * sample std` over `period` closes.
pub fn bollinger(closes: &[f64], period: usize, width: f64) -> BollingerBands {
    let column: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
    let middle = sma_series(&column, period);
    let std = rolling_std(closes, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&std)
            .map(|(m, s)| Some((*m)? + sign * width * (*s)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerBands {
        middle,
        upper,
        lower,
    }
}
