use serde::Serialize;

use crate::error::AppError;
use crate::indicator::directional::adx;
use crate::indicator::ema::{ema_series, Ema};
use crate::indicator::oscillators::{rsi, stochastic};
use crate::indicator::sma::sma_series;
use crate::indicator::volatility::{atr, bollinger, true_range};
use crate::model::candle::Candle;

/// Fewest candles the indicator stack accepts.
pub const MIN_CANDLES: usize = 50;

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const ADX_PERIOD: usize = 14;
pub const STOCH_K_PERIOD: usize = 14;
pub const STOCH_D_PERIOD: usize = 3;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_WIDTH: f64 = 2.2;

/// Candle series with every derived column aligned row-for-row. `None` marks
/// a row where the column is undefined (warm-up or a zero denominator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    pub candles: Vec<Candle>,
    pub sma_5: Vec<Option<f64>>,
    pub sma_13: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub ema_9: Vec<Option<f64>>,
    pub ema_12: Vec<Option<f64>>,
    pub ema_26: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub bb_middle: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub true_range: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub stoch_k: Vec<Option<f64>>,
    pub stoch_d: Vec<Option<f64>>,
    pub plus_dm: Vec<Option<f64>>,
    pub minus_dm: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub dx: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

/// One row of the frame, as read by the signal rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    pub close: f64,
    pub sma_5: Option<f64>,
    pub sma_13: Option<f64>,
    pub sma_50: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub adx: Option<f64>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.candles.iter().map(|c| c.close)
    }

    pub fn row(&self, i: usize) -> Option<IndicatorRow> {
        let candle = self.candles.get(i)?;
        Some(IndicatorRow {
            close: candle.close,
            sma_5: self.sma_5[i],
            sma_13: self.sma_13[i],
            sma_50: self.sma_50[i],
            rsi: self.rsi[i],
            macd: self.macd[i],
            macd_signal: self.macd_signal[i],
            bb_upper: self.bb_upper[i],
            bb_lower: self.bb_lower[i],
            atr: self.atr[i],
            stoch_k: self.stoch_k[i],
            stoch_d: self.stoch_d[i],
            adx: self.adx[i],
        })
    }

    pub fn latest(&self) -> Option<IndicatorRow> {
        self.row(self.len().checked_sub(1)?)
    }

    pub fn previous(&self) -> Option<IndicatorRow> {
        self.row(self.len().checked_sub(2)?)
    }
}

/// Derives the full indicator stack from `candles`. The input is copied, never
/// modified.
pub fn compute_indicators(candles: &[Candle]) -> Result<IndicatorFrame, AppError> {
    if candles.len() < MIN_CANDLES {
        return Err(AppError::InsufficientData {
            required: MIN_CANDLES,
            actual: candles.len(),
        });
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let close_column: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();

    let ema_12 = ema_series(&close_column, Ema::new(12));
    let ema_26 = ema_series(&close_column, Ema::new(26));
    let macd: Vec<Option<f64>> = ema_12
        .iter()
        .zip(&ema_26)
        .map(|(fast, slow)| Some((*fast)? - (*slow)?))
        .collect();
    let macd_signal = ema_series(&macd, Ema::new(9));
    let macd_histogram = macd
        .iter()
        .zip(&macd_signal)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    let bands = bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_WIDTH);
    let true_range = true_range(candles);
    let atr = atr(&true_range, ATR_PERIOD);
    let stoch = stochastic(candles, STOCH_K_PERIOD, STOCH_D_PERIOD);
    let dmi = adx(candles, &atr, ADX_PERIOD);

    Ok(IndicatorFrame {
        candles: candles.to_vec(),
        sma_5: sma_series(&close_column, 5),
        sma_13: sma_series(&close_column, 13),
        sma_50: sma_series(&close_column, 50),
        ema_9: ema_series(&close_column, Ema::new(9)),
        ema_12,
        ema_26,
        rsi: rsi(&closes, RSI_PERIOD),
        macd,
        macd_signal,
        macd_histogram,
        bb_middle: bands.middle,
        bb_upper: bands.upper,
        bb_lower: bands.lower,
        true_range,
        atr,
        stoch_k: stoch.k,
        stoch_d: stoch.d,
        plus_dm: dmi.plus_dm,
        minus_dm: dmi.minus_dm,
        plus_di: dmi.plus_di,
        minus_di: dmi.minus_di,
        dx: dmi.dx,
        adx: dmi.adx,
    })
}
