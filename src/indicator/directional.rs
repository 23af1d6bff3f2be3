//! Directional movement and ADX.
//!
//! +DM/-DM keep only the larger move when it is positive; the first bar has
//! no move and counts as zero. Both are smoothed with
//! `Ema::with_alpha(1/period)` and divided by the rolling-mean ATR to produce
//! ±DI; DX is smoothed the same way into ADX.

use crate::indicator::ema::{ema_series, Ema};
use crate::model::candle::Candle;

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalIndex {
    pub plus_dm: Vec<Option<f64>>,
    pub minus_dm: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub dx: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

pub fn directional_movement(candles: &[Candle]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let mut plus = Vec::with_capacity(candles.len());
    let mut minus = Vec::with_capacity(candles.len());
    for (i, bar) in candles.iter().enumerate() {
        let Some(prev) = i.checked_sub(1).map(|p| &candles[p]) else {
            plus.push(Some(0.0));
            minus.push(Some(0.0));
            continue;
        };
        let up = bar.high - prev.high;
        let down = prev.low - bar.low;
        plus.push(Some(if up > down && up > 0.0 { up } else { 0.0 }));
        minus.push(Some(if down > up && down > 0.0 { down } else { 0.0 }));
    }
    (plus, minus)
}

pub fn adx(candles: &[Candle], atr: &[Option<f64>], period: usize) -> DirectionalIndex {
    assert!(period > 0, "ADX period must be > 0");
    let alpha = 1.0 / period as f64;
    let (plus_dm, minus_dm) = directional_movement(candles);
    let smooth_plus = ema_series(&plus_dm, Ema::with_alpha(alpha));
    let smooth_minus = ema_series(&minus_dm, Ema::with_alpha(alpha));

    let to_di = |smoothed: &[Option<f64>]| -> Vec<Option<f64>> {
        smoothed
            .iter()
            .zip(atr)
            .map(|(dm, atr)| {
                let atr = (*atr)?;
                if atr <= 0.0 {
                    return None;
                }
                Some(100.0 * (*dm)? / atr)
            })
            .collect()
    };
    let plus_di = to_di(&smooth_plus);
    let minus_di = to_di(&smooth_minus);

    let dx: Vec<Option<f64>> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| {
            let (p, m) = ((*p)?, (*m)?);
            let sum = p + m;
            if sum <= 0.0 {
                return None;
            }
            Some(100.0 * (p - m).abs() / sum)
        })
        .collect();
    let adx = ema_series(&dx, Ema::with_alpha(alpha));

    DirectionalIndex {
        plus_dm,
        minus_dm,
        plus_di,
        minus_di,
        dx,
        adx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::volatility::{atr, true_range};

    fn trending_up(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                Candle::new(i as u64 * 60_000, base, base + 1.0, base - 0.5, base + 0.8)
            })
            .collect()
    }

    #[test]
    fn only_larger_positive_move_counts() {
        let candles = vec![
            Candle::new(0, 10.0, 12.0, 8.0, 11.0),
            // high +1, low +1 (down move negative)
            Candle::new(1, 11.0, 13.0, 9.0, 12.0),
            // inside bar: both moves negative
            Candle::new(2, 12.0, 12.5, 9.5, 12.0),
            // low drops 2, high +0.5
            Candle::new(3, 12.0, 13.0, 7.5, 8.0),
        ];
        let (plus, minus) = directional_movement(&candles);
        assert_eq!(plus, vec![Some(0.0), Some(1.0), Some(0.0), Some(0.0)]);
        assert_eq!(minus, vec![Some(0.0), Some(0.0), Some(0.0), Some(2.0)]);
    }

    #[test]
    fn steady_uptrend_has_strong_adx() {
        let candles = trending_up(60);
        let atr = atr(&true_range(&candles), 14);
        let dmi = adx(&candles, &atr, 14);
        assert!(dmi.dx[..14].iter().all(Option::is_none));
        let last = dmi.adx[59].unwrap();
        assert!(last > 90.0 && last <= 100.0 + 1e-9, "adx = {}", last);
        assert_eq!(dmi.minus_di[59], Some(0.0));
    }
}
