//! Candlestick formations over the most recent bars.

use crate::model::candle::Candle;
use crate::model::pattern::{Pattern, PatternKind};

/// Bars the detector looks at.
pub const PATTERN_LOOKBACK: usize = 3;

/// Classifies the last [`PATTERN_LOOKBACK`] candles. Every rule is checked
/// independently, in a fixed order, so several patterns may fire together.
/// Fewer than three candles yields an empty list.
pub fn detect_patterns(candles: &[Candle]) -> Vec<Pattern> {
    if candles.len() < PATTERN_LOOKBACK {
        return Vec::new();
    }
    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 2];

    let rules: [(PatternKind, fn(&Candle, &Candle) -> bool); 5] = [
        (PatternKind::BullishEngulfing, is_bullish_engulfing),
        (PatternKind::BearishEngulfing, is_bearish_engulfing),
        (PatternKind::Hammer, |last, _| is_hammer(last)),
        (PatternKind::ShootingStar, |last, _| is_shooting_star(last)),
        (PatternKind::Doji, |last, _| is_doji(last)),
    ];

    rules
        .iter()
        .filter(|(_, rule)| rule(last, prev))
        .map(|(kind, _)| Pattern::from(*kind))
        .collect()
}

fn is_bullish_engulfing(last: &Candle, prev: &Candle) -> bool {
    last.is_bullish() && prev.is_bearish() && last.open < prev.close && last.close > prev.open
}

fn is_bearish_engulfing(last: &Candle, prev: &Candle) -> bool {
    last.is_bearish() && prev.is_bullish() && last.open > prev.close && last.close < prev.open
}

// Long lower shadow under a small bullish body with almost no upper wick.
fn is_hammer(c: &Candle) -> bool {
    let lower = c.lower_shadow();
    c.is_bullish()
        && c.upper_shadow() < lower * 0.3
        && c.body_size() < lower * 0.3
        && lower > c.body_size() * 2.0
}

fn is_shooting_star(c: &Candle) -> bool {
    let upper = c.upper_shadow();
    c.is_bearish() && upper > c.body_size() * 2.0 && c.body_size() < upper * 0.3
}

fn is_doji(c: &Candle) -> bool {
    c.body_size() < c.range() * 0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle::new(0, open, high, low, close)
    }

    #[test]
    fn too_few_candles_is_empty() {
        assert!(detect_patterns(&[]).is_empty());
        let doji = bar(10.0, 10.3, 9.7, 10.01);
        assert!(detect_patterns(&[doji, doji]).is_empty());
    }

    #[test]
    fn only_last_two_bars_matter() {
        let filler = bar(50.0, 80.0, 20.0, 50.0);
        let prev = bar(10.5, 10.6, 9.9, 10.0);
        let last = bar(9.8, 10.9, 9.7, 10.8);
        let a = detect_patterns(&[filler, filler, filler, prev, last]);
        let b = detect_patterns(&[bar(1.0, 2.0, 0.5, 1.5), prev, last]);
        assert_eq!(a, b);
    }

    #[test]
    fn several_rules_can_fire_together() {
        // bearish prev fully inside a bullish last whose body is tiny
        // relative to its range: engulfing and doji at once
        let prev = bar(10.02, 10.05, 9.95, 10.0);
        let last = bar(9.99, 11.0, 9.0, 10.04);
        let kinds: Vec<PatternKind> = detect_patterns(&[prev, prev, last])
            .into_iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(kinds, vec![PatternKind::BullishEngulfing, PatternKind::Doji]);
    }
}
