use deriv_signal_bot::model::candle::Candle;
use deriv_signal_bot::model::pattern::{Bias, PatternKind};
use deriv_signal_bot::pattern::detect_patterns;

fn bar(open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(0, open, high, low, close)
}

fn lead() -> Candle {
    bar(10.0, 10.2, 9.8, 10.1)
}

fn kinds(prev: Candle, last: Candle) -> Vec<PatternKind> {
    detect_patterns(&[lead(), prev, last])
        .into_iter()
        .map(|p| p.kind)
        .collect()
}

#[test]
fn bullish_engulfing() {
    let prev = bar(10.5, 10.6, 9.9, 10.0);
    let last = bar(9.8, 10.9, 9.7, 10.8);
    assert_eq!(kinds(prev, last), vec![PatternKind::BullishEngulfing]);
}

#[test]
fn bearish_engulfing() {
    let prev = bar(10.0, 10.6, 9.9, 10.5);
    let last = bar(10.7, 10.8, 9.7, 9.8);
    assert_eq!(kinds(prev, last), vec![PatternKind::BearishEngulfing]);
}

#[test]
fn hammer() {
    let prev = bar(10.2, 10.35, 10.15, 10.3);
    let last = bar(10.0, 10.12, 9.5, 10.1);
    assert_eq!(kinds(prev, last), vec![PatternKind::Hammer]);
}

#[test]
fn shooting_star() {
    let prev = bar(10.3, 10.35, 10.05, 10.1);
    let last = bar(10.1, 10.6, 9.98, 10.0);
    assert_eq!(kinds(prev, last), vec![PatternKind::ShootingStar]);
}

#[test]
fn shooting_star_measures_upper_shadow_against_body() {
    // upper shadow 0.5 is under twice the 0.3 lower shadow but over twice the 0.1 body
    let prev = bar(10.3, 10.35, 10.05, 10.1);
    let last = bar(10.1, 10.6, 9.7, 10.0);
    assert_eq!(kinds(prev, last), vec![PatternKind::ShootingStar]);
}

#[test]
fn doji() {
    let prev = bar(10.05, 10.1, 9.9, 9.98);
    let last = bar(10.0, 10.3, 9.7, 10.01);
    assert_eq!(kinds(prev, last), vec![PatternKind::Doji]);
}

#[test]
fn plain_continuation_has_no_pattern() {
    let prev = bar(10.0, 10.6, 9.9, 10.5);
    let last = bar(10.5, 11.0, 10.4, 10.9);
    assert!(kinds(prev, last).is_empty());
}

#[test]
fn engulfing_requires_opposite_previous_body() {
    // both bullish: no engulfing even though the body wraps the previous one
    let prev = bar(10.0, 10.3, 9.95, 10.2);
    let last = bar(9.9, 10.5, 9.85, 10.4);
    assert!(!kinds(prev, last).contains(&PatternKind::BullishEngulfing));
}

#[test]
fn fewer_than_three_candles_yield_nothing() {
    let prev = bar(10.5, 10.6, 9.9, 10.0);
    let last = bar(9.8, 10.9, 9.7, 10.8);
    assert!(detect_patterns(&[]).is_empty());
    assert!(detect_patterns(&[last]).is_empty());
    assert!(detect_patterns(&[prev, last]).is_empty());
}

#[test]
fn patterns_carry_name_and_bias() {
    let prev = bar(10.0, 10.6, 9.9, 10.5);
    let last = bar(10.7, 10.8, 9.7, 9.8);
    let patterns = detect_patterns(&[lead(), prev, last]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].name(), "Bearish Engulfing");
    assert_eq!(patterns[0].bias, Bias::Bearish);
    assert_eq!(patterns[0].to_string(), "Bearish Engulfing (bearish)");
}

#[test]
fn input_is_not_modified() {
    let candles = vec![lead(), bar(10.5, 10.6, 9.9, 10.0), bar(9.8, 10.9, 9.7, 10.8)];
    let snapshot = candles.clone();
    let _ = detect_patterns(&candles);
    assert_eq!(candles, snapshot);
}
