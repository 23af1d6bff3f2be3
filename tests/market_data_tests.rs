use std::fs;
use std::path::PathBuf;

use deriv_signal_bot::market_data::{CandleSource, JsonCandleSource, VOLATILITY_SYMBOLS};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dsb-candles-{}-{}", name, uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn fetch_returns_trailing_sorted_candles() {
    let dir = temp_dir("trailing");
    fs::write(
        dir.join("R_75_5m.json"),
        r#"[
  {"timestamp_ms": 600000, "open": 3.0, "high": 3.5, "low": 2.5, "close": 3.2},
  {"timestamp_ms": 0, "open": 1.0, "high": 1.5, "low": 0.5, "close": 1.2, "volume": 4.0},
  {"timestamp_ms": 300000, "open": 2.0, "high": 2.5, "low": 1.5, "close": 2.2},
  {"timestamp_ms": 300000, "open": 9.0, "high": 9.5, "low": 8.5, "close": 9.2}
]"#,
    )
    .unwrap();

    let source = JsonCandleSource::new(&dir);
    let all = source.fetch("R_75", "5m", 10).unwrap();
    let ts: Vec<u64> = all.iter().map(|c| c.timestamp_ms).collect();
    assert_eq!(ts, vec![0, 300_000, 600_000]);
    assert_eq!(all[0].volume, 4.0);
    assert_eq!(all[2].volume, 0.0);

    let tail = source.fetch("R_75", "5m", 2).unwrap();
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].timestamp_ms, 300_000);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_file_is_an_error() {
    let dir = temp_dir("missing");
    let source = JsonCandleSource::new(&dir);
    let err = source.fetch("R_10", "1m", 100).unwrap_err();
    assert!(err.to_string().contains("failed to load"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn empty_history_is_an_error() {
    let dir = temp_dir("empty");
    fs::write(dir.join("R_10_1m.json"), "[]").unwrap();
    let source = JsonCandleSource::new(&dir);
    let err = source.fetch("R_10", "1m", 100).unwrap_err();
    assert!(err.to_string().contains("no candles for R_10 1m"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = temp_dir("malformed");
    fs::write(dir.join("R_10_1m.json"), "{not json").unwrap();
    let source = JsonCandleSource::new(&dir);
    assert!(source.fetch("R_10", "1m", 100).is_err());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn volatility_symbols_cover_standard_and_one_second_indices() {
    assert_eq!(VOLATILITY_SYMBOLS.len(), 10);
    assert!(VOLATILITY_SYMBOLS.contains(&"R_100"));
    assert!(VOLATILITY_SYMBOLS.contains(&"R_25_1S"));
}
