use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::Path;

use crate::error::AppError;
use crate::model::trade::DurationUnit;

pub const SUPPORTED_TIMEFRAMES: [&str; 7] = ["1m", "5m", "15m", "30m", "1h", "4h", "1d"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub deriv: DerivConfig,
    pub trade: TradeConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DerivConfig {
    pub app_id: u32,
    pub ws_url: String,
    pub symbols: Vec<String>,
    pub timeframes: Vec<String>,
    #[serde(skip)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeConfig {
    pub stake: f64,
    pub duration: u32,
    pub duration_unit: DurationUnit,
    #[serde(default = "default_max_risk_percent")]
    pub max_risk_percent: f64,
    #[serde(default = "default_min_risk_percent")]
    pub min_risk_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_lookback_periods")]
    pub lookback_periods: usize,
    #[serde(default = "default_min_signal_strength")]
    pub min_signal_strength: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback_periods: default_lookback_periods(),
            min_signal_strength: default_min_signal_strength(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    pub active_hours_start: String,
    pub active_hours_end: String,
    pub trade_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_max_risk_percent() -> f64 {
    2.0
}

fn default_min_risk_percent() -> f64 {
    0.5
}

fn default_lookback_periods() -> usize {
    100
}

fn default_min_signal_strength() -> f64 {
    0.3
}

/// Parse a timeframe label (e.g. "1m", "4h", "1d") into seconds.
pub fn parse_timeframe_secs(s: &str) -> Result<u64> {
    if s.len() < 2 {
        bail!("invalid timeframe '{}': expected format like '5m'", s);
    }

    let (num_str, suffix) = s.split_at(s.len() - 1);
    let n: u64 = num_str.parse().with_context(|| {
        format!(
            "invalid timeframe '{}': quantity must be a positive integer",
            s
        )
    })?;
    if n == 0 {
        bail!("invalid timeframe '{}': quantity must be > 0", s);
    }

    let unit_secs = match suffix {
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        _ => bail!(
            "invalid timeframe '{}': unsupported suffix '{}', expected one of m/h/d",
            s,
            suffix
        ),
    };

    n.checked_mul(unit_secs)
        .with_context(|| format!("invalid timeframe '{}': value is too large", s))
}

pub fn parse_clock(s: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| AppError::Config(format!("invalid time '{}': expected HH:MM", s)))
}

impl TradeConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.stake <= 0.0 {
            return Err(AppError::Config("stake must be positive".to_string()));
        }
        if self.duration == 0 {
            return Err(AppError::Config("duration must be positive".to_string()));
        }
        if self.max_risk_percent <= 0.0 || self.max_risk_percent > 5.0 {
            return Err(AppError::Config(
                "max_risk_percent must be in (0, 5]".to_string(),
            ));
        }
        if self.min_risk_percent <= 0.0 || self.min_risk_percent >= self.max_risk_percent {
            return Err(AppError::Config(
                "min_risk_percent must be positive and below max_risk_percent".to_string(),
            ));
        }
        Ok(())
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        parse_clock(&self.active_hours_start)?;
        parse_clock(&self.active_hours_end)?;
        if self.trade_interval_secs == 0 {
            return Err(AppError::Config(
                "trade_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl DerivConfig {
    /// Configured symbols, trimmed, upper-cased and de-duplicated in order.
    pub fn tradable_symbols(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for sym in &self.symbols {
            let s = sym.trim().to_ascii_uppercase();
            if !s.is_empty() && !out.iter().any(|v| v == &s) {
                out.push(s);
            }
        }
        out
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_from_path(Path::new("config/default.toml"))?;
        config.deriv.api_key = std::env::var("DERIV_API_KEY")
            .context("DERIV_API_KEY not set in .env or environment")?;
        Ok(config)
    }

    /// Parse and validate a config file without touching the environment.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.deriv.tradable_symbols().is_empty() {
            return Err(AppError::Config("no trading symbols configured".to_string()));
        }
        self.trade.validate()?;
        self.schedule.validate()?;
        for tf in &self.deriv.timeframes {
            parse_timeframe_secs(tf).map_err(|err| AppError::Config(format!("{:#}", err)))?;
            if !SUPPORTED_TIMEFRAMES.contains(&tf.as_str()) {
                return Err(AppError::Config(format!("invalid timeframe: {}", tf)));
            }
        }
        if self.analysis.lookback_periods < crate::indicator::MIN_CANDLES {
            return Err(AppError::Config(format!(
                "lookback_periods must be at least {}",
                crate::indicator::MIN_CANDLES
            )));
        }
        if !(0.0..=1.0).contains(&self.analysis.min_signal_strength) {
            return Err(AppError::Config(
                "min_signal_strength must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
