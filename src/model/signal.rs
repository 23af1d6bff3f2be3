use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Call,
    Put,
    Neutral,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Call => "CALL",
            Signal::Put => "PUT",
            Signal::Neutral => "NEUTRAL",
        }
    }

    pub fn is_directional(&self) -> bool {
        !matches!(self, Signal::Neutral)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALL" => Ok(Signal::Call),
            "PUT" => Ok(Signal::Put),
            "NEUTRAL" => Ok(Signal::Neutral),
            other => Err(AppError::InvalidSignalValue(other.to_string())),
        }
    }
}

/// Stop-loss and take-profit always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// Outcome of one signal evaluation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalResult {
    signal: Signal,
    reasons: Vec<String>,
    strength: f64,
    timestamp: DateTime<Utc>,
    targets: Option<Targets>,
}

impl SignalResult {
    /// Rejects a strength outside `[0, 1]`, targets attached to a NEUTRAL
    /// signal and a CALL/PUT without targets.
    pub fn new(
        signal: Signal,
        reasons: Vec<String>,
        strength: f64,
        timestamp: DateTime<Utc>,
        targets: Option<Targets>,
    ) -> Result<Self, AppError> {
        if !(0.0..=1.0).contains(&strength) {
            return Err(AppError::InvalidSignalResult(format!(
                "strength {} outside [0, 1]",
                strength
            )));
        }
        if signal == Signal::Neutral && targets.is_some() {
            return Err(AppError::InvalidSignalResult(
                "NEUTRAL signal cannot carry stop-loss/take-profit".to_string(),
            ));
        }
        if signal.is_directional() && targets.is_none() {
            return Err(AppError::InvalidSignalResult(format!(
                "{} signal requires stop-loss/take-profit",
                signal
            )));
        }
        Ok(Self {
            signal,
            reasons,
            strength,
            timestamp,
            targets,
        })
    }

    /// Zero-strength NEUTRAL result carrying a single reason.
    pub fn neutral(reason: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            signal: Signal::Neutral,
            reasons: vec![reason.into()],
            strength: 0.0,
            timestamp,
            targets: None,
        }
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn targets(&self) -> Option<Targets> {
        self.targets
    }

    pub fn stop_loss(&self) -> Option<f64> {
        self.targets.map(|t| t.stop_loss)
    }

    pub fn take_profit(&self) -> Option<f64> {
        self.targets.map(|t| t.take_profit)
    }
}
