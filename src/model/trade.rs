use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::signal::{Signal, Targets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    pub fn as_deriv_str(&self) -> &'static str {
        match self {
            ContractType::Call => "CALL",
            ContractType::Put => "PUT",
        }
    }

    /// Maps a directional signal onto a contract; NEUTRAL has none.
    pub fn from_signal(signal: Signal) -> Option<Self> {
        match signal {
            Signal::Call => Some(ContractType::Call),
            Signal::Put => Some(ContractType::Put),
            Signal::Neutral => None,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_deriv_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    #[serde(rename = "m")]
    Minutes,
    #[serde(rename = "h")]
    Hours,
    #[serde(rename = "d")]
    Days,
}

impl DurationUnit {
    pub fn as_deriv_str(&self) -> &'static str {
        match self {
            DurationUnit::Minutes => "m",
            DurationUnit::Hours => "h",
            DurationUnit::Days => "d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Pending,
    Executed,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeOutcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub symbol: String,
    pub contract_type: ContractType,
    pub stake: f64,
    pub duration: u32,
    pub duration_unit: DurationUnit,
    pub entry_time: DateTime<Utc>,
    pub contract_id: Option<String>,
    pub status: TradeStatus,
    pub outcome: Option<TradeOutcome>,
    pub profit_loss: Option<f64>,
    pub entry_tick: Option<f64>,
    pub exit_tick: Option<f64>,
    pub exit_time: Option<DateTime<Utc>>,
    pub signals: Vec<String>,
    pub targets: Option<Targets>,
}

impl Trade {
    pub fn new(
        symbol: impl Into<String>,
        contract_type: ContractType,
        stake: f64,
        duration: u32,
        duration_unit: DurationUnit,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            contract_type,
            stake,
            duration,
            duration_unit,
            entry_time,
            contract_id: None,
            status: TradeStatus::Pending,
            outcome: None,
            profit_loss: None,
            entry_tick: None,
            exit_tick: None,
            exit_time: None,
            signals: Vec::new(),
            targets: None,
        }
    }

    pub fn stop_loss(&self) -> Option<f64> {
        self.targets.map(|t| t.stop_loss)
    }

    pub fn take_profit(&self) -> Option<f64> {
        self.targets.map(|t| t.take_profit)
    }

    pub fn roi_percent(&self) -> f64 {
        match self.profit_loss {
            Some(pnl) if self.stake > 0.0 => (pnl / self.stake) * 100.0,
            _ => 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TradeStatus::Executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(stake: f64) -> Trade {
        Trade::new("R_75", ContractType::Call, stake, 5, DurationUnit::Minutes, Utc::now())
    }

    #[test]
    fn new_trade_starts_pending() {
        let t = trade(1.0);
        assert_eq!(t.status, TradeStatus::Pending);
        assert!(t.contract_id.is_none());
        assert!(t.outcome.is_none());
        assert!(!t.is_active());
    }

    #[test]
    fn roi_uses_stake() {
        let mut t = trade(2.0);
        assert_eq!(t.roi_percent(), 0.0);
        t.profit_loss = Some(1.5);
        assert!((t.roi_percent() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn roi_is_zero_without_stake() {
        let mut t = trade(0.0);
        t.profit_loss = Some(3.0);
        assert_eq!(t.roi_percent(), 0.0);
    }

    #[test]
    fn contract_type_follows_signal() {
        assert_eq!(ContractType::from_signal(Signal::Call), Some(ContractType::Call));
        assert_eq!(ContractType::from_signal(Signal::Put), Some(ContractType::Put));
        assert_eq!(ContractType::from_signal(Signal::Neutral), None);
    }

    #[test]
    fn duration_unit_uses_deriv_labels() {
        let unit: DurationUnit = serde_json::from_str("\"h\"").unwrap();
        assert_eq!(unit, DurationUnit::Hours);
        assert!(serde_json::from_str::<DurationUnit>("\"s\"").is_err());
    }
}
