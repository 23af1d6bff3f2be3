use serde::Serialize;

use crate::model::trade::ContractType;

/// Running per-symbol trade statistics. Owned and mutated by a single
/// [`TradingSession`](crate::trade_session::TradingSession).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradingStats {
    pub symbol: String,
    pub trades_placed: u32,
    pub successful_trades: u32,
    pub calls: u32,
    pub puts: u32,
    pub total_profit_loss: f64,
    pub best_trade: Option<f64>,
    pub worst_trade: Option<f64>,
    pub longest_win_streak: u32,
    pub current_win_streak: u32,
    pub avg_profit_per_trade: f64,
}

impl TradingStats {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.trades_placed == 0 {
            0.0
        } else {
            (self.successful_trades as f64 / self.trades_placed as f64) * 100.0
        }
    }

    pub fn record_placed(&mut self, contract_type: ContractType) {
        self.trades_placed = self.trades_placed.saturating_add(1);
        match contract_type {
            ContractType::Call => self.calls = self.calls.saturating_add(1),
            ContractType::Put => self.puts = self.puts.saturating_add(1),
        }
    }

    /// Folds a settled trade's profit into every aggregate.
    pub fn record_settled(&mut self, profit: f64) {
        if profit > 0.0 {
            self.successful_trades = self.successful_trades.saturating_add(1);
            self.current_win_streak = self.current_win_streak.saturating_add(1);
            self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
        } else {
            self.current_win_streak = 0;
        }
        self.total_profit_loss += profit;
        self.best_trade = Some(self.best_trade.map_or(profit, |best| best.max(profit)));
        self.worst_trade = Some(self.worst_trade.map_or(profit, |worst| worst.min(profit)));
        self.avg_profit_per_trade = if self.trades_placed > 0 {
            self.total_profit_loss / self.trades_placed as f64
        } else {
            0.0
        };
    }

    /// |best / worst|, or 0 when there is no losing side to compare against.
    pub fn risk_reward(&self) -> f64 {
        match (self.best_trade, self.worst_trade) {
            (Some(best), Some(worst)) if worst != 0.0 => (best / worst).abs(),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_have_zero_rate() {
        let stats = TradingStats::new("R_10");
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.risk_reward(), 0.0);
    }

    #[test]
    fn streaks_reset_on_loss() {
        let mut stats = TradingStats::new("R_10");
        for profit in [0.9, 0.8, -1.0, 0.7] {
            stats.record_placed(ContractType::Call);
            stats.record_settled(profit);
        }
        assert_eq!(stats.trades_placed, 4);
        assert_eq!(stats.successful_trades, 3);
        assert_eq!(stats.longest_win_streak, 2);
        assert_eq!(stats.current_win_streak, 1);
        assert!((stats.success_rate() - 75.0).abs() < 1e-9);
        assert_eq!(stats.best_trade, Some(0.9));
        assert_eq!(stats.worst_trade, Some(-1.0));
        assert!((stats.total_profit_loss - 1.4).abs() < 1e-9);
        assert!((stats.avg_profit_per_trade - 0.35).abs() < 1e-9);
        assert!((stats.risk_reward() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn placed_counts_by_side() {
        let mut stats = TradingStats::new("R_50");
        stats.record_placed(ContractType::Call);
        stats.record_placed(ContractType::Put);
        stats.record_placed(ContractType::Put);
        assert_eq!((stats.calls, stats.puts, stats.trades_placed), (1, 2, 3));
    }
}
