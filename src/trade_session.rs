use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveTime, Utc};

use crate::config::{parse_clock, Config};
use crate::error::AppError;
use crate::market_data::CandleSource;
use crate::model::signal::{Signal, SignalResult};
use crate::model::trade::{ContractType, Trade, TradeOutcome, TradeStatus};
use crate::strategy::get_trading_signal;
use crate::trade_stats::TradingStats;

/// Orchestrator-owned trading state: per-symbol stats, open contracts and
/// pacing. Signal evaluation never touches it; only the owner mutates it.
#[derive(Debug)]
pub struct TradingSession {
    config: Config,
    active_from: NaiveTime,
    active_until: NaiveTime,
    stats: BTreeMap<String, TradingStats>,
    last_trade_at: HashMap<String, DateTime<Utc>>,
    active_trades: Vec<Trade>,
    started_at: DateTime<Utc>,
}

impl TradingSession {
    pub fn new(config: Config, started_at: DateTime<Utc>) -> Result<Self, AppError> {
        let active_from = parse_clock(&config.schedule.active_hours_start)?;
        let active_until = parse_clock(&config.schedule.active_hours_end)?;
        let stats = config
            .deriv
            .tradable_symbols()
            .into_iter()
            .map(|symbol| (symbol.clone(), TradingStats::new(symbol)))
            .collect();
        Ok(Self {
            config,
            active_from,
            active_until,
            stats,
            last_trade_at: HashMap::new(),
            active_trades: Vec::new(),
            started_at,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self, symbol: &str) -> Option<&TradingStats> {
        self.stats.get(symbol)
    }

    pub fn active_trades(&self) -> &[Trade] {
        &self.active_trades
    }

    /// Inclusive active-hours check; a window whose end precedes its start
    /// wraps past midnight.
    pub fn is_trading_time(&self, now: NaiveTime) -> bool {
        if self.active_until < self.active_from {
            now >= self.active_from || now <= self.active_until
        } else {
            self.active_from <= now && now <= self.active_until
        }
    }

    pub fn due_for_analysis(&self, symbol: &str, now: DateTime<Utc>) -> bool {
        match self.last_trade_at.get(symbol) {
            None => true,
            Some(last) => {
                let elapsed = now.signed_duration_since(*last).num_seconds();
                elapsed >= self.config.schedule.trade_interval_secs as i64
            }
        }
    }

    /// Risk between the configured bounds, scaled by signal strength; the
    /// stake never exceeds the configured base stake.
    pub fn calculate_stake(&self, balance: f64, signal_strength: f64) -> f64 {
        let trade = &self.config.trade;
        let risk_percent =
            (signal_strength * 2.0).clamp(trade.min_risk_percent, trade.max_risk_percent);
        let max_stake = balance.max(0.0) * (risk_percent / 100.0);
        let stake = trade.stake.min(max_stake);
        (stake * 100.0).round() / 100.0
    }

    /// Turns one symbol's per-timeframe signals into a trade when one side
    /// holds a strict majority.
    pub fn plan_trade(
        &self,
        symbol: &str,
        signals: &[SignalResult],
        balance: f64,
        now: DateTime<Utc>,
    ) -> Option<Trade> {
        if signals.is_empty() {
            tracing::warn!(symbol, "no signals generated");
            return None;
        }

        let calls = signals.iter().filter(|s| s.signal() == Signal::Call).count();
        let puts = signals.iter().filter(|s| s.signal() == Signal::Put).count();
        let avg_strength =
            signals.iter().map(SignalResult::strength).sum::<f64>() / signals.len() as f64;
        tracing::info!(
            symbol,
            calls,
            puts,
            neutral = signals.len() - calls - puts,
            avg_strength,
            "signal summary"
        );

        let half = signals.len() as f64 / 2.0;
        let side = if calls > puts && calls as f64 > half {
            Signal::Call
        } else if puts > calls && puts as f64 > half {
            Signal::Put
        } else {
            tracing::info!(symbol, "no clear trading signal");
            return None;
        };

        if avg_strength < self.config.analysis.min_signal_strength {
            tracing::info!(
                symbol,
                avg_strength,
                min = self.config.analysis.min_signal_strength,
                "consensus too weak"
            );
            return None;
        }

        let contract_type = ContractType::from_signal(side)?;
        let strongest = signals
            .iter()
            .filter(|s| s.signal() == side)
            .fold(None::<&SignalResult>, |best, s| match best {
                Some(b) if b.strength() >= s.strength() => Some(b),
                _ => Some(s),
            })?;

        let mut trade = Trade::new(
            symbol,
            contract_type,
            self.calculate_stake(balance, avg_strength),
            self.config.trade.duration,
            self.config.trade.duration_unit,
            now,
        );
        trade.targets = strongest.targets();
        trade.signals = signals
            .iter()
            .map(|s| format!("{}: {}", s.signal(), s.reasons().join(", ")))
            .collect();

        tracing::info!(
            symbol,
            contract = %contract_type,
            stake = trade.stake,
            votes = if side == Signal::Call { calls } else { puts },
            timeframes = signals.len(),
            "planned trade"
        );
        Some(trade)
    }

    /// Registers a trade the broker accepted.
    pub fn record_execution(
        &mut self,
        mut trade: Trade,
        contract_id: impl Into<String>,
        entry_tick: f64,
        now: DateTime<Utc>,
    ) {
        trade.contract_id = Some(contract_id.into());
        trade.entry_tick = Some(entry_tick);
        trade.status = TradeStatus::Executed;

        self.stats
            .entry(trade.symbol.clone())
            .or_insert_with(|| TradingStats::new(trade.symbol.clone()))
            .record_placed(trade.contract_type);
        self.last_trade_at.insert(trade.symbol.clone(), now);
        tracing::info!(
            symbol = %trade.symbol,
            contract_id = ?trade.contract_id,
            contract = %trade.contract_type,
            stake = trade.stake,
            "trade executed"
        );
        self.active_trades.push(trade);
    }

    /// Closes the active trade with `contract_id`; `None` when it is unknown.
    pub fn settle(
        &mut self,
        contract_id: &str,
        profit: f64,
        exit_tick: f64,
        now: DateTime<Utc>,
    ) -> Option<Trade> {
        let idx = self
            .active_trades
            .iter()
            .position(|t| t.contract_id.as_deref() == Some(contract_id))?;
        let mut trade = self.active_trades.remove(idx);

        trade.profit_loss = Some(profit);
        trade.outcome = Some(if profit > 0.0 {
            TradeOutcome::Win
        } else {
            TradeOutcome::Loss
        });
        trade.status = TradeStatus::Completed;
        trade.exit_tick = Some(exit_tick);
        trade.exit_time = Some(now);

        if let Some(stats) = self.stats.get_mut(&trade.symbol) {
            stats.record_settled(profit);
        }
        tracing::info!(
            symbol = %trade.symbol,
            contract_id,
            profit,
            roi = trade.roi_percent(),
            "trade completed"
        );
        Some(trade)
    }

    /// One line per symbol, also emitted through `tracing`.
    pub fn performance_summary(&self, now: DateTime<Utc>) -> Vec<String> {
        let hours = now.signed_duration_since(self.started_at).num_seconds() as f64 / 3_600.0;
        let mut lines = vec![format!("session duration: {:.1}h", hours)];
        for (symbol, stats) in &self.stats {
            let line = if stats.trades_placed == 0 {
                format!("{}: no trades placed", symbol)
            } else {
                format!(
                    "{}: trades={} success={:.2}% call/put={}/{} pnl={:.2} avg={:.2} rr={:.2} streak={} best_streak={}",
                    symbol,
                    stats.trades_placed,
                    stats.success_rate(),
                    stats.calls,
                    stats.puts,
                    stats.total_profit_loss,
                    stats.avg_profit_per_trade,
                    stats.risk_reward(),
                    stats.current_win_streak,
                    stats.longest_win_streak,
                )
            };
            lines.push(line);
        }
        for line in &lines {
            tracing::info!("{}", line);
        }
        lines
    }
}

/// Evaluates `symbol` on each timeframe. Timeframes whose fetch fails are
/// logged and skipped.
pub fn evaluate_timeframes(
    source: &dyn CandleSource,
    symbol: &str,
    timeframes: &[String],
    count: usize,
) -> Vec<(String, SignalResult)> {
    let mut out = Vec::with_capacity(timeframes.len());
    for tf in timeframes {
        match source.fetch(symbol, tf, count) {
            Ok(candles) => {
                let result = get_trading_signal(&candles);
                tracing::info!(
                    symbol,
                    timeframe = %tf,
                    signal = %result.signal(),
                    reasons = %result.reasons().join(", "),
                    "timeframe analysis"
                );
                out.push((tf.clone(), result));
            }
            Err(err) => {
                tracing::warn!(symbol, timeframe = %tf, error = %err, "candle fetch failed");
            }
        }
    }
    out
}
