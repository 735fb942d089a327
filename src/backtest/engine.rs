use crate::backtest::metrics::{self, BacktestResult};
use crate::error::Error;
use crate::indicators::sma_series;
use crate::models::Position;
use crate::Result;

/// Starting equity for a simulation run.
pub const INITIAL_EQUITY: f64 = 10_000.0;

/// Simulates a long/flat SMA-crossover strategy over a close-price series.
///
/// The engine owns no market data: it borrows the closes, so the same
/// generated series can be re-run with new window sizes without regenerating.
pub struct BacktestEngine {
    initial_equity: f64,
}

impl Default for BacktestEngine {
    fn default() -> Self {
        Self::new(INITIAL_EQUITY)
    }
}

impl BacktestEngine {
    pub fn new(initial_equity: f64) -> Self {
        Self { initial_equity }
    }

    /// Run the crossover backtest.
    ///
    /// Rejects the window configuration before touching the data: the fast
    /// window must be at least 2, the slow at least 3, and fast < slow.
    ///
    /// Timing convention is "mark at open, trade at close": each bar first
    /// accrues the return using the position held entering the bar, and only
    /// then processes the crossover transition. A position opened at bar `i`
    /// does not earn bar `i`'s return.
    pub fn run(
        &self,
        closes: &[f64],
        fast_period: usize,
        slow_period: usize,
    ) -> Result<BacktestResult> {
        if fast_period < 2 || slow_period < 3 || fast_period >= slow_period {
            return Err(Error::InvalidWindowConfig {
                fast: fast_period,
                slow: slow_period,
            });
        }

        tracing::debug!(
            "Running backtest: {} bars, fast={}, slow={}",
            closes.len(),
            fast_period,
            slow_period
        );

        let fast_ma = sma_series(closes, fast_period);
        let slow_ma = sma_series(closes, slow_period);

        let mut equity = self.initial_equity;
        let mut peak = equity;
        let mut max_drawdown = 0.0f64;
        let mut position = Position::Flat;
        let mut entry_price = 0.0;
        let mut winning_trades = 0usize;
        let mut closed_trades = 0usize;

        let mut equity_curve = Vec::with_capacity(closes.len().max(1));
        equity_curve.push(equity);
        let mut strategy_returns = Vec::with_capacity(closes.len().saturating_sub(1));
        let mut buy_signals = Vec::new();
        let mut sell_signals = Vec::new();

        for i in 1..closes.len() {
            let daily_return = (closes[i] - closes[i - 1]) / closes[i - 1];

            // Accrue first, using the position held entering the bar.
            let strategy_return = match position {
                Position::Long => daily_return,
                Position::Flat => 0.0,
            };
            strategy_returns.push(strategy_return);

            equity *= 1.0 + strategy_return;
            peak = peak.max(equity);
            max_drawdown = max_drawdown.min((equity - peak) / peak);
            equity_curve.push(equity);

            // Then evaluate the crossover, once both windows have filled.
            if let (Some(fast), Some(slow)) = (fast_ma[i], slow_ma[i]) {
                let want_long = fast > slow;

                match (position, want_long) {
                    (Position::Flat, true) => {
                        position = Position::Long;
                        entry_price = closes[i];
                        buy_signals.push(i);
                    }
                    (Position::Long, false) => {
                        position = Position::Flat;
                        sell_signals.push(i);
                        closed_trades += 1;
                        if closes[i] > entry_price {
                            winning_trades += 1;
                        }
                    }
                    _ => {}
                }
            }
        }

        // Force-close a position still open after the last bar. A flat exit
        // is not a win.
        if position == Position::Long {
            closed_trades += 1;
            if closes[closes.len() - 1] > entry_price {
                winning_trades += 1;
            }
        }

        let sharpe_ratio = metrics::annualized_sharpe(&strategy_returns);
        let total_return_pct = (equity / self.initial_equity - 1.0) * 100.0;
        let win_rate = if closed_trades > 0 {
            winning_trades as f64 / closed_trades as f64 * 100.0
        } else {
            0.0
        };

        tracing::info!(
            "Backtest complete: {} trades, return {:+.2}%, sharpe {:.2}",
            closed_trades,
            total_return_pct,
            sharpe_ratio
        );

        Ok(BacktestResult {
            fast_ma,
            slow_ma,
            equity_curve,
            buy_signals,
            sell_signals,
            total_return_pct,
            sharpe_ratio,
            max_drawdown_pct: max_drawdown * 100.0,
            win_rate,
            closed_trades,
            final_equity: equity,
        })
    }
}
