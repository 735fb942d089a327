use serde::{Deserialize, Serialize};

/// Trading periods per year used to annualize the Sharpe ratio.
pub const PERIODS_PER_YEAR: f64 = 252.0;

/// Immutable result bundle from one backtest run.
///
/// Produced once per run and consumed read-only by whatever renders it
/// (charts, report, JSON); the next run supersedes it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Fast SMA, aligned with the input closes; `None` before the window fills.
    pub fast_ma: Vec<Option<f64>>,
    /// Slow SMA, same alignment.
    pub slow_ma: Vec<Option<f64>>,
    /// Equity per bar: the initial seed value plus one entry per bar after
    /// the first, so its length equals the number of closes.
    pub equity_curve: Vec<f64>,
    /// Bar indices where the strategy went FLAT -> LONG.
    pub buy_signals: Vec<usize>,
    /// Bar indices where the strategy went LONG -> FLAT.
    pub sell_signals: Vec<usize>,
    pub total_return_pct: f64,
    pub sharpe_ratio: f64,
    /// Most negative equity decline from its running peak, in percent (<= 0).
    pub max_drawdown_pct: f64,
    /// Winning trades / closed trades, in percent. 0.0 when nothing closed.
    pub win_rate: f64,
    pub closed_trades: usize,
    pub final_equity: f64,
}

impl BacktestResult {
    /// Print a formatted performance report to stdout.
    pub fn print_report(&self) {
        println!("\n========== BACKTEST PERFORMANCE ==========\n");

        println!("  Total Return:    {:+.2}%", self.total_return_pct);
        println!("  Final Equity:    ${:.2}", self.final_equity);
        println!("  Sharpe Ratio:    {:.2}", self.sharpe_ratio);
        println!("  Max Drawdown:    {:.2}%", self.max_drawdown_pct);
        println!("  Closed Trades:   {}", self.closed_trades);
        println!("  Win Rate:        {:.1}%", self.win_rate);
        println!(
            "  Signals:         {} buys / {} sells",
            self.buy_signals.len(),
            self.sell_signals.len()
        );

        println!("\n==========================================\n");
    }
}

/// Mean of the per-bar strategy returns. 0.0 for an empty slice.
pub(crate) fn mean(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64
}

/// Sample standard deviation (n-1 divisor). 0.0 with fewer than 2 observations.
pub(crate) fn sample_std_dev(returns: &[f64], mean: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let variance = returns
        .iter()
        .map(|r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / (returns.len() - 1) as f64;
    variance.sqrt()
}

/// Annualized Sharpe ratio, assuming a zero risk-free rate.
///
/// Guarded against zero variance: a flat return stream scores 0.0 rather
/// than propagating NaN or infinity.
pub(crate) fn annualized_sharpe(returns: &[f64]) -> f64 {
    let mean = mean(returns);
    let std_dev = sample_std_dev(returns, mean);

    if std_dev > 0.0 {
        mean / std_dev * PERIODS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_std_dev() {
        let returns = [0.01, 0.03, 0.05];
        let m = mean(&returns);
        assert!((m - 0.03).abs() < 1e-12);
        // Sample variance = (0.0004 + 0 + 0.0004) / 2 = 0.0004
        assert!((sample_std_dev(&returns, m) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_single_observation_is_zero() {
        assert_eq!(sample_std_dev(&[0.05], 0.05), 0.0);
    }

    #[test]
    fn test_sharpe_constant_returns_is_zero() {
        // Zero variance must be guarded, not NaN or infinite.
        let sharpe = annualized_sharpe(&[0.01; 40]);
        assert_eq!(sharpe, 0.0);
    }

    #[test]
    fn test_sharpe_positive_for_positive_drift() {
        let returns = [0.01, 0.02, 0.01, 0.03, 0.02, 0.01];
        let sharpe = annualized_sharpe(&returns);
        assert!(sharpe > 0.0);
        assert!(sharpe.is_finite());
    }
}
