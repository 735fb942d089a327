use thiserror::Error;

/// Errors produced by the backtest engine.
///
/// The generator accepts any numeric input, so the only validated failure in
/// the crate is a bad moving-average window configuration. Divisions that
/// could hit zero (Sharpe, win rate) are guarded to 0.0 instead of erroring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(
        "invalid moving average windows: fast={fast}, slow={slow} \
         (requires fast >= 2, slow >= 3, fast < slow)"
    )]
    InvalidWindowConfig { fast: usize, slow: usize },
}
