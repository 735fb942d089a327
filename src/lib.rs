// Core modules
pub mod backtest;
pub mod error;
pub mod indicators;
pub mod market;
pub mod models;

// Re-export commonly used types
pub use backtest::{BacktestEngine, BacktestResult};
pub use error::Error;
pub use market::{GeneratorParams, MarketGenerator};
pub use models::{Position, PricePoint};

// Error handling
pub type Result<T> = std::result::Result<T, Error>;
