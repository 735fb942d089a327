pub mod engine;
pub mod metrics;

pub use engine::{BacktestEngine, INITIAL_EQUITY};
pub use metrics::BacktestResult;
