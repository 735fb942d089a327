pub mod generator;

pub use generator::{GeneratorParams, MarketGenerator, DEFAULT_BARS, INITIAL_PRICE, PRICE_FLOOR};
