use anyhow::Result;
use clap::Parser;
use quantsim::market::{GeneratorParams, MarketGenerator, DEFAULT_BARS};
use quantsim::BacktestEngine;

/// Synthetic market generator + SMA-crossover backtest.
#[derive(Debug, Parser)]
#[command(name = "quantsim", version, about)]
struct Args {
    /// Trend bias of the generated market, roughly [-1, 1]
    #[arg(long, default_value_t = 0.2, allow_hyphen_values = true)]
    trend: f64,

    /// Shock volatility, roughly [0, 1]
    #[arg(long, default_value_t = 0.5)]
    volatility: f64,

    /// Number of drift regimes
    #[arg(long, default_value_t = 3)]
    regimes: usize,

    /// Number of bars to generate
    #[arg(long, default_value_t = DEFAULT_BARS)]
    bars: usize,

    /// Fast SMA window (>= 2)
    #[arg(long, default_value_t = 12)]
    fast: usize,

    /// Slow SMA window (>= 3, > fast)
    #[arg(long, default_value_t = 30)]
    slow: usize,

    /// Seed for a reproducible market; omit for a fresh sample
    #[arg(long)]
    seed: Option<u64>,

    /// Dump the full result bundle as JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quantsim=info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let args = Args::parse();

    let params = GeneratorParams {
        trend_bias: args.trend,
        volatility: args.volatility,
        regimes: args.regimes,
        bars: args.bars,
    };

    let mut generator = match args.seed {
        Some(seed) => MarketGenerator::seeded(seed),
        None => MarketGenerator::from_entropy(),
    };

    tracing::info!(
        "Generating market: {} bars, trend {:+.2}, volatility {:.2}, {} regimes",
        params.bars,
        params.trend_bias,
        params.volatility,
        params.regimes
    );
    let series = generator.generate(&params);
    let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();

    let engine = BacktestEngine::default();
    let result = engine.run(&closes, args.fast, args.slow)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        result.print_report();
    }

    Ok(())
}
