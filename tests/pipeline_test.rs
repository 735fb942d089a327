use quantsim::market::{GeneratorParams, MarketGenerator, DEFAULT_BARS, PRICE_FLOOR};
use quantsim::{BacktestEngine, Error};

#[test]
fn test_full_pipeline() {
    let _ = tracing_subscriber::fmt::try_init();

    // 1. Generate a reference-length market.
    let mut generator = MarketGenerator::seeded(42);
    let params = GeneratorParams {
        trend_bias: 0.3,
        volatility: 0.6,
        regimes: 4,
        bars: DEFAULT_BARS,
    };
    let series = generator.generate(&params);
    assert_eq!(series.len(), DEFAULT_BARS);

    for bar in &series {
        assert!(bar.close >= PRICE_FLOOR);
        assert!(bar.low <= bar.open.min(bar.close));
        assert!(bar.high >= bar.open.max(bar.close));
    }

    // 2. Backtest the crossover strategy on the closes.
    let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();
    let engine = BacktestEngine::default();
    let result = engine.run(&closes, 12, 30).unwrap();

    // Equity stays finite and positive under floored prices and bounded
    // per-bar returns.
    assert_eq!(result.equity_curve.len(), closes.len());
    for equity in &result.equity_curve {
        assert!(equity.is_finite());
        assert!(*equity > 0.0);
    }
    assert!(result.final_equity > 0.0);
    assert!(result.sharpe_ratio.is_finite());
    assert!(result.max_drawdown_pct <= 0.0);

    // Trade bookkeeping stays consistent.
    let buys = result.buy_signals.len();
    let sells = result.sell_signals.len();
    assert!(buys.abs_diff(sells) <= 1);
    let still_long_at_end = buys > sells;
    assert_eq!(
        result.closed_trades,
        sells + usize::from(still_long_at_end)
    );
    assert!(result.win_rate >= 0.0 && result.win_rate <= 100.0);
    if result.closed_trades == 0 {
        assert_eq!(result.win_rate, 0.0);
    }

    // Signal indices point at bars where both windows were defined.
    for &i in result.buy_signals.iter().chain(&result.sell_signals) {
        assert!(i >= 29, "Signal fired before the slow window filled: {}", i);
        assert!(i < closes.len());
    }

    // 3. Re-run the engine alone with new windows on the same series; the
    // generator must not be involved and the series must be untouched.
    let rerun = engine.run(&closes, 5, 20).unwrap();
    assert_eq!(rerun.equity_curve.len(), closes.len());
    for (bar, close) in series.iter().zip(&closes) {
        assert_eq!(bar.close, *close);
    }

    // 4. Bad window configurations are rejected before any computation.
    assert!(matches!(
        engine.run(&closes, 5, 5),
        Err(Error::InvalidWindowConfig { fast: 5, slow: 5 })
    ));
    assert!(matches!(
        engine.run(&closes, 3, 2),
        Err(Error::InvalidWindowConfig { fast: 3, slow: 2 })
    ));
}

#[test]
fn test_seeded_pipeline_is_reproducible() {
    let params = GeneratorParams::default();

    let series_a = MarketGenerator::seeded(7).generate(&params);
    let series_b = MarketGenerator::seeded(7).generate(&params);
    assert_eq!(series_a, series_b);

    let closes: Vec<f64> = series_a.iter().map(|bar| bar.close).collect();
    let engine = BacktestEngine::default();

    let run_a = engine.run(&closes, 10, 25).unwrap();
    let run_b = engine.run(&closes, 10, 25).unwrap();
    assert_eq!(run_a.equity_curve, run_b.equity_curve);
    assert_eq!(run_a.buy_signals, run_b.buy_signals);
    assert_eq!(run_a.final_equity, run_b.final_equity);
}

#[test]
fn test_result_bundle_serializes() {
    let mut generator = MarketGenerator::seeded(3);
    let series = generator.generate(&GeneratorParams {
        bars: 80,
        ..GeneratorParams::default()
    });
    let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();

    let result = BacktestEngine::default().run(&closes, 4, 9).unwrap();
    let json = serde_json::to_string(&result).unwrap();

    // Undefined MA entries must round-trip as nulls for external renderers.
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["fast_ma"][0].is_null());
    assert_eq!(value["equity_curve"][0], 10000.0);
}
