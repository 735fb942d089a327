use crate::models::PricePoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Reference series length per generation run.
pub const DEFAULT_BARS: usize = 420;
/// Price of the first bar's open.
pub const INITIAL_PRICE: f64 = 100.0;
/// Closes never go below this, keeping every price strictly positive.
pub const PRICE_FLOOR: f64 = 5.0;

// Weighting constants for the per-bar return mix. Empirically chosen flavor
// values; changing them reshapes generated markets without changing the
// architecture, so they are kept as-is rather than re-derived.
const DRIFT_WEIGHT: f64 = 0.003;
const SEASONAL_WEIGHT: f64 = 0.001;
const SHOCK_WEIGHT: f64 = 0.006;

// Regime drift schedule: a sine wave across regimes plus uniform noise.
const REGIME_WAVE_AMPLITUDE: f64 = 0.18;
const REGIME_WAVE_WEIGHT: f64 = 0.25;
const REGIME_NOISE_SPAN: f64 = 0.15;

// Seasonal oscillation applied per bar.
const SEASONAL_SIN_PERIOD: f64 = 17.0;
const SEASONAL_COS_PERIOD: f64 = 31.0;
const SEASONAL_SIN_AMPLITUDE: f64 = 0.24;
const SEASONAL_COS_AMPLITUDE: f64 = 0.16;

// Maximum fractional wick extension above/below the bar body.
const WICK_SPAN: f64 = 0.012;

/// Inputs for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorParams {
    /// Trend bias, roughly [-1, 1] in the reference UI.
    pub trend_bias: f64,
    /// Shock scale, >= 0, roughly [0, 1] in the reference UI.
    pub volatility: f64,
    /// Number of contiguous drift regimes, >= 1.
    pub regimes: usize,
    /// Series length.
    pub bars: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            trend_bias: 0.0,
            volatility: 0.5,
            regimes: 3,
            bars: DEFAULT_BARS,
        }
    }
}

/// Generates synthetic OHLC price paths from a small parameter set.
///
/// Holds only its random source, so any `Rng` can be injected: a seeded
/// `StdRng` for reproducible series, or a scripted rng in tests. Each call to
/// [`generate`](Self::generate) is an independent stochastic sample; no state
/// carries over between runs beyond the rng stream itself.
pub struct MarketGenerator<R: Rng = StdRng> {
    rng: R,
}

impl MarketGenerator<StdRng> {
    /// Create a generator with a seed for reproducibility.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> MarketGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a complete price series.
    ///
    /// The run is partitioned into `params.regimes` contiguous segments, each
    /// with one drift value drawn up front; the final segment absorbs any
    /// remainder. Every bar then mixes its regime drift, a deterministic
    /// seasonal oscillation, and a Gaussian shock scaled by volatility.
    pub fn generate(&mut self, params: &GeneratorParams) -> Vec<PricePoint> {
        let regimes = params.regimes.max(1);
        let bars = params.bars;
        // Clamped so regimes > bars cannot divide by zero.
        let segment_len = (bars / regimes).max(1);

        let drifts = self.draw_regime_drifts(params.trend_bias, regimes);

        let mut series = Vec::with_capacity(bars);
        let mut price = INITIAL_PRICE;

        for i in 0..bars {
            let regime = (i / segment_len).min(regimes - 1);
            let drift = drifts[regime];
            let shock = self.standard_normal() * params.volatility;
            let seasonal = (i as f64 / SEASONAL_SIN_PERIOD).sin() * SEASONAL_SIN_AMPLITUDE
                + (i as f64 / SEASONAL_COS_PERIOD).cos() * SEASONAL_COS_AMPLITUDE;

            let return_pct =
                drift * DRIFT_WEIGHT + seasonal * SEASONAL_WEIGHT + shock * SHOCK_WEIGHT;

            let open = price;
            let close = (open * (1.0 + return_pct)).max(PRICE_FLOOR);
            let high = open.max(close) * (1.0 + self.rng.gen::<f64>() * WICK_SPAN);
            let low = open.min(close) * (1.0 - self.rng.gen::<f64>() * WICK_SPAN);

            series.push(PricePoint {
                index: i,
                open,
                high,
                low,
                close,
                return_pct,
            });

            price = close;
        }

        tracing::debug!(
            "Generated {} bars across {} regimes (bias {:.2}, vol {:.2})",
            bars,
            regimes,
            params.trend_bias,
            params.volatility
        );

        series
    }

    /// Draw one drift per regime, fixed for the whole run.
    fn draw_regime_drifts(&mut self, trend_bias: f64, regimes: usize) -> Vec<f64> {
        (0..regimes)
            .map(|s| {
                let phase = s as f64 / (regimes.saturating_sub(1).max(1)) as f64;
                let wave = (phase * TAU).sin() * REGIME_WAVE_AMPLITUDE;
                let noise = (self.rng.gen::<f64>() - 0.5) * REGIME_NOISE_SPAN;
                trend_bias + wave * REGIME_WAVE_WEIGHT + noise
            })
            .collect()
    }

    /// Standard-normal draw via the Box-Muller transform.
    ///
    /// Both uniforms are mapped into (0, 1] so the log never sees zero.
    fn standard_normal(&mut self) -> f64 {
        let u = 1.0 - self.rng.gen::<f64>();
        let v = 1.0 - self.rng.gen::<f64>();
        (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
    }
}
