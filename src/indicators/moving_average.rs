/// Simple Moving Average over a whole series.
///
/// Returns a vector aligned index-for-index with `values`: `None` until
/// `period - 1` values have been seen, then the arithmetic mean of the
/// trailing `period` values. Uses a running-sum sliding window, so the whole
/// series costs O(n) regardless of the period.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= period {
            sum -= values[i - period];
        }
        if i + 1 >= period {
            out[i] = Some(sum / period as f64);
        }
    }

    out
}
