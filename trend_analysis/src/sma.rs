/// Trailing simple moving average.
///
/// Point `i` averages `values[i + 1 - window ..= i]`; near the start the
/// window shrinks to whatever is available, so every point has a value.
/// A `window` of 0 is treated as 1.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let w = &values[(i + 1).saturating_sub(window)..=i];
            w.iter().sum::<f64>() / w.len() as f64
        })
        .collect()
}
