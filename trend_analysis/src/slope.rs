//! Least-squares slope over trailing windows.

/// Slope of the least-squares line through `(0, ys[0]), (1, ys[1]), ...`.
///
/// `None` for fewer than two points or a non-finite result.
pub fn least_squares_slope(ys: &[f64]) -> Option<f64> {
    let n = ys.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / nf;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    let slope = num / den;
    slope.is_finite().then_some(slope)
}

/// Slope at each point over the trailing `window` values ending there.
///
/// Near the start the window holds `min(window, i + 1)` values. A window that
/// contains an undefined value yields `None`.
pub fn trailing_slopes(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let mut buf = Vec::with_capacity(window);
    (0..values.len())
        .map(|i| {
            let from = (i + 1).saturating_sub(window);
            buf.clear();
            for v in &values[from..=i] {
                buf.push((*v)?);
            }
            least_squares_slope(&buf)
        })
        .collect()
}
