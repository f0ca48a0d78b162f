//! Statistical helper functions for the cmpi workspace.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Smallest finite value, or `None` if the slice holds no finite values.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| Some(acc.map_or(x, |m: f64| m.min(x))))
}

/// Largest finite value, or `None` if the slice holds no finite values.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| Some(acc.map_or(x, |m: f64| m.max(x))))
}

/// Clamp a value into `[0, 1]`. NaN maps to 0.0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Returns `true` if `x` is finite and lies in `[0, 1]`.
pub fn is_unit(x: f64) -> bool {
    x.is_finite() && (0.0..=1.0).contains(&x)
}
