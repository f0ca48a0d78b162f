//! Relative humidity from temperature and dewpoint.

const MAGNUS_B: f64 = 17.625;
const MAGNUS_C: f64 = 243.04;

/// Relative humidity (%) from air temperature and dewpoint (both °C),
/// using the Magnus approximation. Clamped to `[0, 100]`.
pub fn relative_humidity(temp: f64, dewpoint: f64) -> f64 {
    let actual = (MAGNUS_B * dewpoint / (MAGNUS_C + dewpoint)).exp();
    let saturation = (MAGNUS_B * temp / (MAGNUS_C + temp)).exp();
    (100.0 * actual / saturation).clamp(0.0, 100.0)
}

/// Mean relative humidity over paired samples.
///
/// Returns `None` when there are no samples.
pub fn mean_relative_humidity(temp: &[f64], dewpoint: &[f64]) -> Option<f64> {
    if temp.is_empty() || dewpoint.is_empty() {
        return None;
    }
    let rh: Vec<f64> = temp
        .iter()
        .zip(dewpoint)
        .map(|(&t, &td)| relative_humidity(t, td))
        .collect();
    Some(cmpi_stats::mean(&rh))
}
