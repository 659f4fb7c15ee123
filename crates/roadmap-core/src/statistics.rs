//! Small numeric helpers shared by the aggregator and the recommendation engine.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`).
///
/// Returns 0.0 for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Weighted mean of `(value, weight)` pairs.
///
/// Returns `None` when the total weight is not positive.
pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (sum, total_weight) = pairs
        .into_iter()
        .fold((0.0f64, 0.0f64), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });
    if total_weight > 0.0 {
        Some(sum / total_weight)
    } else {
        None
    }
}
