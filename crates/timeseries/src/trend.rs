//! Polynomial trend component.

use types::SeriesType;

/// Evaluate the trend polynomial over sample indices `0..length`.
///
/// Coefficients are ordered highest degree first; the last element is
/// the constant term. Evaluation is Horner's method on the sample
/// index. The polynomial value is added to the mode baseline, so an
/// empty coefficient list (or all zeros) leaves the baseline unchanged.
pub fn trend_component(length: usize, series_type: SeriesType, coefficients: &[f64]) -> Vec<f64> {
    let baseline = series_type.baseline();
    (0..length)
        .map(|i| {
            let x = i as f64;
            let poly = coefficients.iter().fold(0.0, |acc, &c| acc * x + c);
            baseline + poly
        })
        .collect()
}
