//! Deterministic synthetic time-series generation.
//!
//! Given a start timestamp, a span, and a `DatasetSpec`, this crate
//! builds a fixed-step timestamp axis, composes cycle + trend +
//! seasonality into a signal, normalizes it into `[-1, 1]`, and
//! injects anomalies (missing samples, outliers, Gaussian noise).
//! Everything is a pure function of its inputs and a seed.

pub mod compose;
pub mod edit;
pub mod seasonality;
pub mod trend;

pub use compose::{build_axis, compose, cycle_component, normalize};
pub use edit::{inject, AnomalyParams};
pub use seasonality::{phase_fraction, seasonality_component};
pub use trend::trend_component;

use chrono::NaiveDateTime;
use types::{DatasetSpec, GeneratedSeries, SeriesType, Span};

/// Generate one complete dataset: axis, composed signal, normalization,
/// anomaly injection.
pub fn generate(
    start: NaiveDateTime,
    span: Span,
    series_type: SeriesType,
    spec: &DatasetSpec,
    seed: u64,
) -> GeneratedSeries {
    let timestamps = build_axis(start, span, spec.frequency);
    let mut values = compose(&timestamps, series_type, spec);
    normalize(&mut values);
    let params = AnomalyParams {
        missing_percentage: spec.missing_percentage,
        outlier_percentage: spec.outlier_percentage,
        noise_level: spec.noise_level,
    };
    let (values, anomaly) = inject(values, &params, seed);
    GeneratedSeries {
        timestamps,
        values,
        anomaly,
    }
}
