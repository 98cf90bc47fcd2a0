//! Timestamp axis construction, component composition, normalization.

use chrono::{Datelike, NaiveDateTime};
use types::{DatasetSpec, Frequency, SeriesType, Span};

use crate::seasonality::seasonality_component;
use crate::trend::trend_component;

/// Build the fixed-step timestamp axis from `start`.
///
/// `Span::Count(n)` yields exactly `n` samples; `Span::Until(end)`
/// yields every step up to and including `end`. A start past the end
/// yields an empty axis.
pub fn build_axis(start: NaiveDateTime, span: Span, frequency: Frequency) -> Vec<NaiveDateTime> {
    let step = frequency.step();
    match span {
        Span::Count(n) => {
            let mut axis = Vec::with_capacity(n);
            let mut t = start;
            for _ in 0..n {
                axis.push(t);
                t += step;
            }
            axis
        }
        Span::Until(end) => {
            let mut axis = Vec::new();
            let mut t = start;
            while t <= end {
                axis.push(t);
                t += step;
            }
            axis
        }
    }
}

/// The long-horizon cycle term: `amplitude * sin(frequency * d / 365)`
/// where `d` is the 1-based day of year.
///
/// Unlike trend and seasonality, the cycle term carries no mode
/// baseline; the raw product is folded in as-is. In multiplicative
/// mode an amplitude of 0 therefore flattens the whole series.
pub fn cycle_component(timestamps: &[NaiveDateTime], amplitude: f64, frequency: f64) -> Vec<f64> {
    timestamps
        .iter()
        .map(|ts| {
            let day_of_year = ts.ordinal() as f64;
            amplitude * (frequency * day_of_year / 365.0).sin()
        })
        .collect()
}

/// Compose the raw (pre-normalization) signal over the axis: cycle,
/// then trend, then each seasonality component in spec order, folded
/// with the mode's operator. Only trend and seasonality carry the mode
/// baseline; the cycle term is folded raw.
pub fn compose(timestamps: &[NaiveDateTime], series_type: SeriesType, spec: &DatasetSpec) -> Vec<f64> {
    let mut signal = vec![series_type.baseline(); timestamps.len()];

    let cycle = cycle_component(timestamps, spec.cycle_amplitude, spec.cycle_frequency);
    fold_in(&mut signal, &cycle, series_type);

    let trend = trend_component(timestamps.len(), series_type, &spec.trend_coefficients);
    fold_in(&mut signal, &trend, series_type);

    for component in &spec.seasonality_components {
        let values = seasonality_component(timestamps, series_type, component);
        fold_in(&mut signal, &values, series_type);
    }

    signal
}

fn fold_in(signal: &mut [f64], component: &[f64], series_type: SeriesType) {
    for (acc, c) in signal.iter_mut().zip(component.iter()) {
        *acc = series_type.combine(*acc, *c);
    }
}

/// Min-max scale `values` into `[-1, 1]` in place.
///
/// A zero-range (constant) input maps every sample to the lower bound
/// -1.0 rather than dividing by zero. Empty input is a no-op.
pub fn normalize(values: &mut [f64]) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter() {
        min = min.min(*v);
        max = max.max(*v);
    }
    let range = max - min;
    if values.is_empty() {
        return;
    }
    if range == 0.0 {
        for v in values.iter_mut() {
            *v = -1.0;
        }
    } else {
        for v in values.iter_mut() {
            *v = (*v - min) / range * 2.0 - 1.0;
        }
    }
}
