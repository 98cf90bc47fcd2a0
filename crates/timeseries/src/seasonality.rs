//! Periodic seasonality components.

use chrono::{Datelike, NaiveDateTime, Timelike};
use std::f64::consts::TAU;
use types::{FrequencyType, SeasonalitySpec, SeriesType};

/// Map a timestamp to this frequency class's phase fraction.
///
/// Daily uses hour-of-day / 24, weekly uses days-from-Monday / 7,
/// monthly uses day-of-month / 30. The monthly divisor is a fixed 30
/// regardless of the actual month length, which makes the waveform
/// continuous across months at the cost of a small drift.
pub fn phase_fraction(frequency_type: FrequencyType, timestamp: &NaiveDateTime) -> f64 {
    match frequency_type {
        FrequencyType::Daily => timestamp.hour() as f64 / 24.0,
        FrequencyType::Weekly => timestamp.weekday().num_days_from_monday() as f64 / 7.0,
        FrequencyType::Monthly => timestamp.day() as f64 / 30.0,
    }
}

/// Evaluate one seasonality component over the timestamp axis.
///
/// Each sample is `amplitude * sin(2π * frequency_multiplier * fraction
/// + phase_shift)` on top of the mode baseline, so amplitude 0 reduces
/// to the baseline exactly.
pub fn seasonality_component(
    timestamps: &[NaiveDateTime],
    series_type: SeriesType,
    spec: &SeasonalitySpec,
) -> Vec<f64> {
    let baseline = series_type.baseline();
    timestamps
        .iter()
        .map(|ts| {
            let fraction = phase_fraction(spec.frequency_type, ts);
            let angle = TAU * spec.frequency_multiplier * fraction + spec.phase_shift;
            baseline + spec.amplitude * angle.sin()
        })
        .collect()
}
