//! Core types for the time-series simulator.
//!
//! This crate provides the shared vocabulary used across the workspace:
//! job/status enums, sampling frequency tokens, resolved dataset
//! specifications, and the generated series container.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Core ID Types
// =============================================================================

/// Unique identifier for a simulation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job({})", self.0)
    }
}

// =============================================================================
// Job Lifecycle Status
// =============================================================================

/// Lifecycle status of a simulation job.
///
/// `Submitted → Running → {Succeeded | Failed | Stopped}`; the three
/// terminal states are absorbing. `Stopped` is only ever reached on
/// behalf of an external supervisor, never from the generation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SimulatorStatus {
    #[default]
    Submitted,
    Running,
    Succeeded,
    Failed,
    Stopped,
}

impl SimulatorStatus {
    /// Whether this status is terminal (absorbing).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Stopped)
    }
}

impl fmt::Display for SimulatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Submitted => "Submitted",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Stopped => "Stopped",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Series Composition Mode
// =============================================================================

/// How components combine across the series: by summation or by
/// multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesType {
    Additive,
    Multiplicative,
}

impl SeriesType {
    /// The neutral element for this mode (0 for additive, 1 for
    /// multiplicative).
    #[inline]
    pub fn baseline(self) -> f64 {
        match self {
            Self::Additive => 0.0,
            Self::Multiplicative => 1.0,
        }
    }

    /// Fold `contribution` into `acc` with this mode's operator.
    #[inline]
    pub fn combine(self, acc: f64, contribution: f64) -> f64 {
        match self {
            Self::Additive => acc + contribution,
            Self::Multiplicative => acc * contribution,
        }
    }

    /// Parse the persisted string form (`"additive"` / `"multiplicative"`).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "additive" => Some(Self::Additive),
            "multiplicative" => Some(Self::Multiplicative),
            _ => None,
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Additive => write!(f, "additive"),
            Self::Multiplicative => write!(f, "multiplicative"),
        }
    }
}

// =============================================================================
// Producer Kind
// =============================================================================

/// Which sink receives generated data. `Kafka` is accepted at the
/// configuration level but not yet backed by an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProducerType {
    #[default]
    Csv,
    Kafka,
}

impl ProducerType {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "csv" | "CSV" => Some(Self::Csv),
            "kafka" => Some(Self::Kafka),
            _ => None,
        }
    }
}

impl fmt::Display for ProducerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Kafka => write!(f, "kafka"),
        }
    }
}

// =============================================================================
// Sampling Frequency
// =============================================================================

/// Sampling step of the timestamp axis: a unit with an integer multiple,
/// parsed from pandas-style tokens (`"h"`, `"2H"`, `"30min"`, `"D"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Second(u32),
    Minute(u32),
    Hour(u32),
    Day(u32),
    Week(u32),
}

impl Frequency {
    /// The fixed step between consecutive timestamps.
    pub fn step(self) -> Duration {
        match self {
            Self::Second(n) => Duration::seconds(n as i64),
            Self::Minute(n) => Duration::minutes(n as i64),
            Self::Hour(n) => Duration::hours(n as i64),
            Self::Day(n) => Duration::days(n as i64),
            Self::Week(n) => Duration::weeks(n as i64),
        }
    }

    /// Parse a frequency token: optional integer multiple followed by a
    /// unit (`s`, `min`/`t`, `h`, `d`, `w`, case-insensitive). A zero
    /// multiple is rejected.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let split = token
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(token.len());
        let (digits, unit) = token.split_at(split);
        let multiple: u32 = if digits.is_empty() {
            1
        } else {
            digits.parse().ok()?
        };
        if multiple == 0 {
            return None;
        }
        match unit.to_ascii_lowercase().as_str() {
            "s" | "sec" => Some(Self::Second(multiple)),
            "min" | "t" => Some(Self::Minute(multiple)),
            "h" | "hr" => Some(Self::Hour(multiple)),
            "d" => Some(Self::Day(multiple)),
            "w" => Some(Self::Week(multiple)),
            _ => None,
        }
    }
}

// =============================================================================
// Time Span
// =============================================================================

/// How far the timestamp axis extends from its start: up to an
/// inclusive end timestamp, or for an exact number of samples. A job
/// carries exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Span {
    Until(NaiveDateTime),
    Count(usize),
}

// =============================================================================
// Seasonality Specification
// =============================================================================

/// Frequency class of one seasonality component. Each class maps a
/// timestamp to a phase fraction: hour-of-day/24, day-of-week/7, or
/// day-of-month/30 (fixed divisor, not the true month length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyType {
    Daily,
    Weekly,
    Monthly,
}

impl FrequencyType {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for FrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// One periodic waveform contributing to the composed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalitySpec {
    pub frequency_type: FrequencyType,
    pub amplitude: f64,
    /// Phase shift in radians.
    pub phase_shift: f64,
    /// Cycles per phase-fraction period; must be >= 0.
    pub frequency_multiplier: f64,
}

// =============================================================================
// Dataset Specification
// =============================================================================

/// Fully resolved generation parameters for one dataset of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Sampling step of the timestamp axis.
    pub frequency: Frequency,
    /// Amplitude of the day-of-year cycle term. The term is folded in
    /// without a mode baseline, so 0 leaves an additive series alone
    /// but flattens a multiplicative one.
    pub cycle_amplitude: f64,
    /// Angular frequency of the cycle term.
    pub cycle_frequency: f64,
    /// Gaussian noise standard deviation applied after normalization.
    pub noise_level: f64,
    /// Polynomial trend coefficients, highest degree first; the last
    /// element is the constant term.
    pub trend_coefficients: Vec<f64>,
    /// Percentage of samples replaced by the missing marker (0-100).
    pub missing_percentage: f64,
    /// Percentage of samples replaced by out-of-band outliers (0-100).
    pub outlier_percentage: f64,
    /// Ordered seasonality components folded into the series.
    pub seasonality_components: Vec<SeasonalitySpec>,
}

// =============================================================================
// Generated Series
// =============================================================================

/// Output of generating one dataset: three parallel sequences of equal
/// length. Timestamps are strictly increasing at a fixed step; values
/// are post-normalization (and post-corruption) floats where `NaN`
/// marks a missing sample; the anomaly mask is true exactly at outlier
/// positions, not at missing positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
    pub anomaly: Vec<bool>,
}

impl GeneratedSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
