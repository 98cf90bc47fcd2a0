//! Typed views over untyped JSON job specifications.
//!
//! A job arrives as a `serde_json::Value` blob. The views here expose
//! typed, defaulted getters over that blob and `resolve()` it into the
//! owned spec structs, reporting `ConfigError` for absent or malformed
//! fields. Dataset views are resolved lazily, one at a time, by the
//! job run loop.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use types::{
    DatasetSpec, Frequency, FrequencyType, ProducerType, SeasonalitySpec, SeriesType, Span,
};

use crate::error::ConfigError;

// =============================================================================
// Field Helpers
// =============================================================================

fn require_str<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, ConfigError> {
    match value.get(field) {
        None | Some(Value::Null) => Err(ConfigError::Missing(field)),
        Some(v) => v
            .as_str()
            .ok_or_else(|| ConfigError::invalid(field, "expected a string")),
    }
}

fn optional_f64(value: &Value, field: &'static str, default: f64) -> Result<f64, ConfigError> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| ConfigError::invalid(field, "expected a number")),
    }
}

fn percentage(value: &Value, field: &'static str) -> Result<f64, ConfigError> {
    let pct = optional_f64(value, field, 0.0)?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(ConfigError::invalid(field, "must be between 0 and 100"));
    }
    Ok(pct)
}

fn parse_datetime(field: &'static str, text: &str) -> Result<NaiveDateTime, ConfigError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(ConfigError::invalid(
        field,
        format!("unparseable datetime '{}'", text),
    ))
}

// =============================================================================
// Simulator (Job-Level) View
// =============================================================================

/// Job-level fields of a specification blob.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorView<'a> {
    value: &'a Value,
}

impl<'a> SimulatorView<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Job name; used as the output filename stem.
    pub fn name(&self) -> Result<&'a str, ConfigError> {
        require_str(self.value, "name")
    }

    pub fn start_date(&self) -> Result<NaiveDateTime, ConfigError> {
        parse_datetime("start_date", require_str(self.value, "start_date")?)
    }

    /// The axis span: exactly one of `end_date` (inclusive end) and
    /// `data_size` (sample count) must be present.
    pub fn span(&self) -> Result<Span, ConfigError> {
        let end = self.value.get("end_date").filter(|v| !v.is_null());
        let size = self.value.get("data_size").filter(|v| !v.is_null());
        match (end, size) {
            (Some(end), None) => {
                let text = end
                    .as_str()
                    .ok_or_else(|| ConfigError::invalid("end_date", "expected a string"))?;
                Ok(Span::Until(parse_datetime("end_date", text)?))
            }
            (None, Some(size)) => {
                let n = size
                    .as_u64()
                    .ok_or_else(|| ConfigError::invalid("data_size", "expected a positive integer"))?;
                Ok(Span::Count(n as usize))
            }
            _ => Err(ConfigError::AmbiguousSpan),
        }
    }

    pub fn series_type(&self) -> Result<SeriesType, ConfigError> {
        let token = require_str(self.value, "series_type")?;
        SeriesType::parse(token)
            .ok_or_else(|| ConfigError::invalid("series_type", format!("unknown value '{}'", token)))
    }

    /// Producer kind; defaults to CSV when absent.
    pub fn producer_type(&self) -> Result<ProducerType, ConfigError> {
        match self.value.get("producer_type") {
            None | Some(Value::Null) => Ok(ProducerType::Csv),
            Some(v) => {
                let token = v
                    .as_str()
                    .ok_or_else(|| ConfigError::invalid("producer_type", "expected a string"))?;
                ProducerType::parse(token).ok_or_else(|| {
                    ConfigError::invalid("producer_type", format!("unknown value '{}'", token))
                })
            }
        }
    }

    /// The raw dataset list. Elements stay untyped until the run loop
    /// resolves them.
    pub fn datasets(&self) -> Result<&'a [Value], ConfigError> {
        match self.value.get("data") {
            None | Some(Value::Null) => Err(ConfigError::Missing("data")),
            Some(v) => v
                .as_array()
                .map(|a| a.as_slice())
                .ok_or_else(|| ConfigError::invalid("data", "expected an array")),
        }
    }
}

// =============================================================================
// Dataset View
// =============================================================================

/// One dataset entry of the job's `data` array.
#[derive(Debug, Clone, Copy)]
pub struct DatasetView<'a> {
    value: &'a Value,
}

impl<'a> DatasetView<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn frequency(&self) -> Result<Frequency, ConfigError> {
        let token = require_str(self.value, "frequency")?;
        Frequency::parse(token).ok_or_else(|| {
            ConfigError::invalid("frequency", format!("unknown token '{}'", token))
        })
    }

    pub fn trend_coefficients(&self) -> Result<Vec<f64>, ConfigError> {
        match self.value.get("trend_coefficient") {
            None | Some(Value::Null) => Ok(vec![0.0, 0.0, 0.0]),
            Some(v) => {
                let array = v.as_array().ok_or_else(|| {
                    ConfigError::invalid("trend_coefficient", "expected an array of numbers")
                })?;
                array
                    .iter()
                    .map(|c| {
                        c.as_f64().ok_or_else(|| {
                            ConfigError::invalid("trend_coefficient", "expected an array of numbers")
                        })
                    })
                    .collect()
            }
        }
    }

    pub fn seasonality_components(&self) -> Result<Vec<SeasonalitySpec>, ConfigError> {
        match self.value.get("seasonality_components") {
            None | Some(Value::Null) => Ok(vec![]),
            Some(v) => {
                let array = v.as_array().ok_or_else(|| {
                    ConfigError::invalid("seasonality_components", "expected an array")
                })?;
                array
                    .iter()
                    .map(|c| SeasonalityView::new(c).resolve())
                    .collect()
            }
        }
    }

    /// Resolve this entry into an owned `DatasetSpec`, applying
    /// defaults and validating ranges.
    pub fn resolve(&self) -> Result<DatasetSpec, ConfigError> {
        let noise_level = optional_f64(self.value, "noise_level", 0.0)?;
        if noise_level < 0.0 {
            return Err(ConfigError::invalid("noise_level", "must not be negative"));
        }
        let missing_percentage = percentage(self.value, "missing_percentage")?;
        let outlier_percentage = percentage(self.value, "outlier_percentage")?;
        if missing_percentage + outlier_percentage > 100.0 {
            return Err(ConfigError::invalid(
                "outlier_percentage",
                "missing and outlier percentages must not exceed 100 combined",
            ));
        }

        Ok(DatasetSpec {
            frequency: self.frequency()?,
            cycle_amplitude: optional_f64(self.value, "cycle_amplitude", 0.0)?,
            cycle_frequency: optional_f64(self.value, "cycle_frequency", 0.0)?,
            noise_level,
            trend_coefficients: self.trend_coefficients()?,
            missing_percentage,
            outlier_percentage,
            seasonality_components: self.seasonality_components()?,
        })
    }
}

// =============================================================================
// Seasonality View
// =============================================================================

/// One seasonality entry of a dataset's `seasonality_components` array.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalityView<'a> {
    value: &'a Value,
}

impl<'a> SeasonalityView<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn resolve(&self) -> Result<SeasonalitySpec, ConfigError> {
        let token = require_str(self.value, "frequency_type")?;
        let frequency_type = FrequencyType::parse(token).ok_or_else(|| {
            ConfigError::invalid("frequency_type", format!("unknown value '{}'", token))
        })?;
        let frequency_multiplier = optional_f64(self.value, "frequency_multiplier", 1.0)?;
        if frequency_multiplier < 0.0 {
            return Err(ConfigError::invalid(
                "frequency_multiplier",
                "must not be negative",
            ));
        }
        Ok(SeasonalitySpec {
            frequency_type,
            amplitude: optional_f64(self.value, "amplitude", 0.0)?,
            phase_shift: optional_f64(self.value, "phase_shift", 0.0)?,
            frequency_multiplier,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
