//! Data sinks for generated series.
//!
//! The `DataProducer` trait is the seam between generation and
//! persistence. `CsvProducer` writes one CSV file per dataset; the
//! Kafka producer type is recognized by configuration but not yet
//! implemented.

use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use types::{GeneratedSeries, ProducerType};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while persisting a generated series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Filesystem failure while writing the output.
    Io(String),
    /// The requested producer kind has no implementation yet.
    Unsupported(ProducerType),
    /// The series' parallel vectors disagree in length.
    Ragged {
        timestamps: usize,
        values: usize,
        anomaly: usize,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "sink I/O error: {}", msg),
            Self::Unsupported(kind) => write!(f, "unsupported producer type: {}", kind),
            Self::Ragged {
                timestamps,
                values,
                anomaly,
            } => write!(
                f,
                "ragged series: {} timestamps, {} values, {} anomaly flags",
                timestamps, values, anomaly
            ),
        }
    }
}

impl Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

// =============================================================================
// DataProducer Trait
// =============================================================================

/// Capability to persist one generated dataset under a job name and a
/// 1-based dataset number.
pub trait DataProducer {
    fn persist(
        &self,
        series: &GeneratedSeries,
        name: &str,
        dataset_number: usize,
    ) -> Result<(), SinkError>;
}

/// Build the producer for a configured kind, or reject kinds without
/// an implementation.
pub fn make_producer(
    kind: ProducerType,
    output_dir: impl Into<PathBuf>,
) -> Result<Box<dyn DataProducer>, SinkError> {
    match kind {
        ProducerType::Csv => Ok(Box::new(CsvProducer::new(output_dir))),
        ProducerType::Kafka => Err(SinkError::Unsupported(kind)),
    }
}

// =============================================================================
// CSV Producer
// =============================================================================

/// Writes each dataset to `<output_dir>/<name><n>.csv` with the header
/// `value,timestamp,anomaly`. Missing samples are written as empty
/// value fields and booleans as `True`/`False`, so the files load back
/// into a dataframe unchanged. Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct CsvProducer {
    output_dir: PathBuf,
}

impl CsvProducer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output path for a dataset of this job.
    pub fn path_for(&self, name: &str, dataset_number: usize) -> PathBuf {
        self.output_dir.join(format!("{}{}.csv", name, dataset_number))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl DataProducer for CsvProducer {
    fn persist(
        &self,
        series: &GeneratedSeries,
        name: &str,
        dataset_number: usize,
    ) -> Result<(), SinkError> {
        if series.values.len() != series.timestamps.len()
            || series.anomaly.len() != series.timestamps.len()
        {
            return Err(SinkError::Ragged {
                timestamps: series.timestamps.len(),
                values: series.values.len(),
                anomaly: series.anomaly.len(),
            });
        }
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(name, dataset_number);
        let mut writer = BufWriter::new(File::create(&path)?);

        writeln!(writer, "value,timestamp,anomaly")?;
        for i in 0..series.len() {
            let value = series.values[i];
            if value.is_nan() {
                write!(writer, ",")?;
            } else {
                write!(writer, "{},", value)?;
            }
            writeln!(
                writer,
                "{},{}",
                series.timestamps[i].format("%Y-%m-%d %H:%M:%S"),
                if series.anomaly[i] { "True" } else { "False" }
            )?;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = series.len(), "wrote dataset file");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_series() -> GeneratedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        GeneratedSeries {
            timestamps: (0..3i64)
                .map(|h| start + chrono::Duration::hours(h))
                .collect(),
            values: vec![0.5, f64::NAN, -3.25],
            anomaly: vec![false, false, true],
        }
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let producer = CsvProducer::new(dir.path());
        producer.persist(&sample_series(), "demo", 1).unwrap();

        let content = fs::read_to_string(producer.path_for("demo", 1)).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "value,timestamp,anomaly");
        assert_eq!(lines[1], "0.5,2024-01-01 00:00:00,False");
        assert_eq!(lines[2], ",2024-01-01 01:00:00,False");
        assert_eq!(lines[3], "-3.25,2024-01-01 02:00:00,True");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_dataset_number_lands_in_filename() {
        let dir = tempfile::tempdir().unwrap();
        let producer = CsvProducer::new(dir.path());
        producer.persist(&sample_series(), "run", 3).unwrap();
        assert!(dir.path().join("run3.csv").exists());
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("deep");
        let producer = CsvProducer::new(&nested);
        producer.persist(&sample_series(), "demo", 1).unwrap();
        assert!(nested.join("demo1.csv").exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let producer = CsvProducer::new(dir.path());
        producer.persist(&sample_series(), "demo", 1).unwrap();
        let mut shorter = sample_series();
        shorter.timestamps.truncate(1);
        shorter.values.truncate(1);
        shorter.anomaly.truncate(1);
        producer.persist(&shorter, "demo", 1).unwrap();
        let content = fs::read_to_string(producer.path_for("demo", 1)).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_ragged_series_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let producer = CsvProducer::new(dir.path());
        let mut series = sample_series();
        series.values.pop();
        let err = producer.persist(&series, "demo", 1).err().unwrap();
        assert_eq!(
            err,
            SinkError::Ragged {
                timestamps: 3,
                values: 2,
                anomaly: 3
            }
        );
        assert!(!dir.path().join("demo1.csv").exists());
    }

    #[test]
    fn test_kafka_is_rejected_as_unsupported() {
        let err = make_producer(ProducerType::Kafka, "out").err().unwrap();
        assert_eq!(err, SinkError::Unsupported(ProducerType::Kafka));
    }
}
