//! The simulation job and its state machine.

use chrono::NaiveDateTime;
use producer::DataProducer;
use serde_json::Value;
use tracing::{error, info, warn};
use types::{JobId, ProducerType, SeriesType, SimulatorStatus, Span};

use crate::config::SimulatorView;
use crate::context::{RunContext, StatusSink};
use crate::error::ConfigError;
use crate::runner::DatasetRunner;

/// A submitted job: resolved job-level parameters plus the raw dataset
/// list.
///
/// Job-level fields are validated eagerly in `from_value`; each dataset
/// entry stays an untyped `Value` and is resolved only when its turn
/// comes in `run`. A malformed later dataset therefore fails the job
/// after earlier datasets were already persisted, and their files
/// remain on disk.
#[derive(Debug, Clone)]
pub struct SimulationJob {
    id: JobId,
    name: String,
    start: NaiveDateTime,
    span: Span,
    series_type: SeriesType,
    producer_type: ProducerType,
    datasets: Vec<Value>,
    seed: u64,
}

impl SimulationJob {
    /// Build a job from a specification blob.
    pub fn from_value(id: JobId, value: &Value, seed: u64) -> Result<Self, ConfigError> {
        let view = SimulatorView::new(value);
        Ok(Self {
            id,
            name: view.name()?.to_string(),
            start: view.start_date()?,
            span: view.span()?,
            series_type: view.series_type()?,
            producer_type: view.producer_type()?,
            datasets: view.datasets()?.to_vec(),
            seed,
        })
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn producer_type(&self) -> ProducerType {
        self.producer_type
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Drive the job to a terminal status.
    ///
    /// Datasets run in order. The first dataset error logs and ends the
    /// job as `Failed`; cancellation observed between datasets ends it
    /// as `Stopped`; otherwise the job ends `Succeeded`. Errors never
    /// propagate out of this method.
    pub fn run(
        &self,
        ctx: &RunContext,
        status: &dyn StatusSink,
        sink: &dyn DataProducer,
    ) -> SimulatorStatus {
        status.set_status(self.id, SimulatorStatus::Running);
        info!(
            job = %self.id,
            name = %self.name,
            datasets = self.datasets.len(),
            "job started"
        );

        let runner = DatasetRunner {
            start: self.start,
            span: self.span,
            series_type: self.series_type,
            name: &self.name,
            job_seed: self.seed,
        };

        for (index, dataset) in self.datasets.iter().enumerate() {
            let ordinal = index + 1;
            if ctx.is_cancelled() {
                warn!(job = %self.id, dataset = ordinal, "job cancelled");
                status.set_status(self.id, SimulatorStatus::Stopped);
                return SimulatorStatus::Stopped;
            }
            if let Err(e) = runner.run(dataset, ordinal, sink) {
                error!(job = %self.id, dataset = ordinal, error = %e, "dataset failed");
                status.set_status(self.id, SimulatorStatus::Failed);
                return SimulatorStatus::Failed;
            }
        }

        if ctx.is_cancelled() && self.datasets.is_empty() {
            warn!(job = %self.id, "job cancelled");
            status.set_status(self.id, SimulatorStatus::Stopped);
            return SimulatorStatus::Stopped;
        }

        info!(job = %self.id, "job succeeded");
        status.set_status(self.id, SimulatorStatus::Succeeded);
        SimulatorStatus::Succeeded
    }
}
