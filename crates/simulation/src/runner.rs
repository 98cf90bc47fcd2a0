//! Single-dataset execution: resolve, generate, persist.

use chrono::NaiveDateTime;
use producer::DataProducer;
use serde_json::Value;
use tracing::debug;
use types::{SeriesType, Span};

use crate::config::DatasetView;
use crate::error::SimulationError;

/// Runs one dataset of a job: resolves its untyped configuration,
/// generates the series, and hands it to the sink. The dataset's RNG
/// seed is derived from the job seed and the 1-based ordinal, so every
/// dataset of a job corrupts independently but reproducibly.
#[derive(Debug, Clone, Copy)]
pub struct DatasetRunner<'a> {
    pub start: NaiveDateTime,
    pub span: Span,
    pub series_type: SeriesType,
    pub name: &'a str,
    pub job_seed: u64,
}

impl DatasetRunner<'_> {
    pub fn run(
        &self,
        dataset: &Value,
        ordinal: usize,
        sink: &dyn DataProducer,
    ) -> Result<(), SimulationError> {
        let spec = DatasetView::new(dataset).resolve()?;
        let seed = self.job_seed.wrapping_add(ordinal as u64);
        let series = timeseries::generate(self.start, self.span, self.series_type, &spec, seed);
        debug!(
            dataset = ordinal,
            samples = series.len(),
            "generated dataset"
        );
        sink.persist(&series, self.name, ordinal)?;
        Ok(())
    }
}
