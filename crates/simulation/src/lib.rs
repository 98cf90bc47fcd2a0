//! Simulation crate: job orchestration for the time-series simulator.
//!
//! This crate coordinates:
//! - Configuration views over untyped JSON job specifications
//! - Per-dataset generation and persistence (`DatasetRunner`)
//! - The job state machine (`SimulationJob`):
//!
//! ```text
//! Submitted ──> Running ──> Succeeded   (every dataset persisted)
//!                      └──> Failed      (first dataset error)
//!                      └──> Stopped     (external cancellation)
//! ```
//!
//! Dataset configurations are kept untyped until their turn in the run
//! loop, so an invalid later dataset fails the job only after earlier
//! datasets have already been written.

pub mod config;
pub mod context;
pub mod error;
pub mod job;
pub mod runner;

pub use config::{DatasetView, SeasonalityView, SimulatorView};
pub use context::{CancellationToken, InMemoryStatus, RunContext, StatusSink};
pub use error::{ConfigError, SimulationError};
pub use job::SimulationJob;
pub use runner::DatasetRunner;
