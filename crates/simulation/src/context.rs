//! Run context: job identity, cancellation, status reporting.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use types::{JobId, SimulatorStatus};

// =============================================================================
// Cancellation
// =============================================================================

/// Shared flag an external supervisor sets to stop a running job. The
/// run loop polls it between datasets; a dataset in flight finishes
/// first.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Run Context
// =============================================================================

/// Per-run identity and control handles threaded through the job loop.
#[derive(Debug, Clone)]
pub struct RunContext {
    job_id: JobId,
    cancel: CancellationToken,
}

impl RunContext {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(job_id: JobId, cancel: CancellationToken) -> Self {
        Self { job_id, cancel }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

// =============================================================================
// Status Sink
// =============================================================================

/// Capability to record job status transitions. The run loop writes
/// `Running` once at start and one terminal status at the end.
pub trait StatusSink {
    fn set_status(&self, job: JobId, status: SimulatorStatus);
}

/// In-memory status store, suitable for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryStatus {
    statuses: Mutex<HashMap<JobId, SimulatorStatus>>,
}

impl InMemoryStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded status for a job; `Submitted` if never updated.
    pub fn get(&self, job: JobId) -> SimulatorStatus {
        match self.statuses.lock() {
            Ok(map) => map.get(&job).copied().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().get(&job).copied().unwrap_or_default(),
        }
    }
}

impl StatusSink for InMemoryStatus {
    fn set_status(&self, job: JobId, status: SimulatorStatus) {
        let mut map = match self.statuses.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.insert(job, status);
    }
}
