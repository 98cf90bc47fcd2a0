//! End-to-end job lifecycle tests: success, partial failure,
//! cancellation.

use producer::CsvProducer;
use serde_json::json;
use simulation::{CancellationToken, InMemoryStatus, RunContext, SimulationJob, StatusSink};
use types::{JobId, SimulatorStatus};

fn two_dataset_job(second: serde_json::Value) -> serde_json::Value {
    json!({
        "name": "lifecycle",
        "start_date": "2024-01-01 00:00:00",
        "data_size": 48,
        "series_type": "additive",
        "data": [
            {
                "frequency": "h",
                "seasonality_components": [
                    { "frequency_type": "daily", "amplitude": 1.0 }
                ]
            },
            second
        ]
    })
}

#[test]
fn test_all_valid_datasets_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let value = two_dataset_job(json!({ "frequency": "2h", "noise_level": 0.1 }));
    let job = SimulationJob::from_value(JobId(1), &value, 42).unwrap();
    let status = InMemoryStatus::new();
    let sink = CsvProducer::new(dir.path());

    let outcome = job.run(&RunContext::new(JobId(1)), &status, &sink);

    assert_eq!(outcome, SimulatorStatus::Succeeded);
    assert_eq!(status.get(JobId(1)), SimulatorStatus::Succeeded);
    assert!(dir.path().join("lifecycle1.csv").exists());
    assert!(dir.path().join("lifecycle2.csv").exists());
}

#[test]
fn test_malformed_second_dataset_fails_but_keeps_first_file() {
    let dir = tempfile::tempdir().unwrap();
    // Second dataset lacks the required frequency token.
    let value = two_dataset_job(json!({ "noise_level": 0.1 }));
    let job = SimulationJob::from_value(JobId(2), &value, 42).unwrap();
    let status = InMemoryStatus::new();
    let sink = CsvProducer::new(dir.path());

    let outcome = job.run(&RunContext::new(JobId(2)), &status, &sink);

    assert_eq!(outcome, SimulatorStatus::Failed);
    assert_eq!(status.get(JobId(2)), SimulatorStatus::Failed);
    assert!(dir.path().join("lifecycle1.csv").exists());
    assert!(!dir.path().join("lifecycle2.csv").exists());
}

#[test]
fn test_precancelled_context_stops_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let value = two_dataset_job(json!({ "frequency": "h" }));
    let job = SimulationJob::from_value(JobId(3), &value, 42).unwrap();
    let status = InMemoryStatus::new();
    let sink = CsvProducer::new(dir.path());

    let token = CancellationToken::new();
    token.cancel();
    let ctx = RunContext::with_cancellation(JobId(3), token);

    let outcome = job.run(&ctx, &status, &sink);

    assert_eq!(outcome, SimulatorStatus::Stopped);
    assert_eq!(status.get(JobId(3)), SimulatorStatus::Stopped);
    assert!(!dir.path().join("lifecycle1.csv").exists());
}

#[test]
fn test_status_is_submitted_until_run() {
    let value = two_dataset_job(json!({ "frequency": "h" }));
    let _job = SimulationJob::from_value(JobId(4), &value, 42).unwrap();
    let status = InMemoryStatus::new();
    assert_eq!(status.get(JobId(4)), SimulatorStatus::Submitted);
}

#[test]
fn test_file_content_matches_expected_header_and_length() {
    let dir = tempfile::tempdir().unwrap();
    let value = json!({
        "name": "content",
        "start_date": "2024-01-01 00:00:00",
        "end_date": "2024-01-01 23:00:00",
        "series_type": "additive",
        "data": [ { "frequency": "h" } ]
    });
    let job = SimulationJob::from_value(JobId(5), &value, 42).unwrap();
    let status = InMemoryStatus::new();
    let sink = CsvProducer::new(dir.path());
    job.run(&RunContext::new(JobId(5)), &status, &sink);

    let content = std::fs::read_to_string(dir.path().join("content1.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "value,timestamp,anomaly");
    // Inclusive end date: 24 hourly samples plus the header.
    assert_eq!(lines.len(), 25);
    assert!(lines[1].contains("2024-01-01 00:00:00"));
    assert!(lines[24].contains("2024-01-01 23:00:00"));
}

#[test]
fn test_status_sink_sees_running_then_terminal() {
    struct Recorder(std::sync::Mutex<Vec<SimulatorStatus>>);
    impl StatusSink for Recorder {
        fn set_status(&self, _job: JobId, status: SimulatorStatus) {
            self.0.lock().unwrap().push(status);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let value = two_dataset_job(json!({ "frequency": "h" }));
    let job = SimulationJob::from_value(JobId(6), &value, 42).unwrap();
    let recorder = Recorder(std::sync::Mutex::new(vec![]));
    let sink = CsvProducer::new(dir.path());

    job.run(&RunContext::new(JobId(6)), &recorder, &sink);

    let seen = recorder.0.lock().unwrap();
    assert_eq!(
        *seen,
        vec![SimulatorStatus::Running, SimulatorStatus::Succeeded]
    );
}
