use std::sync::{Arc, Mutex};

use tabular_dashboard::ingestion::{
    ingest_upload, FileObserver, IngestionContext, IngestionObserver, IngestionOptions, IngestionSeverity,
    IngestionStats,
};
use tabular_dashboard::IngestionError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(String, usize, usize)>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.successes
            .lock()
            .unwrap()
            .push((ctx.file_name.clone(), stats.rows, stats.columns));
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>, alert_at_or_above: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs.clone()),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    ingest_upload("orders.csv", b"a,b\n1,2\n3,4\n", &options(&obs, IngestionSeverity::Critical)).unwrap();

    assert_eq!(*obs.successes.lock().unwrap(), vec![("orders.csv".to_string(), 2, 2)]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_gets_warning_without_alert_for_empty_file() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = ingest_upload("empty.csv", b"a,b\n", &options(&obs, IngestionSeverity::Critical)).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Warning]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_alerts_when_threshold_is_met() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = ingest_upload("binary.csv", b"a\n\x00\n", &options(&obs, IngestionSeverity::Error)).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Error]);
}

#[test]
fn observer_is_not_told_about_unsupported_files() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = ingest_upload("notes.txt", b"hello", &options(&obs, IngestionSeverity::Info)).unwrap_err();

    assert!(obs.successes.lock().unwrap().is_empty());
    assert!(obs.failures.lock().unwrap().is_empty());
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn file_observer_appends_one_line_per_event() {
    let path = std::env::temp_dir().join(format!("tabular-dashboard-ingest-{}.log", uuid::Uuid::new_v4()));
    let opts = IngestionOptions {
        observer: Some(Arc::new(FileObserver::new(&path))),
        alert_at_or_above: IngestionSeverity::Warning,
        ..Default::default()
    };

    ingest_upload("ok.csv", b"a\n1\n", &opts).unwrap();
    let _ = ingest_upload("empty.csv", b"a\n", &opts).unwrap_err();

    let log = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    // success, failure, alert
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("ok") && lines[0].contains("file=ok.csv") && lines[0].contains("rows=1"));
    assert!(lines[1].contains("fail") && lines[1].contains("file=empty.csv"));
    let _ = std::fs::remove_file(&path);
}
