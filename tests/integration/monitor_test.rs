use super::support::{closed_url, text_of, StubWebhook};
use hostalert::core::{
    AlertMessage, Dispatch, LocalProbe, Monitor, ProcessStatus, RunOptions, SystemProbe, Target,
    WebhookNotifier,
};
use hostalert::error::{HostAlertError, HostnameError, NotifyError, StatError};
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

struct FakeProbe {
    free: Option<u64>,
    process: ProcessStatus,
}

impl FakeProbe {
    fn with_free(free: u64) -> Self {
        Self {
            free: Some(free),
            process: ProcessStatus {
                running: false,
                detail: "no match".to_string(),
            },
        }
    }
}

impl SystemProbe for FakeProbe {
    fn free_space_mb(&self, path: &Path) -> Result<u64, StatError> {
        self.free.ok_or_else(|| StatError::Stat {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn process_status(&self, _name: &str) -> ProcessStatus {
        self.process.clone()
    }

    fn hostname(&self) -> Result<String, HostnameError> {
        Ok("host1".to_string())
    }
}

/// Counts sends without touching the network
#[derive(Default)]
struct CountingDispatch {
    calls: Cell<usize>,
}

impl Dispatch for CountingDispatch {
    fn send(&self, _target: &Target, _message: &AlertMessage) -> Result<(), NotifyError> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

fn notifier() -> WebhookNotifier {
    WebhookNotifier::new(Duration::from_secs(5)).unwrap()
}

fn write_config(dir: &TempDir, url: &str, limit: u64, process: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    let contents = serde_json::json!({
        "target": {"name": "slack", "url": url},
        "spaceLimitMB": limit,
        "processToMonitor": process,
    });
    fs::write(&path, contents.to_string()).unwrap();
    path
}

fn options(config_path: PathBuf, force: bool) -> RunOptions {
    RunOptions {
        force,
        config_path: Some(config_path),
        path: Some(std::env::temp_dir()),
    }
}

#[test]
fn test_low_space_posts_one_alert() {
    let hook = StubWebhook::start(1, "ok");
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &hook.url, 5120, "");

    let report = Monitor::new(FakeProbe::with_free(4000), notifier())
        .run(&options(config, false))
        .unwrap();
    assert_eq!(report.messages, 1);
    assert_eq!(report.delivered, 1);

    let received = hook.finish();
    assert_eq!(text_of(&received[0]), "Not enough space on host1: 4000 MB free");
}

#[test]
fn test_forced_run_posts_in_order() {
    let hook = StubWebhook::start(3, "ok");
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &hook.url, 5120, "worker");

    let report = Monitor::new(FakeProbe::with_free(9000), notifier())
        .run(&options(config, true))
        .unwrap();
    assert_eq!(report.delivered, 3);

    let texts: Vec<String> = hook.finish().iter().map(text_of).collect();
    assert_eq!(
        texts,
        vec!["no match", "Space on host1: 9000 MB free", "false: no match"]
    );
}

#[test]
fn test_missing_config_sends_nothing() {
    let dir = TempDir::new().unwrap();
    let monitor = Monitor::new(FakeProbe::with_free(1), CountingDispatch::default());

    let err = monitor
        .run(&options(dir.path().join("config.json"), true))
        .unwrap_err();
    assert!(matches!(err, HostAlertError::Config(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_stat_failure_aborts_run() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "http://127.0.0.1:9/hook", 5120, "");
    let probe = FakeProbe {
        free: None,
        ..FakeProbe::with_free(0)
    };

    let err = Monitor::new(probe, CountingDispatch::default())
        .run(&options(config, true))
        .unwrap_err();
    assert!(matches!(err, HostAlertError::Stat(_)));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_empty_url_attempts_every_message() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "", 5120, "worker");

    let report = Monitor::new(FakeProbe::with_free(100), notifier())
        .run(&options(config, true))
        .unwrap();
    // process alert, low space, forced space, forced process
    assert_eq!(report.messages, 4);
    assert_eq!(report.delivered, 0);
    assert_eq!(report.failures.len(), 4);
    assert!(report
        .failures
        .iter()
        .all(|(_, e)| matches!(e, NotifyError::Transport { .. })));

    let err = report.into_result().unwrap_err();
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_unreachable_target_is_degraded() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &closed_url(), 0, "");

    let report = Monitor::new(FakeProbe::with_free(100), notifier())
        .run(&options(config, true))
        .unwrap();
    assert!(report.is_degraded());
    assert_eq!(report.failures[0].0, 0);
}

#[test]
fn test_local_probe_forced_report() {
    let hook = StubWebhook::start(1, "ok");
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &hook.url, 0, "");

    let report = Monitor::new(LocalProbe, notifier())
        .run(&options(config, true))
        .unwrap();
    assert_eq!(report.delivered, 1);

    let text = text_of(&hook.finish()[0]);
    assert!(text.starts_with("Space on "), "unexpected text: {}", text);
    assert!(text.ends_with(" MB free"), "unexpected text: {}", text);
}
