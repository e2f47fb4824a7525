//! Integration tests for the resolve, replay and presets command handlers.

use search_controls::cli::{run_presets, run_replay, run_resolve, RunContext};
use search_controls::notify::{build_listeners, ListenerFormat};
use search_controls::{Cluster, ControlsConfig, Notification, RecordingListener};
use std::io::Write;
use std::sync::{Arc, Mutex};

const NOW_SECS: i64 = 1_700_000_000;

fn ctx() -> RunContext {
    let config = ControlsConfig::builder()
        .utc(true)
        .cluster(Cluster::new("east", "https://east.example:8005"))
        .cluster(Cluster::new("west", "https://west.example:8005"))
        .build();
    RunContext::new(config, Some(NOW_SECS))
}

/// A writer whose contents stay readable after it is handed to a listener.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn resolve_reports_synchronized_query() {
    let snapshot = run_resolve("?date=abc&startTime=1&stopTime=2", &ctx(), Vec::new());
    assert_eq!(snapshot.query, "date=1");
    assert_eq!(snapshot.mode, "1");
    assert_eq!(snapshot.notifications, 1);
}

#[test]
fn resolve_streams_ndjson_notifications() {
    let buffer = SharedBuffer::default();
    let listeners = build_listeners(ListenerFormat::Json, Box::new(buffer.clone()));
    run_resolve("date=-1&expression=tcp", &ctx(), listeners);

    let output = buffer.contents();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "change:search");
    assert_eq!(lines[0]["args"]["date"], -1);
    assert_eq!(lines[0]["args"]["expression"], "tcp");
    assert_eq!(lines[0]["args"]["strictly"], false);
    assert_eq!(lines[1]["event"], "issue:search");
    assert_eq!(lines[1]["args"]["expression"], "tcp");
}

#[test]
fn resolve_text_listener_output() {
    let buffer = SharedBuffer::default();
    let listeners = build_listeners(ListenerFormat::Text, Box::new(buffer.clone()));
    run_resolve("startTime=1000&stopTime=2000&strictly=true", &ctx(), listeners);
    let output = buffer.contents();
    assert!(output.contains("change:search  expression=<none> time=1000..2000 (strict)"));
    assert!(output.contains("issue:search   expression=<none>"));
}

#[test]
fn resolve_survives_extreme_now() {
    for now in [i64::MAX / 100, -9_223_372_036_854_775, i64::MIN] {
        let ctx = RunContext::new(ControlsConfig::default(), Some(now));
        let snapshot = run_resolve("date=1", &ctx, Vec::new());
        assert_eq!(snapshot.query, "date=1");
        assert!(snapshot.delta.is_some());
    }
}

#[test]
fn replay_applies_script_in_order() {
    let script = r#"
{"op": "time_range", "mode": "168"}
{"op": "expression", "value": "host == example.com"}
{"op": "toggle_strictly"}
{"op": "time_updated", "start": 1699990000, "stop": 1700000000}
{"op": "scope", "scope": "open"}
{"op": "counts", "open": 3, "visible": 50, "matching": 900}
{"op": "send_session", "cluster": "west"}
"#;
    let (listener, log) = RecordingListener::new();
    let snapshot = run_replay("", script.as_bytes(), &ctx(), vec![Box::new(listener)]).unwrap();

    assert_eq!(
        snapshot.query,
        "expression=host+%3D%3D+example.com&strictly=true&startTime=1699990000&stopTime=1700000000"
    );
    assert_eq!(snapshot.mode, "0");
    assert_eq!(snapshot.target_count, 3);
    assert_eq!(snapshot.form.map(|f| f.to_string()).as_deref(), Some("send:session (west)"));
    assert_eq!(snapshot.notifications, 5);

    let notifications = log.snapshot();
    assert_eq!(notifications.len(), 10);
    assert!(matches!(
        &notifications[2],
        Notification::SearchChanged(request) if request.expression.is_none()
    ));
}

#[test]
fn replay_reports_bad_lines() {
    let err = run_replay("", "{\"op\": \"dance\"}".as_bytes(), &ctx(), Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("line 1"));
}

#[test]
fn replay_snapshot_as_json() {
    let snapshot = run_replay(
        "date=24",
        r#"{"op": "open_form", "form": "add:tags"}"#.as_bytes(),
        &ctx(),
        Vec::new(),
    )
    .unwrap();
    let mut out = Vec::new();
    snapshot.write_to(ListenerFormat::Json, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["query"], "date=24");
    assert_eq!(value["mode_label"], "Last 24 hours");
    assert_eq!(value["form"]["form"], "add:tags");
    assert_eq!(value["scope"], "visible");
    assert_eq!(value["delta"], "1d 00:00:00");
}

#[test]
fn presets_follow_config() {
    let config = ControlsConfig::builder()
        .range_presets(vec![1, 12])
        .default_hours(12)
        .build();
    let mut out = Vec::new();
    let options = run_presets(&config, ListenerFormat::Text, &mut out).unwrap();
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, ["1", "12", "-1", "0"]);
    assert!(options[1].default);
    assert!(String::from_utf8(out).unwrap().contains("12  Last 12 hours (default)"));
}
