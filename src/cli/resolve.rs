//! Resolve command handler.
//!
//! Initializes the controls from a query string and reports the
//! synchronized state.

use super::{ControlsSnapshot, RunContext};
use crate::notify::SearchListener;

/// Run the resolve command
pub fn run_resolve(
    query: &str,
    ctx: &RunContext,
    listeners: Vec<Box<dyn SearchListener>>,
) -> ControlsSnapshot {
    let controls = ctx.init_controls(query, listeners);
    tracing::debug!(
        "Resolved '{}' to '{}'",
        query,
        controls.params().to_query_string()
    );
    ControlsSnapshot::capture(&controls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlsConfig;
    use crate::notify::{Notification, RecordingListener};

    fn ctx() -> RunContext {
        RunContext::new(ControlsConfig::utc(), Some(1_700_000_000))
    }

    #[test]
    fn test_resolve_start_stop() {
        let (listener, log) = RecordingListener::new();
        let snapshot = run_resolve(
            "?startTime=1699996400&stopTime=1700000000&strictly=true",
            &ctx(),
            vec![Box::new(listener)],
        );
        assert_eq!(
            snapshot.query,
            "startTime=1699996400&stopTime=1700000000&strictly=true"
        );
        assert_eq!(snapshot.mode, "0");
        assert_eq!(snapshot.start.as_deref(), Some("2023/11/14 21:13:20"));
        assert_eq!(snapshot.delta.as_deref(), Some("01:00:00"));
        assert_eq!(snapshot.notifications, 1);

        let notifications = log.snapshot();
        assert_eq!(notifications.len(), 2);
        assert!(matches!(notifications[0], Notification::SearchChanged(_)));
        assert!(matches!(notifications[1], Notification::SearchIssued(_)));
    }

    #[test]
    fn test_resolve_empty_query() {
        let snapshot = run_resolve("", &ctx(), Vec::new());
        assert_eq!(snapshot.query, "date=1");
        assert_eq!(snapshot.mode_label, "Last hour");
        assert!(!snapshot.strictly);
    }

    #[test]
    fn test_snapshot_text() {
        let snapshot = run_resolve("date=-1&expression=tls", &ctx(), Vec::new());
        let mut out = Vec::new();
        snapshot
            .write_to(crate::notify::ListenerFormat::Text, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("query:       date=-1&expression=tls"));
        assert!(text.contains("time range:  All (-1)"));
        assert!(text.contains("delta:       05:00:00"));
        assert!(text.contains("form:        <none>"));
    }
}
