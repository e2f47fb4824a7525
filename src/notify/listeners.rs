//! Concrete search listeners: in-memory recording, NDJSON and plain text.

use super::{Notification, SearchListener};
use crate::model::{SearchIssued, SearchRequest, SearchTime};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Output format for notification listeners and command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListenerFormat {
    /// One human-readable line per notification
    #[default]
    Text,
    /// One JSON object per line (NDJSON)
    Json,
}

// ============================================================================
// Recording listener
// ============================================================================

/// Shared handle to the notifications a [`RecordingListener`] has seen.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, notification: Notification) {
        self.lock().push(notification);
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The most recent "search changed" request.
    #[must_use]
    pub fn last_request(&self) -> Option<SearchRequest> {
        self.lock().iter().rev().find_map(|n| match n {
            Notification::SearchChanged(request) => Some(request.clone()),
            Notification::SearchIssued(_) => None,
        })
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    log: NotificationLog,
}

impl RecordingListener {
    /// Create a listener and the handle used to read what it recorded.
    #[must_use]
    pub fn new() -> (Self, NotificationLog) {
        let log = NotificationLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl SearchListener for RecordingListener {
    fn on_search_changed(&mut self, request: &SearchRequest) -> anyhow::Result<()> {
        self.log.push(Notification::SearchChanged(request.clone()));
        Ok(())
    }

    fn on_search_issued(&mut self, issued: &SearchIssued) -> anyhow::Result<()> {
        self.log.push(Notification::SearchIssued(issued.clone()));
        Ok(())
    }
}

// ============================================================================
// NDJSON listener
// ============================================================================

/// Writes each notification as one JSON object per line.
pub struct NdjsonListener {
    writer: Box<dyn Write + Send>,
}

impl NdjsonListener {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }

    fn write_event(&mut self, notification: &Notification) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, notification)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl SearchListener for NdjsonListener {
    fn on_search_changed(&mut self, request: &SearchRequest) -> anyhow::Result<()> {
        self.write_event(&Notification::SearchChanged(request.clone()))
    }

    fn on_search_issued(&mut self, issued: &SearchIssued) -> anyhow::Result<()> {
        self.write_event(&Notification::SearchIssued(issued.clone()))
    }
}

// ============================================================================
// Text listener
// ============================================================================

/// Writes one human-readable line per notification.
pub struct TextListener {
    writer: Box<dyn Write + Send>,
}

impl TextListener {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer }
    }
}

fn describe_expression(expression: Option<&str>) -> &str {
    match expression {
        Some(e) if !e.is_empty() => e,
        _ => "<none>",
    }
}

impl SearchListener for TextListener {
    fn on_search_changed(&mut self, request: &SearchRequest) -> anyhow::Result<()> {
        let time = match request.time {
            SearchTime::AllTime => "all time".to_string(),
            SearchTime::Range {
                start_secs,
                stop_secs,
            } => format!("{start_secs}..{stop_secs}"),
        };
        let bound = if request.strictly { "strict" } else { "unbounded" };
        writeln!(
            self.writer,
            "change:search  expression={} time={time} ({bound})",
            describe_expression(request.expression.as_deref()),
        )?;
        Ok(())
    }

    fn on_search_issued(&mut self, issued: &SearchIssued) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "issue:search   expression={}",
            describe_expression(issued.expression.as_deref())
        )?;
        Ok(())
    }
}

// ============================================================================
// Listener builder
// ============================================================================

/// Build the listener for `format`, writing to `writer`.
#[must_use]
pub fn build_listeners(
    format: ListenerFormat,
    writer: Box<dyn Write + Send>,
) -> Vec<Box<dyn SearchListener>> {
    let listener: Box<dyn SearchListener> = match format {
        ListenerFormat::Json => Box::new(NdjsonListener::new(writer)),
        ListenerFormat::Text => Box::new(TextListener::new(writer)),
    };
    vec![listener]
}
