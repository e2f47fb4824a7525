//! Typed notifications in and out of the search controls.
//!
//! Outbound, every successful recompute produces exactly one
//! [`Notification::SearchChanged`] followed by one
//! [`Notification::SearchIssued`]. Inbound, the controls accept only the two
//! [`InboundEvent`]s. Delivery mechanics belong to the host; this module
//! only fixes the message shapes and the listener contract.

mod listeners;

pub use listeners::{
    build_listeners, ListenerFormat, NdjsonListener, NotificationLog, RecordingListener,
    TextListener,
};

use crate::model::{SearchIssued, SearchRequest};
use serde::{Deserialize, Serialize};

/// An outbound notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "args")]
pub enum Notification {
    /// Scoped to the parent listing that executes the query
    #[serde(rename = "change:search")]
    SearchChanged(SearchRequest),
    /// Broadcast to independent regions that only track the filter text
    #[serde(rename = "issue:search")]
    SearchIssued(SearchIssued),
}

/// Payload of an inbound "time updated" event, in epoch seconds.
///
/// Each present, non-zero field overwrites the corresponding bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct TimeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<f64>,
}

/// Payload of an inbound "close form" event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloseForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An inbound notification.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "event", content = "args")]
pub enum InboundEvent {
    #[serde(rename = "update:time")]
    TimeUpdated(TimeUpdate),
    #[serde(rename = "close:form:container")]
    CloseForm(CloseForm),
}

/// Receiver of outbound notifications.
pub trait SearchListener {
    /// Called with the resolved search request.
    fn on_search_changed(&mut self, request: &SearchRequest) -> anyhow::Result<()>;

    /// Called with the raw expression, right after `on_search_changed`.
    fn on_search_issued(&mut self, issued: &SearchIssued) -> anyhow::Result<()>;
}

/// Fans notifications out to every registered listener.
///
/// A failing listener is logged and skipped; it never stops delivery to the
/// others or the second message of the pair.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<Box<dyn SearchListener>>,
    emitted: u64,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_listeners(listeners: Vec<Box<dyn SearchListener>>) -> Self {
        Self {
            listeners,
            emitted: 0,
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn SearchListener>) {
        self.listeners.push(listener);
    }

    /// Number of notification pairs sent so far.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Send "search changed" then "search issued".
    pub fn notify(&mut self, request: &SearchRequest, issued: &SearchIssued) {
        for listener in &mut self.listeners {
            if let Err(e) = listener.on_search_changed(request) {
                tracing::warn!("Search listener error: {e}");
            }
        }
        for listener in &mut self.listeners {
            if let Err(e) = listener.on_search_issued(issued) {
                tracing::warn!("Search listener error: {e}");
            }
        }
        self.emitted += 1;
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}
