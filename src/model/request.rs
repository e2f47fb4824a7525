//! Outbound notification payloads.

use super::time::TimeWindow;
use serde::{Serialize, Serializer};

/// Value sent as `date` when the request covers all time.
pub const ALL_TIME_DATE: i32 = -1;

/// Time portion of a resolved search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTime {
    /// Use the all-time sentinel instead of a moving window, so paging stays
    /// stable while new sessions keep arriving.
    AllTime,
    /// Explicit bounds in whole seconds.
    Range { start_secs: i64, stop_secs: i64 },
}

impl SearchTime {
    #[must_use]
    pub const fn from_window(window: &TimeWindow) -> Self {
        Self::Range {
            start_secs: window.start_secs(),
            stop_secs: window.stop_secs(),
        }
    }
}

/// The canonical `{expression, strictly, time}` tuple emitted after every
/// successful recompute ("search changed").
///
/// Serializes to `{"expression", "strictly", "date": -1}` for all time, or
/// `{"expression", "strictly", "startTime": "<secs>", "stopTime": "<secs>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub expression: Option<String>,
    pub strictly: bool,
    pub time: SearchTime,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequestWire<'a> {
    expression: Option<&'a str>,
    strictly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_time: Option<String>,
}

impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (date, start_time, stop_time) = match self.time {
            SearchTime::AllTime => (Some(ALL_TIME_DATE), None, None),
            SearchTime::Range {
                start_secs,
                stop_secs,
            } => (None, Some(start_secs.to_string()), Some(stop_secs.to_string())),
        };
        SearchRequestWire {
            expression: self.expression.as_deref(),
            strictly: self.strictly,
            date,
            start_time,
            stop_time,
        }
        .serialize(serializer)
    }
}

/// Broadcast "search issued" payload: the raw expression only, for regions
/// that track the filter text but not the time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchIssued {
    pub expression: Option<String>,
}
