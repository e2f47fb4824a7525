//! The search state owned by the controls.

use super::request::{SearchIssued, SearchRequest, SearchTime};
use super::time::{TimeMode, TimeWindow};

/// Time mode, resolved window, filter expression and boundedness.
///
/// `window` is `None` only before the first resolution, or while a custom
/// mode is waiting for its first valid start/stop pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub mode: TimeMode,
    pub window: Option<TimeWindow>,
    pub expression: Option<String>,
    pub strictly: bool,
}

impl SearchState {
    #[must_use]
    pub const fn new(mode: TimeMode) -> Self {
        Self {
            mode,
            window: None,
            expression: None,
            strictly: false,
        }
    }

    /// The expression as a filter: `None` when unset or empty.
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.expression.as_deref().filter(|e| !e.is_empty())
    }

    /// `stop - start` of the resolved window.
    #[must_use]
    pub fn delta_ms(&self) -> Option<i64> {
        self.window.as_ref().map(TimeWindow::delta_ms)
    }

    /// Build the outbound request, `None` while the window is unresolved.
    #[must_use]
    pub fn request(&self) -> Option<SearchRequest> {
        let window = self.window.as_ref()?;
        let time = match self.mode {
            TimeMode::AllTime => SearchTime::AllTime,
            _ => SearchTime::from_window(window),
        };
        Some(SearchRequest {
            expression: self.expression.clone(),
            strictly: self.strictly,
            time,
        })
    }

    #[must_use]
    pub fn issued(&self) -> SearchIssued {
        SearchIssued {
            expression: self.expression.clone(),
        }
    }
}
