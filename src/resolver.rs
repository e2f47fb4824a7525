//! Time resolution: turns a time mode into concrete start/stop timestamps.
//!
//! Three competing representations feed in (a relative "last N hours"
//! selector, an explicit start/stop pair, and the all-time sentinel); the
//! resolver reduces them to one [`TimeMode`] plus one [`TimeWindow`].

use crate::model::{parse_secs_param, TimeMode, TimeWindow};
use std::num::NonZeroU32;

/// Default relative window, in hours.
pub const DEFAULT_HOURS: u32 = 1;

/// Display lookback used to approximate "all time", in hours.
pub const ALL_TIME_LOOKBACK_HOURS: u32 = 5;

/// Time-related query parameters as read at initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitialParams<'a> {
    pub date: Option<&'a str>,
    pub start_time: Option<&'a str>,
    pub stop_time: Option<&'a str>,
}

impl<'a> InitialParams<'a> {
    fn present(value: Option<&'a str>) -> Option<&'a str> {
        value.filter(|v| !v.is_empty())
    }
}

/// Which initialization rule produced the starting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSource {
    /// An explicit `date` parameter was adopted
    ModeParam,
    /// A parseable `startTime`/`stopTime` pair was adopted
    StartStop,
    /// Time parameters were present but unusable; the default was applied
    Fallback,
    /// No time parameters at all; the default was applied
    Default,
}

/// Outcome of initial resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialTime {
    pub mode: TimeMode,
    pub window: Option<TimeWindow>,
    pub source: InitialSource,
}

/// Resolves time modes into windows against a caller-supplied "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeResolver {
    default_mode: TimeMode,
    all_time_lookback_hours: u32,
}

impl Default for TimeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_HOURS, ALL_TIME_LOOKBACK_HOURS)
    }
}

impl TimeResolver {
    /// Zero values fall back to one hour.
    #[must_use]
    pub fn new(default_hours: u32, all_time_lookback_hours: u32) -> Self {
        Self {
            default_mode: TimeMode::relative(default_hours)
                .unwrap_or(TimeMode::RelativeHours(NonZeroU32::MIN)),
            all_time_lookback_hours: all_time_lookback_hours.max(1),
        }
    }

    /// Mode applied when nothing usable arrives in the query string.
    #[must_use]
    pub const fn default_mode(&self) -> TimeMode {
        self.default_mode
    }

    #[must_use]
    pub const fn all_time_window(&self, now_ms: i64) -> TimeWindow {
        TimeWindow::ending_at(now_ms, self.all_time_lookback_hours)
    }

    /// Pick the starting mode and window from the incoming parameters.
    ///
    /// First match wins: an explicit mode, then a parseable start/stop pair,
    /// then the default (flagged as a fallback when time parameters were
    /// present but unusable).
    #[must_use]
    pub fn initial(&self, params: &InitialParams<'_>, now_ms: i64) -> InitialTime {
        let date = InitialParams::present(params.date);
        let start = InitialParams::present(params.start_time);
        let stop = InitialParams::present(params.stop_time);

        if let Some(raw) = date {
            match raw.parse::<TimeMode>() {
                Ok(mode) => {
                    let window = (mode == TimeMode::AllTime).then(|| self.all_time_window(now_ms));
                    return InitialTime {
                        mode,
                        window,
                        source: InitialSource::ModeParam,
                    };
                }
                Err(e) => {
                    tracing::debug!("Ignoring time mode parameter: {e}");
                    return self.fallback();
                }
            }
        }

        if start.is_none() && stop.is_none() {
            return InitialTime {
                mode: self.default_mode,
                window: None,
                source: InitialSource::Default,
            };
        }

        match (start.and_then(parse_secs_param), stop.and_then(parse_secs_param)) {
            (Some(start_ms), Some(stop_ms)) => InitialTime {
                mode: TimeMode::Custom,
                window: Some(TimeWindow::new(start_ms, stop_ms)),
                source: InitialSource::StartStop,
            },
            _ => {
                tracing::debug!(
                    start = start.unwrap_or_default(),
                    stop = stop.unwrap_or_default(),
                    "Unusable start/stop parameters, using default time range"
                );
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> InitialTime {
        InitialTime {
            mode: self.default_mode,
            window: None,
            source: InitialSource::Fallback,
        }
    }

    /// Recompute the window for `mode` at `now_ms`.
    ///
    /// Relative and all-time windows are resampled against `now_ms`; a
    /// custom window is returned exactly as last set.
    #[must_use]
    pub const fn recompute(
        &self,
        mode: TimeMode,
        current: Option<TimeWindow>,
        now_ms: i64,
    ) -> Option<TimeWindow> {
        match mode {
            TimeMode::RelativeHours(hours) => Some(TimeWindow::ending_at(now_ms, hours.get())),
            TimeMode::AllTime => Some(self.all_time_window(now_ms)),
            TimeMode::Custom => current,
        }
    }

    /// Validate a custom start/stop pair from a date edit.
    ///
    /// Both ends must be present and non-zero. Ordering is not checked: an
    /// inverted pair is accepted and yields a negative delta.
    #[must_use]
    pub fn custom_window(start_ms: Option<i64>, stop_ms: Option<i64>) -> Option<TimeWindow> {
        match (start_ms, stop_ms) {
            (Some(start), Some(stop)) if start != 0 && stop != 0 => {
                Some(TimeWindow::new(start, stop))
            }
            _ => None,
        }
    }
}
