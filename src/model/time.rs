//! Time modes, resolved windows and second/millisecond conversions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 3_600_000;

/// External encoding of [`TimeMode::AllTime`].
pub const ALL_TIME_SENTINEL: &str = "-1";

/// External encoding of [`TimeMode::Custom`].
pub const CUSTOM_SENTINEL: &str = "0";

/// How the search time window is derived.
///
/// Serialized as a single string: `"-1"` is all time, `"0"` is a custom
/// start/stop pair, any positive integer is a "last N hours" window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeMode {
    /// A live window ending now and reaching back `n` hours
    RelativeHours(NonZeroU32),
    /// Everything; resolved to a fixed lookback for display only
    AllTime,
    /// Explicit start/stop set by a date edit or inbound time update
    Custom,
}

impl TimeMode {
    /// Build a relative mode, `None` for zero hours.
    #[must_use]
    pub fn relative(hours: u32) -> Option<Self> {
        NonZeroU32::new(hours).map(Self::RelativeHours)
    }

    /// The query-string value for this mode.
    #[must_use]
    pub fn as_param(&self) -> String {
        match self {
            Self::RelativeHours(n) => n.to_string(),
            Self::AllTime => ALL_TIME_SENTINEL.to_string(),
            Self::Custom => CUSTOM_SENTINEL.to_string(),
        }
    }

    /// Hours covered by a relative mode.
    #[must_use]
    pub const fn hours(&self) -> Option<u32> {
        match self {
            Self::RelativeHours(n) => Some(n.get()),
            _ => None,
        }
    }

    /// Whether start/stop are resampled against the clock on every recompute.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Human label for the time-range selector.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::AllTime => "All".to_string(),
            Self::Custom => "Custom".to_string(),
            Self::RelativeHours(n) => relative_label(n.get()),
        }
    }
}

fn relative_label(hours: u32) -> String {
    const DAY: u32 = 24;
    const WEEK: u32 = 7 * DAY;
    const MONTH: u32 = 30 * DAY;
    const YEAR: u32 = 8760;

    let (count, unit) = if hours % YEAR == 0 {
        (hours / YEAR, "year")
    } else if hours >= 2 * MONTH && hours % MONTH == 0 {
        (hours / MONTH, "month")
    } else if hours >= 2 * WEEK && hours % WEEK == 0 {
        (hours / WEEK, "week")
    } else if hours >= 2 * DAY && hours % DAY == 0 {
        (hours / DAY, "day")
    } else {
        (hours, "hour")
    };

    match count {
        1 if unit == "hour" => "Last hour".to_string(),
        1 => format!("Last {unit}"),
        n => format!("Last {n} {unit}s"),
    }
}

/// Error returned when a string is not a valid time mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time mode '{0}': expected -1, 0 or a positive number of hours")]
pub struct TimeModeError(pub String);

impl FromStr for TimeMode {
    type Err = TimeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.parse().map_err(|_| TimeModeError(s.to_string()))?;
        match value {
            -1 => Ok(Self::AllTime),
            0 => Ok(Self::Custom),
            n => u32::try_from(n)
                .ok()
                .and_then(Self::relative)
                .ok_or_else(|| TimeModeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimeMode {
    type Error = TimeModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeMode> for String {
    fn from(mode: TimeMode) -> Self {
        mode.as_param()
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

/// A resolved pair of epoch-millisecond timestamps.
///
/// `stop_ms >= start_ms` holds for every window the resolver produces; a
/// custom edit may still invert them and the inversion is kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub stop_ms: i64,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(start_ms: i64, stop_ms: i64) -> Self {
        Self { start_ms, stop_ms }
    }

    /// A window ending at `now_ms` and reaching back `hours`.
    #[must_use]
    pub const fn ending_at(now_ms: i64, hours: u32) -> Self {
        Self {
            start_ms: now_ms.saturating_sub(hours as i64 * HOUR_MS),
            stop_ms: now_ms,
        }
    }

    /// `stop - start`; negative for an inverted custom window.
    #[must_use]
    pub const fn delta_ms(&self) -> i64 {
        self.stop_ms.saturating_sub(self.start_ms)
    }

    #[must_use]
    pub const fn start_secs(&self) -> i64 {
        millis_to_secs(self.start_ms)
    }

    #[must_use]
    pub const fn stop_secs(&self) -> i64 {
        millis_to_secs(self.stop_ms)
    }

    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.stop_ms < self.start_ms
    }
}

/// Largest accepted timestamp magnitude in epoch seconds, about year
/// 255000. The difference of any two in-range timestamps fits in `i64`
/// milliseconds, and all of them are representable by chrono.
pub const MAX_EPOCH_SECS: i64 = 8_000_000_000_000;

const MAX_EPOCH_MS: i64 = MAX_EPOCH_SECS * 1000;

/// Convert milliseconds to whole seconds, rounding to nearest with ties
/// going away from zero.
#[must_use]
pub const fn millis_to_secs(ms: i64) -> i64 {
    let secs = ms / 1000;
    let rem = ms % 1000;
    if rem >= 500 {
        secs + 1
    } else if rem <= -500 {
        secs - 1
    } else {
        secs
    }
}

/// Scale a seconds value to milliseconds, truncating toward zero.
///
/// Returns `None` for values that are not finite, scale to zero, or lie
/// beyond [`MAX_EPOCH_SECS`] either side of the epoch. Zero is rejected
/// because an unset timestamp and the epoch are indistinguishable on the
/// wire.
#[must_use]
pub fn secs_to_millis(secs: f64) -> Option<i64> {
    let ms = (secs * 1000.0).trunc();
    if !ms.is_finite() || ms == 0.0 || ms.abs() > MAX_EPOCH_MS as f64 {
        return None;
    }
    Some(ms as i64)
}

/// Parse a seconds query parameter (e.g. `"1700000000"`, `"1.5"`) into
/// milliseconds. See [`secs_to_millis`] for the rejection rules.
#[must_use]
pub fn parse_secs_param(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(secs_to_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_mode_parse() {
        assert_eq!("-1".parse::<TimeMode>().unwrap(), TimeMode::AllTime);
        assert_eq!("0".parse::<TimeMode>().unwrap(), TimeMode::Custom);
        assert_eq!("24".parse::<TimeMode>().unwrap(), TimeMode::relative(24).unwrap());
        assert!("-2".parse::<TimeMode>().is_err());
        assert!("1.5".parse::<TimeMode>().is_err());
        assert!("abc".parse::<TimeMode>().is_err());
        assert!("".parse::<TimeMode>().is_err());
    }

    #[test]
    fn test_time_mode_param_round_trip() {
        for raw in ["-1", "0", "1", "720"] {
            assert_eq!(raw.parse::<TimeMode>().unwrap().as_param(), raw);
        }
    }

    #[test]
    fn test_time_mode_serde_as_string() {
        let json = serde_json::to_string(&TimeMode::AllTime).unwrap();
        assert_eq!(json, "\"-1\"");
        let mode: TimeMode = serde_json::from_str("\"6\"").unwrap();
        assert_eq!(mode.hours(), Some(6));
        assert!(serde_json::from_str::<TimeMode>("\"x\"").is_err());
    }

    #[test]
    fn test_labels() {
        let label = |h| TimeMode::relative(h).unwrap().label();
        assert_eq!(label(1), "Last hour");
        assert_eq!(label(6), "Last 6 hours");
        assert_eq!(label(24), "Last 24 hours");
        assert_eq!(label(48), "Last 2 days");
        assert_eq!(label(168), "Last 7 days");
        assert_eq!(label(336), "Last 2 weeks");
        assert_eq!(label(1440), "Last 2 months");
        assert_eq!(label(8760), "Last year");
        assert_eq!(TimeMode::AllTime.label(), "All");
    }

    #[test]
    fn test_millis_to_secs_rounding() {
        assert_eq!(millis_to_secs(1_000_000), 1000);
        assert_eq!(millis_to_secs(1_499), 1);
        assert_eq!(millis_to_secs(1_500), 2);
        assert_eq!(millis_to_secs(-1_499), -1);
        assert_eq!(millis_to_secs(-1_500), -2);
        assert_eq!(millis_to_secs(-2_500), -3);
        assert_eq!(millis_to_secs(i64::MIN), i64::MIN / 1000 - 1);
    }

    #[test]
    fn test_parse_secs_param() {
        assert_eq!(parse_secs_param("1000"), Some(1_000_000));
        assert_eq!(parse_secs_param("1.2345"), Some(1234));
        assert_eq!(parse_secs_param("abc"), None);
        assert_eq!(parse_secs_param("0"), None);
        assert_eq!(parse_secs_param("0.0001"), None);
        assert_eq!(parse_secs_param(""), None);
        assert_eq!(parse_secs_param("inf"), None);
        assert_eq!(parse_secs_param("NaN"), None);
        assert_eq!(parse_secs_param("8000000000000"), Some(MAX_EPOCH_MS));
        assert_eq!(parse_secs_param("-8000000000000"), Some(-MAX_EPOCH_MS));
        assert_eq!(parse_secs_param("8000000000001"), None);
        assert_eq!(parse_secs_param("-9000000000000000"), None);
    }

    #[test]
    fn test_window_delta() {
        let w = TimeWindow::ending_at(10 * HOUR_MS, 3);
        assert_eq!(w.delta_ms(), 3 * HOUR_MS);
        assert!(!w.is_inverted());
        let inverted = TimeWindow::new(2000, 1000);
        assert_eq!(inverted.delta_ms(), -1000);
        assert!(inverted.is_inverted());
    }

    #[test]
    fn test_window_arithmetic_saturates() {
        assert_eq!(TimeWindow::new(i64::MIN, i64::MAX).delta_ms(), i64::MAX);
        assert_eq!(TimeWindow::new(i64::MAX, i64::MIN).delta_ms(), i64::MIN);
        let w = TimeWindow::ending_at(i64::MIN + 1, 24);
        assert_eq!(w.start_ms, i64::MIN);
        assert_eq!(w.stop_ms, i64::MIN + 1);
    }
}
