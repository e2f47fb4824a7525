//! Default configuration values.

use super::types::{ControlsConfig, OutputConfig, TimeConfig};
use crate::datetime::DEFAULT_DATE_FORMAT;
use crate::notify::ListenerFormat;
use crate::resolver::{ALL_TIME_LOOKBACK_HOURS, DEFAULT_HOURS};

/// Relative choices offered by the time-range selector, in hours.
pub const DEFAULT_RANGE_PRESETS: &[u32] = &[1, 6, 24, 48, 72, 168, 336, 720, 1440, 4380, 8760];

/// Date-picker inputs accepted besides the display format.
pub const DEFAULT_ALT_INPUT_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            default_hours: DEFAULT_HOURS,
            all_time_lookback_hours: ALL_TIME_LOOKBACK_HOURS,
            range_presets: DEFAULT_RANGE_PRESETS.to_vec(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            alt_input_formats: DEFAULT_ALT_INPUT_FORMATS
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
            utc: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ListenerFormat::Text,
        }
    }
}

impl ControlsConfig {
    /// Defaults with picker dates in UTC, for reproducible output.
    #[must_use]
    pub fn utc() -> Self {
        let mut config = Self::default();
        config.time.utc = true;
        config
    }
}
