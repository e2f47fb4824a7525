//! Configuration types for search-controls.

use crate::datetime::DateFormatter;
use crate::model::{Cluster, TimeMode};
use crate::notify::ListenerFormat;
use crate::resolver::TimeResolver;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Top-level configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file and overridable from
/// the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ControlsConfig {
    /// Time-range selector and date-picker settings
    pub time: TimeConfig,
    /// Remote clusters sessions can be sent to
    pub clusters: Vec<Cluster>,
    /// Command output settings
    pub output: OutputConfig,
}

impl ControlsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ControlsConfigBuilder {
        ControlsConfigBuilder::default()
    }

    /// Look up a configured cluster by name.
    #[must_use]
    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }
}

/// Time-range selector and date-picker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TimeConfig {
    /// Relative window (hours) used when the query string has no usable time
    pub default_hours: u32,
    /// Lookback (hours) displayed for the all-time mode
    pub all_time_lookback_hours: u32,
    /// Relative choices offered by the time-range selector (hours)
    pub range_presets: Vec<u32>,
    /// Date-picker display format (chrono strftime syntax)
    pub date_format: String,
    /// Additional accepted date-picker input formats
    pub alt_input_formats: Vec<String>,
    /// Read and display picker dates in UTC instead of local time
    pub utc: bool,
}

impl TimeConfig {
    #[must_use]
    pub fn resolver(&self) -> TimeResolver {
        TimeResolver::new(self.default_hours, self.all_time_lookback_hours)
    }

    #[must_use]
    pub fn date_formatter(&self) -> DateFormatter {
        DateFormatter::new(
            self.date_format.clone(),
            self.alt_input_formats.clone(),
            self.utc,
        )
    }

    /// Selector options: relative presets, then all time, then custom.
    #[must_use]
    pub fn range_options(&self) -> Vec<TimeMode> {
        self.range_presets
            .iter()
            .filter_map(|&h| TimeMode::relative(h))
            .chain([TimeMode::AllTime, TimeMode::Custom])
            .collect()
    }
}

/// Command output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: text or json
    pub format: ListenerFormat,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for constructing `ControlsConfig` with a fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct ControlsConfigBuilder {
    config: ControlsConfig,
}

impl ControlsConfigBuilder {
    pub const fn default_hours(mut self, hours: u32) -> Self {
        self.config.time.default_hours = hours;
        self
    }

    pub const fn all_time_lookback_hours(mut self, hours: u32) -> Self {
        self.config.time.all_time_lookback_hours = hours;
        self
    }

    pub fn range_presets(mut self, presets: Vec<u32>) -> Self {
        self.config.time.range_presets = presets;
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.time.date_format = format.into();
        self
    }

    pub const fn utc(mut self, utc: bool) -> Self {
        self.config.time.utc = utc;
        self
    }

    pub fn cluster(mut self, cluster: Cluster) -> Self {
        self.config.clusters.push(cluster);
        self
    }

    pub const fn output_format(mut self, format: ListenerFormat) -> Self {
        self.config.output.format = format;
        self
    }

    #[must_use]
    pub fn build(self) -> ControlsConfig {
        self.config
    }
}
