//! Configuration validation for search-controls.

use super::types::{ControlsConfig, TimeConfig};
use chrono::{DateTime, NaiveDateTime};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for ControlsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.time.validate();

        let mut seen = HashSet::new();
        for (i, cluster) in self.clusters.iter().enumerate() {
            if cluster.name.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("clusters[{i}].name"),
                    "Cluster name must not be empty",
                ));
            } else if !seen.insert(cluster.name.as_str()) {
                errors.push(ConfigError::new(
                    format!("clusters[{i}].name"),
                    format!("Duplicate cluster name '{}'", cluster.name),
                ));
            }
            if cluster.url.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("clusters[{i}].url"),
                    "Cluster URL must not be empty",
                ));
            }
        }

        errors
    }
}

impl Validatable for TimeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.default_hours == 0 {
            errors.push(ConfigError::new(
                "time.default_hours",
                "Default time range must be at least 1 hour",
            ));
        }
        if self.all_time_lookback_hours == 0 {
            errors.push(ConfigError::new(
                "time.all_time_lookback_hours",
                "All-time lookback must be at least 1 hour",
            ));
        }

        if self.range_presets.is_empty() {
            errors.push(ConfigError::new(
                "time.range_presets",
                "At least one time range preset is required",
            ));
        }
        let mut seen = HashSet::new();
        for &hours in &self.range_presets {
            if hours == 0 {
                errors.push(ConfigError::new(
                    "time.range_presets",
                    "Presets must be positive hour counts",
                ));
            } else if !seen.insert(hours) {
                errors.push(ConfigError::new(
                    "time.range_presets",
                    format!("Duplicate preset {hours}"),
                ));
            }
        }

        if let Err(message) = check_date_format(&self.date_format, true) {
            errors.push(ConfigError::new("time.date_format", message));
        }
        for (i, fmt) in self.alt_input_formats.iter().enumerate() {
            if let Err(message) = check_date_format(fmt, false) {
                errors.push(ConfigError::new(
                    format!("time.alt_input_formats[{i}]"),
                    message,
                ));
            }
        }

        errors
    }
}

/// A picker format must be non-empty and able to read back what it writes.
/// The display format must also keep whole-second precision.
fn check_date_format(fmt: &str, require_seconds: bool) -> Result<(), String> {
    if fmt.trim().is_empty() {
        return Err("Date format must not be empty".to_string());
    }
    let sample = DateTime::from_timestamp(1_700_000_000, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default();
    let rendered = sample.format(fmt).to_string();
    match NaiveDateTime::parse_from_str(&rendered, fmt) {
        Ok(parsed) if !require_seconds || parsed.and_utc().timestamp() == 1_700_000_000 => Ok(()),
        Ok(_) => Err(format!(
            "Date format '{fmt}' must include date and time down to seconds"
        )),
        Err(e) => Err(format!("Date format '{fmt}' cannot be parsed back: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cluster;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ControlsConfig::default().is_valid());
    }

    #[test]
    fn test_zero_hours_rejected() {
        let config = ControlsConfig::builder()
            .default_hours(0)
            .all_time_lookback_hours(0)
            .build();
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"time.default_hours".to_string()));
        assert!(fields.contains(&"time.all_time_lookback_hours".to_string()));
    }

    #[test]
    fn test_presets_validated() {
        let config = ControlsConfig::builder().range_presets(vec![1, 0, 1]).build();
        assert_eq!(config.validate().len(), 2);
        let empty = ControlsConfig::builder().range_presets(vec![]).build();
        assert!(!empty.is_valid());
    }

    #[test]
    fn test_date_format_must_round_trip() {
        assert!(check_date_format("%Y/%m/%d %H:%M:%S", true).is_ok());
        assert!(check_date_format("%Y/%m/%d %H:%M", true).is_err());
        assert!(check_date_format("%Y/%m/%d %H:%M", false).is_ok());
        assert!(check_date_format("%Y/%m/%d", false).is_err());
        assert!(check_date_format("", false).is_err());
        let config = ControlsConfig::builder().date_format("%H:%M").build();
        assert_eq!(config.validate()[0].field, "time.date_format");
    }

    #[test]
    fn test_clusters_validated() {
        let config = ControlsConfig::builder()
            .cluster(Cluster::new("east", "https://east.example"))
            .cluster(Cluster::new("east", "https://east2.example"))
            .cluster(Cluster::new("", ""))
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].to_string(), "clusters[1].name: Duplicate cluster name 'east'");
    }
}
