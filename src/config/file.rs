//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::ControlsConfig;
use crate::notify::ListenerFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".search-controls.yaml",
    ".search-controls.yml",
    "search-controls.yaml",
    "search-controls.yml",
];

/// Directory name under the user config dir.
const CONFIG_DIR_NAME: &str = "search-controls";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/search-controls/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_paths()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in priority order.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut dirs_to_search = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs_to_search.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_search.push(config_dir.join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_to_search.push(home);
    }
    dirs_to_search
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load a `ControlsConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<ControlsConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: ControlsConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (ControlsConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (ControlsConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (ControlsConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Command-line overrides
// ============================================================================

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub format: Option<ListenerFormat>,
    pub utc: bool,
    pub default_hours: Option<u32>,
}

impl ControlsConfig {
    /// Apply command-line overrides on top of this config.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if overrides.utc {
            self.time.utc = true;
        }
        if let Some(hours) = overrides.default_hours {
            self.time.default_hours = hours;
        }
    }

    /// Load from file and merge with command-line overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config file.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# Search controls configuration
# Place this file at .search-controls.yaml in the working directory or
# ~/.config/search-controls/search-controls.yaml for a user-wide default.
#
# Command-line flags always override file settings.

time:
  # Relative window (hours) used when the URL carries no usable time
  default_hours: 1
  # Lookback (hours) displayed for the "All" time range
  all_time_lookback_hours: 5
  # Choices offered by the time-range selector (hours)
  range_presets: [1, 6, 24, 48, 72, 168, 336, 720, 1440, 4380, 8760]
  # Date-picker display format (strftime syntax)
  date_format: "%Y/%m/%d %H:%M:%S"
  # Other accepted date-picker inputs
  alt_input_formats:
    - "%Y/%m/%d %H:%M"
    - "%Y-%m-%d %H:%M:%S"
    - "%Y-%m-%dT%H:%M:%S"
  # Interpret picker dates as UTC instead of local time
  utc: false

# Remote clusters sessions can be sent to
clusters: []
#  - name: east
#    url: https://east.example.com:8005

output:
  # text or json
  format: text
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".search-controls.yaml");
        std::fs::write(&config_path, "time:\n  default_hours: 6\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
time:
  default_hours: 24
  utc: true
clusters:
  - name: east
    url: https://east.example:8005
output:
  format: json
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.time.default_hours, 24);
        assert!(config.time.utc);
        assert_eq!(config.clusters.len(), 1);
        assert_eq!(config.output.format, ListenerFormat::Json);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "time: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back_on_bad_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "time: [unclosed").unwrap();
        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, ControlsConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_merge_overrides() {
        let mut config = ControlsConfig::default();
        config.merge(&ConfigOverrides {
            format: Some(ListenerFormat::Json),
            utc: true,
            default_hours: Some(6),
        });
        assert_eq!(config.output.format, ListenerFormat::Json);
        assert!(config.time.utc);
        assert_eq!(config.time.default_hours, 6);

        config.merge(&ConfigOverrides::default());
        assert_eq!(config.output.format, ListenerFormat::Json);
    }

    #[test]
    fn test_example_config_parses_to_valid_defaults() {
        let config: ControlsConfig = serde_yaml::from_str(&generate_example_config()).unwrap();
        assert!(config.is_valid());
        assert_eq!(config, ControlsConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "output:\n  format: json\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
