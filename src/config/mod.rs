//! Configuration module for search-controls.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - Command-line override merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use search_controls::config::{ControlsConfig, load_or_default};
//!
//! let config = ControlsConfig::builder()
//!     .default_hours(6)
//!     .utc(true)
//!     .build();
//!
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.search-controls.yaml` file in the working directory or
//! `~/.config/search-controls/`:
//!
//! ```yaml
//! time:
//!   default_hours: 24
//! clusters:
//!   - name: east
//!     url: https://east.example.com:8005
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_ALT_INPUT_FORMATS, DEFAULT_RANGE_PRESETS};
pub use types::{ControlsConfig, ControlsConfigBuilder, OutputConfig, TimeConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    search_paths, ConfigFileError, ConfigOverrides, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `ControlsConfig` file format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(ControlsConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
