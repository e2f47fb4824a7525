//! Presets command handler.
//!
//! Lists the choices offered by the time-range selector.

use crate::config::ControlsConfig;
use crate::notify::ListenerFormat;
use serde::Serialize;
use std::io::Write;

/// One selector entry: the `date` parameter value and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeOption {
    pub value: String,
    pub label: String,
    pub default: bool,
}

/// Run the presets command
pub fn run_presets(
    config: &ControlsConfig,
    format: ListenerFormat,
    out: &mut dyn Write,
) -> anyhow::Result<Vec<RangeOption>> {
    let default_mode = config.time.resolver().default_mode();
    let options: Vec<RangeOption> = config
        .time
        .range_options()
        .into_iter()
        .map(|mode| RangeOption {
            value: mode.as_param(),
            label: mode.label(),
            default: mode == default_mode,
        })
        .collect();

    match format {
        ListenerFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &options)?;
            writeln!(out)?;
        }
        ListenerFormat::Text => {
            for option in &options {
                let marker = if option.default { " (default)" } else { "" };
                writeln!(out, "{:>6}  {}{marker}", option.value, option.label)?;
            }
        }
    }
    Ok(options)
}
