//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Handlers take their listeners from the caller so tests can record
//! notifications instead of printing them.

mod presets;
mod replay;
mod resolve;

pub use presets::{run_presets, RangeOption};
pub use replay::{run_replay, ControlCommand};
pub use resolve::run_resolve;

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::ControlsConfig;
use crate::error::ErrorContext;
use crate::controls::{SearchControls, StaticClusters};
use crate::model::{ActionForm, ActionScope, FormMessage};
use crate::notify::{ListenerFormat, SearchListener};
use crate::params::MemoryParams;
use serde::Serialize;
use std::io::{self, Write};

/// Settings shared by every handler.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub config: ControlsConfig,
    /// Fixed "now" in epoch seconds; wall time when unset
    pub now_secs: Option<i64>,
}

impl RunContext {
    #[must_use]
    pub const fn new(config: ControlsConfig, now_secs: Option<i64>) -> Self {
        Self { config, now_secs }
    }

    fn clock(&self) -> Box<dyn Clock> {
        match self.now_secs {
            Some(secs) => Box::new(FixedClock::at_secs(secs)),
            None => Box::new(SystemClock),
        }
    }

    /// Initialize controls over `query`, serving the configured clusters.
    fn init_controls(
        &self,
        query: &str,
        listeners: Vec<Box<dyn SearchListener>>,
    ) -> SearchControls<MemoryParams, Box<dyn Clock>> {
        SearchControls::builder(MemoryParams::parse(query))
            .clock(self.clock())
            .config(self.config.clone())
            .listeners(listeners)
            .cluster_source(StaticClusters(self.config.clusters.clone()))
            .init()
    }
}

/// Final state of the controls after a command, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsSnapshot {
    pub query: String,
    pub mode: String,
    pub mode_label: String,
    pub start: Option<String>,
    pub stop: Option<String>,
    pub delta: Option<String>,
    pub expression: Option<String>,
    pub strictly: bool,
    pub form: Option<ActionForm>,
    pub message: Option<FormMessage>,
    pub scope: ActionScope,
    pub target_count: u64,
    pub notifications: u64,
}

impl ControlsSnapshot {
    pub fn capture<C: Clock>(controls: &SearchControls<MemoryParams, C>) -> Self {
        let actions = controls.actions();
        Self {
            query: controls.params().to_query_string(),
            mode: controls.mode().as_param(),
            mode_label: controls.mode().label(),
            start: controls.start_display(),
            stop: controls.stop_display(),
            delta: controls.delta_display(),
            expression: controls.expression().map(str::to_string),
            strictly: controls.strictly(),
            form: actions.selection().cloned(),
            message: actions.message().cloned(),
            scope: actions.scope(),
            target_count: actions.target_count(),
            notifications: controls.notifications_emitted(),
        }
    }

    /// Write in `format`: a pretty JSON document or aligned text lines.
    pub fn write_to(&self, format: ListenerFormat, out: &mut dyn Write) -> crate::Result<()> {
        match format {
            ListenerFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self).context("rendering snapshot")?;
                writeln!(out)?;
            }
            ListenerFormat::Text => self.write_text(out).context("writing snapshot")?,
        }
        Ok(())
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let none = "<none>";
        writeln!(out, "query:       {}", self.query)?;
        writeln!(out, "time range:  {} ({})", self.mode_label, self.mode)?;
        match (&self.start, &self.stop) {
            (Some(start), Some(stop)) => {
                writeln!(out, "window:      {start} .. {stop}")?;
            }
            _ => writeln!(out, "window:      {none}")?,
        }
        writeln!(out, "delta:       {}", self.delta.as_deref().unwrap_or(none))?;
        writeln!(
            out,
            "expression:  {}",
            self.expression.as_deref().unwrap_or(none)
        )?;
        writeln!(out, "strictly:    {}", self.strictly)?;
        match &self.form {
            Some(form) => writeln!(out, "form:        {form}")?,
            None => writeln!(out, "form:        {none}")?,
        }
        if let Some(message) = &self.message {
            writeln!(out, "message:     {}", message.text)?;
        }
        writeln!(
            out,
            "scope:       {} ({} sessions)",
            scope_name(self.scope),
            self.target_count
        )?;
        writeln!(out, "emitted:     {}", self.notifications)
    }
}

const fn scope_name(scope: ActionScope) -> &'static str {
    match scope {
        ActionScope::Open => "open",
        ActionScope::Visible => "visible",
        ActionScope::Matching => "matching",
    }
}
