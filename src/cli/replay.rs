//! Replay command handler.
//!
//! Initializes the controls from a query string, then applies a script of
//! control commands, one JSON object per line. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! {"op": "time_range", "mode": "24"}
//! {"op": "start_time", "text": "2023/11/14 20:00:00"}
//! {"op": "toggle_strictly"}
//! {"op": "time_updated", "stop": 1700000000}
//! {"op": "send_session", "cluster": "east"}
//! {"op": "close_form", "message": "Sent 3 sessions"}
//! ```

use super::{ControlsSnapshot, RunContext};
use crate::clock::Clock;
use crate::controls::{ClusterList, SearchControls};
use crate::error::ControlsError;
use crate::model::{secs_to_millis, ActionFormKind, ActionScope, SessionCounts, TimeMode};
use crate::notify::{CloseForm, InboundEvent, SearchListener, TimeUpdate};
use crate::params::MemoryParams;
use anyhow::Context;
use serde::Deserialize;
use std::io::BufRead;
use std::time::Duration;

/// How long a `send_session` command waits for the cluster list.
const CLUSTER_WAIT: Duration = Duration::from_secs(5);

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Select a time range; `mode` is the `date` parameter value
    TimeRange { mode: TimeMode },
    /// Date-picker text entry for the start bound
    StartTime { text: String },
    /// Date-picker text entry for the stop bound
    StopTime { text: String },
    /// Replace both custom bounds, in epoch seconds
    SetDates {
        start: Option<f64>,
        stop: Option<f64>,
    },
    ToggleStrictly,
    Expression { value: Option<String> },
    /// Re-run the pipeline without changing anything
    Refresh,
    /// Inbound "time updated" event, in epoch seconds
    TimeUpdated {
        #[serde(default)]
        start: Option<f64>,
        #[serde(default)]
        stop: Option<f64>,
    },
    /// Inbound "close form" event
    CloseForm {
        #[serde(default)]
        message: Option<String>,
    },
    /// Open a form that takes no parameter
    OpenForm { form: ActionFormKind },
    /// Open the send-to-cluster form for a configured cluster
    SendSession { cluster: String },
    Scope { scope: ActionScope },
    Counts(SessionCounts),
}

/// Run the replay command
pub fn run_replay(
    query: &str,
    script: impl BufRead,
    ctx: &RunContext,
    listeners: Vec<Box<dyn SearchListener>>,
) -> anyhow::Result<ControlsSnapshot> {
    let mut controls = ctx.init_controls(query, listeners);

    let mut applied = 0usize;
    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read script line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command: ControlCommand = serde_json::from_str(trimmed)
            .map_err(|e| ControlsError::invalid_line(line_no, e.to_string()))?;
        tracing::debug!(line = line_no, ?command, "Applying control command");
        apply(&mut controls, command).with_context(|| format!("script line {line_no}"))?;
        applied += 1;
    }

    tracing::info!(
        "Replayed {applied} command(s), {} search notification(s)",
        controls.notifications_emitted()
    );
    Ok(ControlsSnapshot::capture(&controls))
}

/// Apply one command to the controls.
fn apply<C: Clock>(
    controls: &mut SearchControls<MemoryParams, C>,
    command: ControlCommand,
) -> crate::Result<()> {
    match command {
        ControlCommand::TimeRange { mode } => {
            controls.change_time_range(mode);
        }
        ControlCommand::StartTime { text } => {
            controls.edit_start_time(&text);
        }
        ControlCommand::StopTime { text } => {
            controls.edit_stop_time(&text);
        }
        ControlCommand::SetDates { start, stop } => {
            controls.change_date(
                start.and_then(secs_to_millis),
                stop.and_then(secs_to_millis),
            );
        }
        ControlCommand::ToggleStrictly => {
            controls.change_bounded();
        }
        ControlCommand::Expression { value } => {
            controls.set_expression(value);
        }
        ControlCommand::Refresh => {
            controls.change();
        }
        ControlCommand::TimeUpdated { start, stop } => {
            controls.handle(InboundEvent::TimeUpdated(TimeUpdate { start, stop }));
        }
        ControlCommand::CloseForm { message } => {
            controls.handle(InboundEvent::CloseForm(CloseForm { message }));
        }
        ControlCommand::OpenForm { form } => open_form(controls, form)?,
        ControlCommand::SendSession { cluster } => {
            let unavailable = match controls.wait_for_clusters(CLUSTER_WAIT) {
                ClusterList::Loaded(_) => None,
                ClusterList::Failed(reason) => Some(reason.clone()),
                ClusterList::Pending | ClusterList::Unavailable => {
                    Some("cluster list not loaded".to_string())
                }
            };
            if let Some(reason) = unavailable {
                return Err(ControlsError::cluster(reason));
            }
            let cluster = controls
                .cluster(&cluster)
                .cloned()
                .ok_or_else(|| ControlsError::unknown_cluster(&cluster))?;
            controls.actions_mut().send_session(cluster);
        }
        ControlCommand::Scope { scope } => controls.set_action_scope(scope),
        ControlCommand::Counts(counts) => controls.set_session_counts(counts),
    }
    Ok(())
}

fn open_form<C: Clock>(
    controls: &mut SearchControls<MemoryParams, C>,
    form: ActionFormKind,
) -> crate::Result<()> {
    let actions = controls.actions_mut();
    match form {
        ActionFormKind::AddTags => actions.add_tags(),
        ActionFormKind::RemoveTags => actions.remove_tags(),
        ActionFormKind::ExportPcap => actions.export_pcap(),
        ActionFormKind::ExportCsv => actions.export_csv(),
        ActionFormKind::ScrubPcap => actions.scrub_pcap(),
        ActionFormKind::DeleteSession => actions.delete_session(),
        ActionFormKind::SendSession => {
            return Err(ControlsError::validation(
                "send:session needs a cluster; use the send_session op",
            ))
        }
    }
    Ok(())
}
