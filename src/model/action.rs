//! Bulk-action form selection and its supporting types.

use super::cluster::Cluster;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which bulk-action sub-form is open, without transition parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionFormKind {
    #[serde(rename = "add:tags")]
    AddTags,
    #[serde(rename = "remove:tags")]
    RemoveTags,
    #[serde(rename = "export:pcap")]
    ExportPcap,
    #[serde(rename = "export:csv")]
    ExportCsv,
    #[serde(rename = "scrub:pcap")]
    ScrubPcap,
    #[serde(rename = "delete:session")]
    DeleteSession,
    #[serde(rename = "send:session")]
    SendSession,
}

impl ActionFormKind {
    /// Stable external identifier of the form.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::AddTags => "add:tags",
            Self::RemoveTags => "remove:tags",
            Self::ExportPcap => "export:pcap",
            Self::ExportCsv => "export:csv",
            Self::ScrubPcap => "scrub:pcap",
            Self::DeleteSession => "delete:session",
            Self::SendSession => "send:session",
        }
    }
}

impl fmt::Display for ActionFormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An open bulk-action form. Only `SendSession` carries a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form")]
pub enum ActionForm {
    #[serde(rename = "add:tags")]
    AddTags,
    #[serde(rename = "remove:tags")]
    RemoveTags,
    #[serde(rename = "export:pcap")]
    ExportPcap,
    #[serde(rename = "export:csv")]
    ExportCsv,
    #[serde(rename = "scrub:pcap")]
    ScrubPcap,
    #[serde(rename = "delete:session")]
    DeleteSession,
    #[serde(rename = "send:session")]
    SendSession { cluster: Cluster },
}

impl ActionForm {
    #[must_use]
    pub const fn kind(&self) -> ActionFormKind {
        match self {
            Self::AddTags => ActionFormKind::AddTags,
            Self::RemoveTags => ActionFormKind::RemoveTags,
            Self::ExportPcap => ActionFormKind::ExportPcap,
            Self::ExportCsv => ActionFormKind::ExportCsv,
            Self::ScrubPcap => ActionFormKind::ScrubPcap,
            Self::DeleteSession => ActionFormKind::DeleteSession,
            Self::SendSession { .. } => ActionFormKind::SendSession,
        }
    }

    /// Target cluster of a send-to-cluster form.
    #[must_use]
    pub const fn cluster(&self) -> Option<&Cluster> {
        match self {
            Self::SendSession { cluster } => Some(cluster),
            _ => None,
        }
    }
}

impl fmt::Display for ActionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendSession { cluster } => write!(f, "{} ({})", self.kind(), cluster.name),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// Which sessions a bulk action applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionScope {
    /// Sessions whose detail rows are expanded
    Open,
    /// Sessions on the current page
    #[default]
    Visible,
    /// Every session matching the current search
    Matching,
}

/// Session counts bound in from the parent listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounts {
    pub open: u64,
    pub visible: u64,
    pub matching: u64,
}

impl SessionCounts {
    /// Number of sessions a bulk action with `scope` would touch.
    #[must_use]
    pub const fn for_scope(&self, scope: ActionScope) -> u64 {
        match scope {
            ActionScope::Open => self.open,
            ActionScope::Visible => self.visible,
            ActionScope::Matching => self.matching,
        }
    }
}

/// Kind of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
}

/// Status message left behind when an action form closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    pub text: String,
    pub kind: MessageKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_ids_match_kinds() {
        let cluster = Cluster::new("east", "https://east.example:8005");
        let form = ActionForm::SendSession { cluster };
        assert_eq!(form.kind().id(), "send:session");
        assert_eq!(form.to_string(), "send:session (east)");
        assert_eq!(ActionForm::ScrubPcap.to_string(), "scrub:pcap");
    }

    #[test]
    fn test_form_serialization() {
        assert_eq!(
            serde_json::to_value(ActionForm::ExportCsv).unwrap(),
            json!({"form": "export:csv"})
        );
        let form = ActionForm::SendSession {
            cluster: Cluster::new("west", "https://west.example"),
        };
        assert_eq!(
            serde_json::to_value(form).unwrap(),
            json!({"form": "send:session", "cluster": {"name": "west", "url": "https://west.example"}})
        );
    }

    #[test]
    fn test_kind_deserializes_from_id() {
        let kind: ActionFormKind = serde_json::from_str("\"delete:session\"").unwrap();
        assert_eq!(kind, ActionFormKind::DeleteSession);
    }

    #[test]
    fn test_scope_counts() {
        let counts = SessionCounts {
            open: 2,
            visible: 50,
            matching: 12_000,
        };
        assert_eq!(ActionScope::default(), ActionScope::Visible);
        assert_eq!(counts.for_scope(ActionScope::Matching), 12_000);
        assert_eq!(counts.for_scope(ActionScope::Open), 2);
    }
}
