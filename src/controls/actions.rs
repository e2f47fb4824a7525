//! Bulk-action form selection.

use crate::model::{
    ActionForm, ActionScope, Cluster, FormMessage, MessageKind, SessionCounts,
};

/// Tracks which bulk-action sub-form is open.
///
/// Starts with nothing open. Each user action opens one named form,
/// replacing whatever was open; the only way back to nothing is
/// [`close`](Self::close), driven by the inbound "close form" event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFormSelector {
    selection: Option<ActionForm>,
    message: Option<FormMessage>,
    scope: ActionScope,
    counts: SessionCounts,
}

impl ActionFormSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&ActionForm> {
        self.selection.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    /// Status message left by the last close that carried one.
    #[must_use]
    pub const fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    fn open(&mut self, form: ActionForm) {
        tracing::debug!("Opening action form {form}");
        self.selection = Some(form);
    }

    pub fn add_tags(&mut self) {
        self.open(ActionForm::AddTags);
    }

    pub fn remove_tags(&mut self) {
        self.open(ActionForm::RemoveTags);
    }

    pub fn export_pcap(&mut self) {
        self.open(ActionForm::ExportPcap);
    }

    pub fn export_csv(&mut self) {
        self.open(ActionForm::ExportCsv);
    }

    pub fn scrub_pcap(&mut self) {
        self.open(ActionForm::ScrubPcap);
    }

    pub fn delete_session(&mut self) {
        self.open(ActionForm::DeleteSession);
    }

    /// Open the send-to-cluster form for `cluster`. The descriptor is taken
    /// as given.
    pub fn send_session(&mut self, cluster: Cluster) {
        self.open(ActionForm::SendSession { cluster });
    }

    /// Close the open form. A message, when given, replaces the current one
    /// and is always a success message.
    pub fn close(&mut self, message: Option<String>) {
        self.selection = None;
        if let Some(text) = message.filter(|m| !m.is_empty()) {
            self.message = Some(FormMessage {
                text,
                kind: MessageKind::Success,
            });
        }
    }

    // ------------------------------------------------------------------
    // Action scope
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn scope(&self) -> ActionScope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: ActionScope) {
        self.scope = scope;
    }

    #[must_use]
    pub const fn counts(&self) -> SessionCounts {
        self.counts
    }

    pub fn set_counts(&mut self, counts: SessionCounts) {
        self.counts = counts;
    }

    /// Sessions the open form would act on under the current scope.
    #[must_use]
    pub const fn target_count(&self) -> u64 {
        self.counts.for_scope(self.scope)
    }
}
