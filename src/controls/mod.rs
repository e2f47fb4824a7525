//! The search controls component.
//!
//! [`SearchControls`] owns the search state for its whole lifetime. It reads
//! the query parameters once at initialization, and from then on every
//! mutation re-enters the same pipeline ([`SearchControls::change`]): the
//! window is recomputed against one clock sample, the parameters are
//! rewritten, and the listeners are notified.
//!
//! # Example
//!
//! ```rust,ignore
//! use search_controls::{FixedClock, MemoryParams, SearchControls};
//!
//! let params = MemoryParams::parse("startTime=1000&stopTime=2000");
//! let controls = SearchControls::builder(params)
//!     .clock(FixedClock::at_secs(1_700_000_000))
//!     .init();
//! assert_eq!(controls.params().to_query_string(), "startTime=1000&stopTime=2000");
//! ```

mod actions;
mod clusters;

pub use actions::ActionFormSelector;
pub use clusters::{ClusterList, ClusterSource, StaticClusters};

use clusters::ClusterFetch;

use crate::clock::{Clock, SystemClock};
use crate::config::ControlsConfig;
use crate::datetime::{format_delta, DateFormatter};
use crate::model::{
    secs_to_millis, ActionScope, Cluster, SearchRequest, SearchState, SessionCounts, TimeMode,
    TimeWindow,
};
use crate::notify::{InboundEvent, Notifier, SearchListener};
use crate::params::{self, ParameterSynchronizer, QueryParams};
use crate::resolver::{InitialSource, TimeResolver};
use std::time::Duration;

/// Builder for [`SearchControls`].
pub struct SearchControlsBuilder<P, C = SystemClock> {
    params: P,
    clock: C,
    config: ControlsConfig,
    notifier: Notifier,
    cluster_source: Option<Box<dyn FnOnce() -> ClusterFetch>>,
}

impl<P: QueryParams> SearchControlsBuilder<P, SystemClock> {
    fn new(params: P) -> Self {
        Self {
            params,
            clock: SystemClock,
            config: ControlsConfig::default(),
            notifier: Notifier::new(),
            cluster_source: None,
        }
    }
}

impl<P: QueryParams, C: Clock> SearchControlsBuilder<P, C> {
    /// Use a different clock.
    pub fn clock<C2: Clock>(self, clock: C2) -> SearchControlsBuilder<P, C2> {
        SearchControlsBuilder {
            params: self.params,
            clock,
            config: self.config,
            notifier: self.notifier,
            cluster_source: self.cluster_source,
        }
    }

    #[must_use]
    pub fn config(mut self, config: ControlsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn listener(mut self, listener: Box<dyn SearchListener>) -> Self {
        self.notifier.subscribe(listener);
        self
    }

    #[must_use]
    pub fn listeners(mut self, listeners: Vec<Box<dyn SearchListener>>) -> Self {
        for listener in listeners {
            self.notifier.subscribe(listener);
        }
        self
    }

    /// Fetch the cluster list from `source` when the controls initialize.
    #[must_use]
    pub fn cluster_source<S: ClusterSource>(mut self, source: S) -> Self {
        self.cluster_source = Some(Box::new(move || ClusterFetch::spawn(source)));
        self
    }

    /// Initialize the controls from the query parameters and emit the first
    /// notification pair.
    pub fn init(self) -> SearchControls<P, C> {
        let time = &self.config.time;
        let resolver = time.resolver();
        let formatter = time.date_formatter();
        let range_options = time.range_options();

        let (clusters, cluster_fetch) = match self.cluster_source {
            Some(start) => (ClusterList::Pending, Some(start())),
            None => (ClusterList::Unavailable, None),
        };

        let now = self.clock.now_ms();
        let initial = resolver.initial(&params::initial_time_params(&self.params), now);
        match initial.source {
            InitialSource::ModeParam | InitialSource::StartStop => {
                tracing::debug!("Initial time {} from parameters", initial.mode);
            }
            InitialSource::Fallback => {
                tracing::debug!(
                    "Unusable time parameters, falling back to {}",
                    initial.mode
                );
            }
            InitialSource::Default => {
                tracing::debug!("No time parameters, defaulting to {}", initial.mode);
            }
        }

        let mut state = SearchState::new(initial.mode);
        state.window = initial.window;
        state.expression = params::initial_expression(&self.params);
        state.strictly = params::initial_strictly(&self.params);

        let mut controls = SearchControls {
            clock: self.clock,
            params: self.params,
            resolver,
            synchronizer: ParameterSynchronizer,
            notifier: self.notifier,
            formatter,
            range_options,
            state,
            actions: ActionFormSelector::new(),
            clusters,
            cluster_fetch,
        };
        controls.change();
        controls
    }
}

/// Search controls over a query-parameter store `P`, sampling time from `C`.
pub struct SearchControls<P, C = SystemClock> {
    clock: C,
    params: P,
    resolver: TimeResolver,
    synchronizer: ParameterSynchronizer,
    notifier: Notifier,
    formatter: DateFormatter,
    range_options: Vec<TimeMode>,
    state: SearchState,
    actions: ActionFormSelector,
    clusters: ClusterList,
    cluster_fetch: Option<ClusterFetch>,
}

impl<P: QueryParams> SearchControls<P, SystemClock> {
    /// Start building controls over `params`.
    pub fn builder(params: P) -> SearchControlsBuilder<P, SystemClock> {
        SearchControlsBuilder::new(params)
    }
}

impl<P: QueryParams, C: Clock> SearchControls<P, C> {
    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    /// Recompute, synchronize and notify.
    ///
    /// Returns the emitted request, or `None` while the window is still
    /// unresolved (custom mode with no dates yet), in which case nothing is
    /// emitted.
    pub fn change(&mut self) -> Option<SearchRequest> {
        let now = self.clock.now_ms();
        self.state.window = self
            .resolver
            .recompute(self.state.mode, self.state.window, now);

        if let Some(window) = self.state.window {
            tracing::debug!(
                mode = %self.state.mode,
                start = window.start_ms,
                stop = window.stop_ms,
                delta = window.delta_ms(),
                "Recomputed search window"
            );
        }

        self.synchronizer.project(&mut self.params, &self.state);

        let request = self.state.request()?;
        let issued = self.state.issued();
        self.notifier.notify(&request, &issued);
        Some(request)
    }

    // ------------------------------------------------------------------
    // User mutations
    // ------------------------------------------------------------------

    /// Select a time range from the selector. Choosing custom freezes the
    /// current window as the custom one.
    pub fn change_time_range(&mut self, mode: TimeMode) -> Option<SearchRequest> {
        self.state.mode = mode;
        self.change()
    }

    /// Apply a custom start/stop pair in milliseconds.
    ///
    /// A missing or zero bound aborts the edit: state, parameters and
    /// listeners are left untouched.
    pub fn change_date(
        &mut self,
        start_ms: Option<i64>,
        stop_ms: Option<i64>,
    ) -> Option<SearchRequest> {
        let Some(window) = TimeResolver::custom_window(start_ms, stop_ms) else {
            tracing::debug!(?start_ms, ?stop_ms, "Ignoring invalid custom time");
            return None;
        };
        if window.is_inverted() {
            tracing::debug!(
                start = window.start_ms,
                stop = window.stop_ms,
                "Custom stop time is before start time"
            );
        }
        self.state.mode = TimeMode::Custom;
        self.state.window = Some(window);
        self.change()
    }

    /// Date-picker edit of the start bound.
    pub fn edit_start_time(&mut self, text: &str) -> Option<SearchRequest> {
        let start = self.formatter.parse(text);
        let stop = self.state.window.map(|w| w.stop_ms);
        self.change_date(start, stop)
    }

    /// Date-picker edit of the stop bound.
    pub fn edit_stop_time(&mut self, text: &str) -> Option<SearchRequest> {
        let start = self.state.window.map(|w| w.start_ms);
        let stop = self.formatter.parse(text);
        self.change_date(start, stop)
    }

    /// Toggle whether results must fall strictly inside the window.
    pub fn change_bounded(&mut self) -> Option<SearchRequest> {
        self.state.strictly = !self.state.strictly;
        self.change()
    }

    /// Replace the filter expression. `None` and `""` both clear it.
    pub fn set_expression(&mut self, expression: Option<String>) -> Option<SearchRequest> {
        self.state.expression = expression;
        self.change()
    }

    // ------------------------------------------------------------------
    // Inbound events
    // ------------------------------------------------------------------

    /// Handle an inbound notification.
    pub fn handle(&mut self, event: InboundEvent) -> Option<SearchRequest> {
        match event {
            InboundEvent::TimeUpdated(update) => {
                let current = self.state.window;
                let start = update
                    .start
                    .and_then(secs_to_millis)
                    .or(current.map(|w| w.start_ms));
                let stop = update
                    .stop
                    .and_then(secs_to_millis)
                    .or(current.map(|w| w.stop_ms));
                self.change_date(start, stop)
            }
            InboundEvent::CloseForm(close) => {
                self.actions.close(close.message);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Action forms
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn actions(&self) -> &ActionFormSelector {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionFormSelector {
        &mut self.actions
    }

    pub fn set_action_scope(&mut self, scope: ActionScope) {
        self.actions.set_scope(scope);
    }

    pub fn set_session_counts(&mut self, counts: SessionCounts) {
        self.actions.set_counts(counts);
    }

    // ------------------------------------------------------------------
    // Clusters
    // ------------------------------------------------------------------

    /// Pick up the cluster fetch result if it has arrived.
    pub fn poll_clusters(&mut self) -> &ClusterList {
        if let Some(result) = self.cluster_fetch.as_ref().and_then(ClusterFetch::try_complete) {
            self.clusters = clusters::settle(result);
            self.cluster_fetch = None;
        }
        &self.clusters
    }

    /// Block up to `timeout` for the cluster fetch to finish.
    pub fn wait_for_clusters(&mut self, timeout: Duration) -> &ClusterList {
        if let Some(result) = self.cluster_fetch.as_ref().and_then(|f| f.wait(timeout)) {
            self.clusters = clusters::settle(result);
            self.cluster_fetch = None;
        }
        &self.clusters
    }

    #[must_use]
    pub const fn clusters(&self) -> &ClusterList {
        &self.clusters
    }

    /// Look up a loaded cluster by name.
    #[must_use]
    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters.find(name)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub const fn mode(&self) -> TimeMode {
        self.state.mode
    }

    #[must_use]
    pub const fn window(&self) -> Option<TimeWindow> {
        self.state.window
    }

    #[must_use]
    pub fn delta_ms(&self) -> Option<i64> {
        self.state.delta_ms()
    }

    /// Delta formatted as `[-][Nd ]HH:MM:SS`.
    #[must_use]
    pub fn delta_display(&self) -> Option<String> {
        self.delta_ms().map(format_delta)
    }

    /// Start bound in the date-picker format.
    #[must_use]
    pub fn start_display(&self) -> Option<String> {
        self.state
            .window
            .and_then(|w| self.formatter.format(w.start_ms))
    }

    /// Stop bound in the date-picker format.
    #[must_use]
    pub fn stop_display(&self) -> Option<String> {
        self.state
            .window
            .and_then(|w| self.formatter.format(w.stop_ms))
    }

    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.state.expression.as_deref()
    }

    #[must_use]
    pub const fn strictly(&self) -> bool {
        self.state.strictly
    }

    /// Choices offered by the time-range selector.
    #[must_use]
    pub fn range_options(&self) -> &[TimeMode] {
        &self.range_options
    }

    #[must_use]
    pub const fn params(&self) -> &P {
        &self.params
    }

    pub fn into_params(self) -> P {
        self.params
    }

    /// Notifications emitted since initialization, counting each
    /// changed/issued pair once.
    #[must_use]
    pub const fn notifications_emitted(&self) -> u64 {
        self.notifier.emitted()
    }
}

impl<P: std::fmt::Debug, C> std::fmt::Debug for SearchControls<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControls")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("actions", &self.actions)
            .field("clusters", &self.clusters)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
