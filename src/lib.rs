//! **Search controls for a network-session viewer.**
//!
//! `search-controls` resolves a time window, a filter expression and a
//! result-boundedness flag into one canonical search request, keeps that
//! state mirrored in URL query parameters so searches are shareable and
//! survive reloads, and republishes every change to listeners. It also
//! tracks which bulk-action form (tagging, export, delete, send to cluster)
//! is open.
//!
//! ## Core Concepts & Modules
//!
//! - **[`resolver`]**: the [`TimeResolver`] reconciles the three time
//!   representations (relative "last N hours", explicit start/stop, and the
//!   all-time sentinel) into one [`TimeMode`] and [`TimeWindow`].
//! - **[`params`]**: the [`QueryParams`] store contract and the
//!   [`ParameterSynchronizer`] that keeps exactly one time encoding in the
//!   query string.
//! - **[`notify`]**: the typed outbound/inbound messages and the
//!   [`SearchListener`] contract.
//! - **[`controls`]**: [`SearchControls`], which owns the state and runs the
//!   recompute → synchronize → notify pipeline on every mutation.
//! - **[`config`]**: YAML configuration with discovery and validation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use search_controls::{MemoryParams, RecordingListener, SearchControls, TimeMode};
//!
//! let (listener, log) = RecordingListener::new();
//! let mut controls = SearchControls::builder(MemoryParams::parse("?date=24&strictly=true"))
//!     .listener(Box::new(listener))
//!     .init();
//!
//! controls.change_time_range(TimeMode::AllTime);
//! assert_eq!(controls.params().to_query_string(), "date=-1&strictly=true");
//! assert_eq!(log.len(), 4);
//! ```
//!
//! ## Deterministic time
//!
//! Every recompute samples an injected [`Clock`] exactly once. Tests and the
//! CLI's `--now` flag substitute a [`FixedClock`]:
//!
//! ```no_run
//! use search_controls::{FixedClock, MemoryParams, SearchControls};
//!
//! let controls = SearchControls::builder(MemoryParams::new())
//!     .clock(FixedClock::at_secs(1_700_000_000))
//!     .init();
//! assert_eq!(controls.window().map(|w| w.stop_ms), Some(1_700_000_000_000));
//! ```

// No unwrap() outside tests
#![warn(clippy::unwrap_used)]
// Pedantic lints allowed crate-wide
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod controls;
pub mod datetime;
pub mod error;
pub mod model;
pub mod notify;
pub mod params;
pub mod resolver;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ControlsConfig, ControlsConfigBuilder, Validatable};
pub use controls::{
    ActionFormSelector, ClusterList, ClusterSource, SearchControls, SearchControlsBuilder,
    StaticClusters,
};
pub use datetime::{format_delta, DateFormatter};
pub use error::{ControlsError, ErrorContext, Result};
pub use model::{
    ActionForm, ActionFormKind, ActionScope, Cluster, FormMessage, SearchIssued, SearchRequest,
    SearchState, SearchTime, SessionCounts, TimeMode, TimeWindow, HOUR_MS,
};
pub use notify::{
    InboundEvent, ListenerFormat, Notification, Notifier, RecordingListener, SearchListener,
};
pub use params::{MemoryParams, ParameterSynchronizer, QueryParams};
pub use resolver::TimeResolver;
