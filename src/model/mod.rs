//! Data model for the search controls.
//!
//! Everything here is plain in-memory state owned by a single
//! [`SearchControls`](crate::controls::SearchControls) instance: the time
//! mode and resolved window, the filter expression, the boundedness flag,
//! the outbound request built from them, and the action-form selection.
//!
//! Internal timestamps are epoch milliseconds. Everything crossing the
//! query-string or notification boundary is whole seconds.

mod action;
mod cluster;
mod request;
mod state;
mod time;

pub use action::*;
pub use cluster::*;
pub use request::*;
pub use state::*;
pub use time::*;
