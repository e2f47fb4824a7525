//! Query-string parameters: the shareable, bookmarkable encoding of the
//! search state.
//!
//! The parameter store is read once at initialization and from then on is
//! only a projection target: [`ParameterSynchronizer`] rewrites it after
//! every recompute, and in-memory state is never re-derived from it.

mod store;
mod sync;

pub use store::MemoryParams;
pub use sync::{ParameterSynchronizer, TimeEncoding};

use crate::resolver::InitialParams;

/// Time mode sentinel key (`-1`, `0` or hours).
pub const DATE: &str = "date";
/// Custom start, in epoch seconds.
pub const START_TIME: &str = "startTime";
/// Custom stop, in epoch seconds.
pub const STOP_TIME: &str = "stopTime";
/// Filter expression.
pub const EXPRESSION: &str = "expression";
/// Boundedness flag, present as `"true"` when set.
pub const STRICTLY: &str = "strictly";

/// A URL query-parameter store.
///
/// Writing `None` deletes the key; it is never written as an empty value.
pub trait QueryParams {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: Option<&str>);

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<P: QueryParams + ?Sized> QueryParams for &mut P {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Option<&str>) {
        (**self).set(key, value);
    }
}

/// Time parameters as read at initialization.
pub fn initial_time_params<P: QueryParams + ?Sized>(params: &P) -> InitialParams<'_> {
    InitialParams {
        date: params.get(DATE),
        start_time: params.get(START_TIME),
        stop_time: params.get(STOP_TIME),
    }
}

/// Expression as read at initialization; empty means no filter.
pub fn initial_expression<P: QueryParams + ?Sized>(params: &P) -> Option<String> {
    params
        .get(EXPRESSION)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}

/// Boundedness as read at initialization: any non-empty value sets it.
pub fn initial_strictly<P: QueryParams + ?Sized>(params: &P) -> bool {
    params.get(STRICTLY).is_some_and(|v| !v.is_empty())
}
