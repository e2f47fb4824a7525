//! Projection of the search state onto query parameters.

use super::{QueryParams, DATE, EXPRESSION, START_TIME, STOP_TIME, STRICTLY};
use crate::model::{SearchState, TimeMode, CUSTOM_SENTINEL};

/// Writes the minimal, non-redundant query-string encoding of a
/// [`SearchState`].
///
/// Exactly one time encoding is present afterwards: the `date` mode key, or
/// the `startTime`/`stopTime` pair. The keys of the encoding being replaced
/// are deleted before the new ones are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterSynchronizer;

impl ParameterSynchronizer {
    pub fn project<P: QueryParams + ?Sized>(&self, params: &mut P, state: &SearchState) {
        Self::project_expression(params, state);
        Self::project_time(params, state);
        Self::project_strictly(params, state.strictly);
    }

    fn project_expression<P: QueryParams + ?Sized>(params: &mut P, state: &SearchState) {
        params.set(EXPRESSION, state.filter());
    }

    fn project_time<P: QueryParams + ?Sized>(params: &mut P, state: &SearchState) {
        match (state.mode, state.window) {
            (TimeMode::Custom, Some(window)) => {
                params.set(DATE, None);
                params.set(START_TIME, Some(&window.start_secs().to_string()));
                params.set(STOP_TIME, Some(&window.stop_secs().to_string()));
            }
            (TimeMode::Custom, None) => {
                // custom mode still waiting for its first valid pair
                params.set(START_TIME, None);
                params.set(STOP_TIME, None);
                params.set(DATE, Some(CUSTOM_SENTINEL));
            }
            (mode, _) => {
                params.set(START_TIME, None);
                params.set(STOP_TIME, None);
                params.set(DATE, Some(&mode.as_param()));
            }
        }
    }

    /// Write only the boundedness key.
    pub fn project_strictly<P: QueryParams + ?Sized>(params: &mut P, strictly: bool) {
        params.set(STRICTLY, strictly.then_some("true"));
    }
}

/// The time encoding currently present in a parameter store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeEncoding {
    /// Only the mode key
    Mode(String),
    /// Only the start/stop pair, in seconds
    Range { start: String, stop: String },
    /// No time keys at all
    Missing,
    /// Competing or partial encodings
    Conflicting,
}

impl TimeEncoding {
    pub fn read<P: QueryParams + ?Sized>(params: &P) -> Self {
        match (params.get(DATE), params.get(START_TIME), params.get(STOP_TIME)) {
            (Some(date), None, None) => Self::Mode(date.to_string()),
            (None, Some(start), Some(stop)) => Self::Range {
                start: start.to_string(),
                stop: stop.to_string(),
            },
            (None, None, None) => Self::Missing,
            _ => Self::Conflicting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeWindow;
    use crate::params::MemoryParams;

    fn state(mode: TimeMode, window: Option<TimeWindow>) -> SearchState {
        SearchState {
            mode,
            window,
            expression: None,
            strictly: false,
        }
    }

    #[test]
    fn test_relative_replaces_range() {
        let mut params = MemoryParams::parse("startTime=1000&stopTime=2000");
        let s = state(TimeMode::relative(6).unwrap(), Some(TimeWindow::new(1, 2)));
        ParameterSynchronizer.project(&mut params, &s);
        assert_eq!(TimeEncoding::read(&params), TimeEncoding::Mode("6".to_string()));
    }

    #[test]
    fn test_custom_replaces_mode() {
        let mut params = MemoryParams::parse("date=24");
        let s = state(
            TimeMode::Custom,
            Some(TimeWindow::new(1_000_000, 2_000_000)),
        );
        ParameterSynchronizer.project(&mut params, &s);
        assert_eq!(
            TimeEncoding::read(&params),
            TimeEncoding::Range {
                start: "1000".to_string(),
                stop: "2000".to_string()
            }
        );
    }

    #[test]
    fn test_all_time_never_writes_range() {
        let mut params = MemoryParams::new();
        let s = state(TimeMode::AllTime, Some(TimeWindow::new(1_000, 9_000)));
        ParameterSynchronizer.project(&mut params, &s);
        assert_eq!(TimeEncoding::read(&params), TimeEncoding::Mode("-1".to_string()));
    }

    #[test]
    fn test_pending_custom_keeps_sentinel() {
        let mut params = MemoryParams::parse("date=0");
        ParameterSynchronizer.project(&mut params, &state(TimeMode::Custom, None));
        assert_eq!(TimeEncoding::read(&params), TimeEncoding::Mode("0".to_string()));
    }

    #[test]
    fn test_expression_and_strictly_presence() {
        let mut params = MemoryParams::parse("expression=old&strictly=true");
        let mut s = state(TimeMode::relative(1).unwrap(), None);
        s.expression = Some(String::new());
        ParameterSynchronizer.project(&mut params, &s);
        assert!(!params.contains(EXPRESSION));
        assert!(!params.contains(STRICTLY));

        s.expression = Some("host == x".to_string());
        s.strictly = true;
        ParameterSynchronizer.project(&mut params, &s);
        assert_eq!(params.get(EXPRESSION), Some("host == x"));
        assert_eq!(params.get(STRICTLY), Some("true"));
    }

    #[test]
    fn test_encoding_read_detects_conflicts() {
        assert_eq!(
            TimeEncoding::read(&MemoryParams::parse("date=1&startTime=5&stopTime=6")),
            TimeEncoding::Conflicting
        );
        assert_eq!(
            TimeEncoding::read(&MemoryParams::parse("startTime=5")),
            TimeEncoding::Conflicting
        );
        assert_eq!(TimeEncoding::read(&MemoryParams::new()), TimeEncoding::Missing);
    }
}
