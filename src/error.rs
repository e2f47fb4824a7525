//! Unified error types for search-controls.
//!
//! The search state machine itself never fails: invalid input is handled by
//! local fallbacks. Errors only arise at the edges (config files, control
//! scripts, command output, the cluster collaborator).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for search-controls operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ControlsError {
    /// Errors reading or applying a control script
    #[error("Invalid control script: {context}")]
    Script {
        context: String,
        #[source]
        source: ScriptErrorKind,
    },

    /// Errors rendering command output
    #[error("Output failed: {context}")]
    Output {
        context: String,
        #[source]
        source: OutputErrorKind,
    },

    /// Errors fetching the remote cluster list
    #[error("Cluster list unavailable: {0}")]
    Cluster(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific script error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScriptErrorKind {
    #[error("Invalid JSON on line {line}: {message}")]
    InvalidJson { line: usize, message: String },

    #[error("Unknown cluster '{0}'")]
    UnknownCluster(String),
}

/// Specific output error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OutputErrorKind {
    #[error("JSON serialization failed: {0}")]
    Serialization(String),
}

/// Convenient Result type for search-controls operations
pub type Result<T> = std::result::Result<T, ControlsError>;

impl ControlsError {
    /// Create a script error with context
    pub fn script(context: impl Into<String>, source: ScriptErrorKind) -> Self {
        Self::Script {
            context: context.into(),
            source,
        }
    }

    /// Create a script error for a line that is not a valid command
    pub fn invalid_line(line: usize, message: impl Into<String>) -> Self {
        Self::script(
            "parsing command",
            ScriptErrorKind::InvalidJson {
                line,
                message: message.into(),
            },
        )
    }

    /// Create a script error for a cluster name that is not configured
    pub fn unknown_cluster(name: impl Into<String>) -> Self {
        Self::script(
            "resolving cluster",
            ScriptErrorKind::UnknownCluster(name.into()),
        )
    }

    /// Create an output error with context
    pub fn output(context: impl Into<String>, source: OutputErrorKind) -> Self {
        Self::Output {
            context: context.into(),
            source,
        }
    }

    /// Create a cluster fetch error
    pub fn cluster(message: impl Into<String>) -> Self {
        Self::Cluster(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for ControlsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ControlsError {
    fn from(err: serde_json::Error) -> Self {
        Self::output(
            "JSON serialization",
            OutputErrorKind::Serialization(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained onto whatever context the error already
/// carries, so the final message reads outermost first.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ControlsError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ControlsError, new_ctx: &str) -> ControlsError {
    match err {
        ControlsError::Script {
            context: existing,
            source,
        } => ControlsError::Script {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ControlsError::Output {
            context: existing,
            source,
        } => ControlsError::Output {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ControlsError::Io {
            path,
            message,
            source,
        } => ControlsError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ControlsError::Cluster(msg) => ControlsError::Cluster(chain_context(new_ctx, &msg)),
        ControlsError::Config(msg) => ControlsError::Config(chain_context(new_ctx, &msg)),
        ControlsError::Validation(msg) => {
            ControlsError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ControlsError::invalid_line(3, "expected value");
        let display = err.to_string();
        assert!(display.contains("control script"), "{display}");

        let err = ControlsError::unknown_cluster("east");
        assert!(std::error::Error::source(&err)
            .map(|s| s.to_string())
            .unwrap_or_default()
            .contains("east"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ControlsError::io("/path/to/script.ndjson", io_err);
        assert!(err.to_string().contains("/path/to/script.ndjson"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ControlsError::invalid_line(1, "eof"))
        }

        fn outer() -> Result<()> {
            inner().context("replaying script")
        }

        match outer() {
            Err(ControlsError::Script { context, .. }) => {
                assert_eq!(context, "replaying script: parsing command");
            }
            other => panic!("Expected Script error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);

        let err_result: Result<i32> = Err(ControlsError::cluster("timeout"));
        let err = err_result
            .with_context(|| {
                called = true;
                "fetching clusters"
            })
            .unwrap_err();
        assert!(called);
        assert_eq!(
            err.to_string(),
            "Cluster list unavailable: fetching clusters: timeout"
        );
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("outer", "middle: inner"), "outer: middle: inner");
    }
}
