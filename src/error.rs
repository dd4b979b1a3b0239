//! Error types shared across the probe pipeline.

use std::fmt;

/// Exit code reported when the disk usage data source is unavailable
/// or its output cannot be interpreted.
pub const EXIT_METRICS_UNAVAILABLE: i32 = 31;

/// Exit code for every other failure (e.g. a malformed argument).
pub const EXIT_GENERIC: i32 = 1;

/// Top-level error for the probe.
///
/// There are exactly two classes: the data source failed
/// (`MetricsUnavailable`) or the invocation itself was wrong (`Invalid`).
/// Any failure aborts the run; there is no partial output.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The `df` command is missing, failed, or produced unusable output.
    MetricsUnavailable(String),
    /// Malformed command-line input or an unexpected local failure.
    Invalid(String),
}

impl ProbeError {
    /// `MetricsUnavailable` with the default message.
    pub fn metrics_unavailable() -> Self {
        ProbeError::MetricsUnavailable("Unable to get metrics".to_string())
    }

    /// Maps the error class to the process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::MetricsUnavailable(_) => EXIT_METRICS_UNAVAILABLE,
            ProbeError::Invalid(_) => EXIT_GENERIC,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::MetricsUnavailable(msg) => write!(f, "{}", msg),
            ProbeError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for ProbeError {
    fn from(err: ParseError) -> Self {
        ProbeError::MetricsUnavailable(err.message)
    }
}
