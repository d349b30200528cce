use thiserror::Error;

use crate::types::PhysicalCoordinate;

pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// No header carries the requested title
    #[error("Column '{column}' not found (available: {})", .available.join(", "))]
    Lookup {
        column: String,
        available: Vec<String>,
    },

    /// Displayed text differs from the expected text
    #[error("Assertion failed at {at}: expected {expected:?}, got {actual:?}")]
    Assertion {
        at: String,
        expected: String,
        actual: String,
    },

    #[error("Timed out after {waited_ms}ms waiting for {what}")]
    Timeout { what: String, waited_ms: u64 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ProbeError {
    pub fn assertion(
        at: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ProbeError::Assertion {
            at: at.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn assertion_at(at: PhysicalCoordinate, expected: &str, actual: &str) -> Self {
        Self::assertion(at.to_string(), expected, actual)
    }

    /// Mismatches are re-checked until the poll deadline; everything else fails at once
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProbeError::Assertion { .. })
    }
}
