//! Assertions on text read from the page outside the data table

use serde_json::Value;

use crate::error::{ProbeError, ProbeResult};

/// Check that `actual` holds JSON equal to `expected`.
///
/// Both sides are compared as parsed values, so whitespace, indentation and
/// number formatting in `actual` do not matter.
pub fn assert_json_equivalent(at: &str, actual: &str, expected: &Value) -> ProbeResult<()> {
    let present: Value = serde_json::from_str(actual)?;
    if &present == expected {
        Ok(())
    } else {
        Err(ProbeError::assertion(
            at,
            expected.to_string(),
            present.to_string(),
        ))
    }
}

/// Check that `text` contains `needle`
pub fn assert_contains_text(at: &str, text: &str, needle: &str) -> ProbeResult<()> {
    if text.contains(needle) {
        Ok(())
    } else {
        Err(ProbeError::assertion(
            at,
            format!("text containing {needle:?}"),
            text,
        ))
    }
}
