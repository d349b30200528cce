//! URLs of the application under test

use regex::Regex;

use crate::error::{ProbeError, ProbeResult};

/// Address of the project page for `project_id`
pub fn project_url(base_url: &str, project_id: &str) -> String {
    format!(
        "{}/project?project={}",
        base_url.trim_end_matches('/'),
        project_id
    )
}

/// Project id carried by a location such as `.../project?project=1234`
pub fn project_id_from_location(href: &str) -> ProbeResult<String> {
    // Pattern: ?project=<id> or &project=<id>, up to the next parameter or fragment
    let project_param = Regex::new(r"[?&]project=([^&#]+)")
        .map_err(|e| ProbeError::Parse(format!("Regex error: {}", e)))?;

    project_param
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ProbeError::Parse(format!("No project id in location '{href}'")))
}
