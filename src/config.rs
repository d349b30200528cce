//! Probe configuration
//!
//! Read from a YAML file, then overridden by the environment and CLI flags:
//!
//! ```yaml
//! base_url: http://localhost:3333
//! leading_column_count: 3
//! poll:
//!   timeout_ms: 4000
//!   interval_ms: 50
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::poll::{PollPolicy, DEFAULT_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use crate::core::{GridQuery, TableCellLocator};
use crate::error::ProbeResult;
use crate::types::{Layout, DEFAULT_LEADING_COLUMN_COUNT};

/// Environment variable holding the base URL of the application under test
pub const BASE_URL_ENV: &str = "GRIDPROBE_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    pub timeout_ms: u64,
    pub interval_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub base_url: Option<String>,
    pub leading_column_count: usize,
    pub poll: PollSettings,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            leading_column_count: DEFAULT_LEADING_COLUMN_COUNT,
            poll: PollSettings::default(),
        }
    }
}

impl ProbeConfig {
    pub fn from_yaml_str(content: &str) -> ProbeResult<Self> {
        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> ProbeResult<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    /// Load `path` if given (defaults otherwise), then apply the environment
    pub fn load(path: Option<&Path>) -> ProbeResult<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Ok(config.with_base_url(std::env::var(BASE_URL_ENV).ok()))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.base_url = Some(url);
        }
        self
    }

    pub fn layout(&self) -> Layout {
        Layout::with_leading_columns(self.leading_column_count)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_millis(self.poll.timeout_ms),
            Duration::from_millis(self.poll.interval_ms),
        )
    }

    /// A locator over `query` using this layout and poll policy
    pub fn locator<Q: GridQuery>(&self, query: Q) -> TableCellLocator<Q> {
        TableCellLocator::new(query)
            .with_layout(self.layout())
            .with_poll(self.poll_policy())
    }
}
