//! Retry loop standing in for the automation runner's implicit waiting

use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::{ProbeError, ProbeResult};

/// Default time to wait for a cell to render or an assertion to pass
pub const DEFAULT_TIMEOUT_MS: u64 = 4000;

/// Default pause between attempts
pub const DEFAULT_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

impl PollPolicy {
    #[must_use]
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// A single attempt, no waiting
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            timeout: Duration::ZERO,
            interval: Duration::ZERO,
        }
    }

    /// Call `attempt` until it yields a value or the timeout passes.
    ///
    /// `Ok(None)` means "not there yet". Retryable errors are kept and
    /// returned if the deadline passes; any other error ends the wait.
    pub fn until<T, F>(&self, what: &str, mut attempt: F) -> ProbeResult<T>
    where
        F: FnMut() -> ProbeResult<Option<T>>,
    {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let last_error = match attempt() {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => None,
                Err(e) if e.is_retryable() => Some(e),
                Err(e) => return Err(e),
            };

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                trace!(what, attempts, "poll deadline passed");
                return Err(last_error.unwrap_or_else(|| ProbeError::Timeout {
                    what: what.to_string(),
                    waited_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                }));
            }

            thread::sleep(self.interval.min(self.timeout - elapsed));
        }
    }
}
