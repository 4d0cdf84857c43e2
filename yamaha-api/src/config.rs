//! Tunables of the menu polling loop

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a navigator waits for the menu to report "Ready"
///
/// After every command the receiver may still be loading the next screen.
/// The navigator re-queries every `poll_interval_ms` and gives up once the
/// accumulated wait exceeds `max_wait_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub poll_interval_ms: u64,
    pub max_wait_ms: u64,
}

impl NavigationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_wait_ms: 5000,
        }
    }
}
