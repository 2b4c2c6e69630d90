//! Configuration for the website client.

use std::time::Duration;

/// Settings for [`crate::MockAuthService`] and the CLI's account commands.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Simulated round-trip time of every mock remote call.
    pub latency: Duration,
    /// Default for the "remember me" checkbox.
    pub remember_me: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1000),
            remember_me: false,
        }
    }
}

impl WebConfig {
    /// Set the simulated latency in milliseconds.
    pub fn with_latency_ms(mut self, ms: u64) -> Self {
        self.latency = Duration::from_millis(ms);
        self
    }

    /// Set the default "remember me" choice.
    pub fn with_remember_me(mut self, remember: bool) -> Self {
        self.remember_me = remember;
        self
    }
}
