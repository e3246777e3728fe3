// Shared transport configuration for building reqwest::Client instances.
//
// The count client and the reachability check agree on timeout and
// user agent through this module.

use std::time::Duration;

use crate::error::Error;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("footfall/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connect-phase timeout.
    pub connect_timeout: Duration,
}

impl TransportConfig {
    /// Config with a single timeout applied to the whole request.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            connect_timeout: timeout.min(Duration::from_secs(5)),
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
