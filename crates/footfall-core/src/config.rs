// ── Runtime configuration ──
//
// These types describe how to poll and how to serve. They never touch
// disk: footfall-config builds them from the TOML file and environment,
// the binary applies flag overrides and hands them in.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::log::LogSource;
use crate::model::MarkerStyle;

/// Restart policy for the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// Consecutive failures that trigger a restart.
    pub failure_limit: u32,
    /// Pause between clearing the sign and restarting.
    pub reset_delay: Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            failure_limit: crate::watchdog::DEFAULT_FAILURE_LIMIT,
            reset_delay: Duration::from_secs(5),
        }
    }
}

/// Settings the poll loop itself needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    /// `None` disables the watchdog: failures only change the sign.
    pub watchdog: Option<WatchdogConfig>,
    pub markers: MarkerStyle,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            watchdog: Some(WatchdogConfig::default()),
            markers: MarkerStyle::default(),
        }
    }
}

/// Everything the display client needs.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Full count URL (e.g. `http://192.168.0.100:8000/count`).
    pub url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Delay between reachability checks at startup.
    pub connect_retry: Duration,
    /// Caption lines drawn left of the count.
    pub captions: Vec<String>,
    pub poller: PollerConfig,
}

/// Everything the counting server needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub log: LogSource,
}
