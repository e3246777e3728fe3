//! Poll loop for the display client.
//!
//! Every interval: fetch the count, render it (or a placeholder), and feed
//! the watchdog. When the watchdog trips the sign is cleared, the loop waits
//! out the reset delay, and the device is restarted. The loop never polls
//! again after asking for a restart.
//!
//! The three seams ([`CountSource`], [`Display`], [`Restart`]) keep the loop
//! free of HTTP, terminal, and process details.

use std::future::Future;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::PollerConfig;
use crate::error::CoreError;
use crate::model::{ErrorMarker, Reading, VisitorCount};
use crate::watchdog::{Verdict, Watchdog};

// ── Seams ────────────────────────────────────────────────────────────

/// Something that can report the current count.
pub trait CountSource {
    fn fetch(&self) -> impl Future<Output = Result<VisitorCount, CoreError>> + Send;
}

/// The sign.
pub trait Display {
    fn render(&mut self, reading: Reading);
    fn clear(&mut self);
}

/// Full device restart. On success this usually does not return.
pub trait Restart {
    fn restart(&mut self) -> Result<(), CoreError>;
}

// ── Poller ───────────────────────────────────────────────────────────

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The count was fetched and shown.
    Shown(VisitorCount),
    /// The fetch failed; `failures` is the watchdog count, if enabled.
    Failed {
        marker: ErrorMarker,
        failures: Option<u32>,
    },
    /// The watchdog tripped and a restart was requested.
    Restarted,
}

pub struct Poller<S, D, R> {
    source: S,
    display: D,
    restart: R,
    watchdog: Option<Watchdog>,
    config: PollerConfig,
}

impl<S, D, R> Poller<S, D, R>
where
    S: CountSource,
    D: Display,
    R: Restart,
{
    pub fn new(source: S, display: D, restart: R, config: PollerConfig) -> Self {
        let watchdog = config.watchdog.map(|w| Watchdog::new(w.failure_limit));
        Self {
            source,
            display,
            restart,
            watchdog,
            config,
        }
    }

    /// Current consecutive failure count, if the watchdog is enabled.
    pub fn failures(&self) -> Option<u32> {
        self.watchdog.as_ref().map(Watchdog::failures)
    }

    /// Fetch once, render, and step the watchdog.
    ///
    /// Only a failed restart is an error; fetch failures are outcomes.
    pub async fn poll_once(&mut self) -> Result<Outcome, CoreError> {
        info!("polling");

        let err = match self.source.fetch().await {
            Ok(count) => {
                if let Some(dog) = self.watchdog.as_mut() {
                    dog.record_success();
                }
                self.display.render(Reading::Count(count));
                return Ok(Outcome::Shown(count));
            }
            Err(err) => err,
        };

        let marker = self.config.markers.marker_for(&err);
        warn!(error = %err, %marker, "failed to fetch count");
        self.display.render(Reading::Error(marker));

        let Some(dog) = self.watchdog.as_mut() else {
            return Ok(Outcome::Failed {
                marker,
                failures: None,
            });
        };

        match dog.record_failure() {
            Verdict::Continue => Ok(Outcome::Failed {
                marker,
                failures: Some(dog.failures()),
            }),
            Verdict::Reset => {
                let failures = dog.failures();
                self.reset(failures).await?;
                Ok(Outcome::Restarted)
            }
        }
    }

    async fn reset(&mut self, failures: u32) -> Result<(), CoreError> {
        let delay = self
            .config
            .watchdog
            .map(|w| w.reset_delay)
            .unwrap_or_default();

        error!(failures, delay_secs = delay.as_secs(), "too many failures, restarting");
        self.display.clear();
        tokio::time::sleep(delay).await;
        self.restart.restart()
    }

    /// Poll on a fixed interval until cancelled or restarted.
    ///
    /// The first poll happens immediately. A slow fetch delays the following
    /// ticks instead of bunching them up. Cancelling during the reset delay
    /// abandons the pending restart.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), CoreError> {
        self.display.render(Reading::Pending);

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                () = cancel.cancelled() => {
                    info!(failures = ?self.failures(), "cancelled mid-poll");
                    break;
                }
                outcome = self.poll_once() => outcome?,
            };

            if outcome == Outcome::Restarted {
                return Ok(());
            }
        }

        info!("poller stopped");
        Ok(())
    }
}
