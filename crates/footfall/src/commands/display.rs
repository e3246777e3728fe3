//! `footfall display`: wait for the server, then poll it onto the sign.

use std::io;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

use footfall_config::DisplaySection;
use footfall_core::{
    CoreError, CountClient, Display, DisplayConfig, MarkerStyle, Poller, Reachability,
    TransportConfig, wait_for_server,
};

use crate::cli::{Backend, DisplayArgs, GlobalOpts, Markers};
use crate::error::CliError;
use crate::restart::ProcessRestart;
use crate::sign::{LineSign, panel, tui};

/// Fold flag overrides into `[display]`.
fn apply_flags(args: &DisplayArgs, section: &mut DisplaySection) {
    if let Some(url) = &args.url {
        section.url.clone_from(url);
    }
    if let Some(secs) = args.interval {
        section.poll_interval_secs = secs;
    }
    if let Some(secs) = args.timeout {
        section.timeout_secs = secs;
    }
    if args.no_watchdog {
        section.watchdog = false;
    }
    if let Some(limit) = args.failure_limit {
        section.failure_limit = limit;
    }
    if let Some(markers) = args.markers {
        section.markers = match markers {
            Markers::Detailed => MarkerStyle::Detailed,
            Markers::Plain => MarkerStyle::Plain,
        };
    }
}

/// `log_guard` is dropped just before a restart so the file log is flushed.
pub async fn handle(
    args: DisplayArgs,
    global: &GlobalOpts,
    mut log_guard: Option<WorkerGuard>,
) -> Result<(), CliError> {
    let mut cfg = super::load(global)?;
    apply_flags(&args, &mut cfg.display);
    let config = cfg.display.to_display_config()?;
    debug!(?config, "resolved display config");

    let client = CountClient::new(config.url.clone(), &TransportConfig::with_timeout(config.timeout))
        .map_err(CoreError::from)?;
    let cancel = super::shutdown_token();
    let wait = !args.no_wait;

    match args.backend {
        Backend::Line => {
            let restart = ProcessRestart::current()?.with_cleanup(move || drop(log_guard.take()));
            let sign = LineSign::new(io::stdout());
            drive(client, sign, restart, config, wait, cancel).await?;
        }
        Backend::Panel => {
            tui::install_panic_hook();
            let restart = ProcessRestart::current()?.with_cleanup(move || {
                tui::restore();
                drop(log_guard.take());
            });
            let (sign, rx) = panel::channel();
            let captions = config.captions.clone();

            let poller = tokio::spawn(drive(client, sign, restart, config, wait, cancel.clone()));
            let ui = panel::run_ui(captions, rx, cancel.clone()).await;
            cancel.cancel();

            let polled = poller.await.map_err(io::Error::other)?;
            ui?;
            polled?;
        }
    }

    info!("display stopped");
    Ok(())
}

/// Wait until the server accepts connections, then poll until cancelled or
/// restarted.
async fn drive<D>(
    client: CountClient,
    sign: D,
    restart: ProcessRestart,
    config: DisplayConfig,
    wait: bool,
    cancel: CancellationToken,
) -> Result<(), CoreError>
where
    D: Display + Send,
{
    if wait {
        let reached = wait_for_server(&config.url, config.connect_retry, &cancel).await?;
        if reached == Reachability::Cancelled {
            return Ok(());
        }
    }

    Poller::new(client, sign, restart, config.poller)
        .run(cancel)
        .await
}
