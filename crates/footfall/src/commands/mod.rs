//! Subcommand handlers.

pub mod config_cmd;
pub mod count;
pub mod display;
pub mod serve;

use footfall_config::{Config, LogSection};
use footfall_core::LogSource;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::{GlobalOpts, LogArgs};
use crate::error::CliError;

/// Config file (from `--config` or the default path) plus environment.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(footfall_config::load_config(global.config.as_deref())?)
}

/// `[server.log]` with `--shared`/`--daily`/`--extension` applied on top.
pub fn with_log_args(args: &LogArgs, section: &LogSection) -> LogSection {
    let mut section = section.clone();
    if let Some(path) = &args.shared {
        section.shared = Some(path.clone());
        section.daily = None;
    }
    if let Some(dir) = &args.daily {
        section.daily = Some(dir.clone());
        section.shared = None;
    }
    if let Some(ext) = &args.extension {
        section.extension.clone_from(ext);
    }
    section
}

pub fn log_source(args: &LogArgs, section: &LogSection) -> Result<LogSource, CliError> {
    Ok(with_log_args(args, section).to_log_source()?)
}

/// A token cancelled on Ctrl-C.
pub fn shutdown_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, shutting down");
            token.cancel();
        }
    });
    cancel
}
