//! `footfall serve`

use tracing::debug;

use crate::cli::{GlobalOpts, ServeArgs};
use crate::error::CliError;
use crate::server;

pub async fn handle(args: ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = super::load(global)?;
    if let Some(bind) = args.bind {
        cfg.server.bind = bind;
    }

    cfg.server.log = super::with_log_args(&args.log, &cfg.server.log);

    let config = cfg.server.to_server_config()?;
    debug!(?config, "resolved server config");

    server::serve(config, super::shutdown_token()).await
}
