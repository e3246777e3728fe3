//! Startup reachability wait.
//!
//! The display cannot show anything useful until the count server answers,
//! so before polling starts it retries a plain TCP connect to the server's
//! host and port until one succeeds.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::{Host, Url};

use crate::error::CoreError;

/// How [`wait_for_server`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// A connection succeeded after `attempts` tries.
    Reachable { attempts: u32 },
    /// Cancelled before the server answered.
    Cancelled,
}

/// `host:port` for a TCP connect to the server behind `url`.
pub fn connect_target(url: &Url) -> Result<String, CoreError> {
    let port = url.port_or_known_default().ok_or_else(|| CoreError::Config {
        message: format!("no port for URL {url}"),
    })?;

    match url.host() {
        Some(Host::Domain(domain)) => Ok(format!("{domain}:{port}")),
        Some(Host::Ipv4(addr)) => Ok(format!("{addr}:{port}")),
        Some(Host::Ipv6(addr)) => Ok(format!("[{addr}]:{port}")),
        None => Err(CoreError::Config {
            message: format!("no host in URL {url}"),
        }),
    }
}

/// Retry a TCP connect to the server behind `url` until it succeeds.
pub async fn wait_for_server(
    url: &Url,
    retry_delay: Duration,
    cancel: &CancellationToken,
) -> Result<Reachability, CoreError> {
    let target = connect_target(url)?;
    info!(%target, "connecting to count server");

    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);

        let result = tokio::select! {
            () = cancel.cancelled() => return Ok(Reachability::Cancelled),
            result = TcpStream::connect(target.as_str()) => result,
        };

        match result {
            Ok(_) => {
                info!(%target, attempts, "count server reachable");
                return Ok(Reachability::Reachable { attempts });
            }
            Err(e) => warn!(%target, attempts, error = %e, "could not connect, retrying"),
        }

        tokio::select! {
            () = cancel.cancelled() => return Ok(Reachability::Cancelled),
            () = tokio::time::sleep(retry_delay) => {}
        }
    }
}
