// ── Core error types ──
//
// Domain errors for footfall-core. The display never sees HTTP details:
// every failure collapses into an `ErrorMarker` through `CoreError::marker`.
// The `From<footfall_api::Error>` impl translates transport-layer errors
// into domain variants.

use thiserror::Error;

use crate::model::ErrorMarker;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Fetch errors ─────────────────────────────────────────────────
    #[error("Cannot reach count server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Count request timed out")]
    Timeout,

    #[error("Count server answered HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed count response: {message}")]
    Decode { message: String },

    // ── Log errors ───────────────────────────────────────────────────
    #[error("No entry log for today at {path}")]
    LogMissing { path: String },

    #[error("Failed to read entry log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Device errors ────────────────────────────────────────────────
    #[error("Restart failed: {reason}")]
    Restart { reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The placeholder a detailed sign shows for this failure.
    ///
    /// The server answering with a bad status is `Er`; everything else
    /// (no connection, timeout, garbage body) is `Ex`.
    pub fn marker(&self) -> ErrorMarker {
        match self {
            Self::Api { .. } => ErrorMarker::Status,
            _ => ErrorMarker::Exception,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<footfall_api::Error> for CoreError {
    fn from(err: footfall_api::Error) -> Self {
        if err.is_timeout() {
            return CoreError::Timeout;
        }
        match err {
            footfall_api::Error::Transport(ref e) => {
                if e.is_decode() || e.is_body() {
                    CoreError::Decode {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            footfall_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            footfall_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            footfall_api::Error::Status { status, reason } => CoreError::Api {
                status,
                message: reason,
            },
            footfall_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
