//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text
//! and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use footfall_config::ConfigError;
use footfall_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Count server ─────────────────────────────────────────────────

    #[error("Could not reach the count server at {url}")]
    #[diagnostic(
        code(footfall::connection_failed),
        help(
            "Check that `footfall serve` is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Count request timed out")]
    #[diagnostic(
        code(footfall::timeout),
        help("Increase the timeout with --timeout or [display] timeout_secs.")
    )]
    Timeout,

    #[error("Count server answered HTTP {status}: {message}")]
    #[diagnostic(code(footfall::api_error))]
    Api { status: u16, message: String },

    #[error("Count server sent a malformed response: {message}")]
    #[diagnostic(code(footfall::decode))]
    Decode { message: String },

    #[error("Could not listen on {addr}")]
    #[diagnostic(
        code(footfall::bind),
        help("Is another server already using the port? Pick one with --bind.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Entry log ────────────────────────────────────────────────────

    #[error("No entry log at {path}")]
    #[diagnostic(
        code(footfall::log_missing),
        help("Point at the log with --shared <PATH> or --daily <DIR>, or set [server.log].")
    )]
    LogMissing { path: String },

    #[error("Failed to read entry log {path}")]
    #[diagnostic(code(footfall::log_io))]
    LogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Device ───────────────────────────────────────────────────────

    #[error("Restart failed: {reason}")]
    #[diagnostic(code(footfall::restart))]
    Restart { reason: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(footfall::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(footfall::config_exists),
        help("Use `footfall config init --force` to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(footfall::config),
        help("Check the config file and FOOTFALL_* environment variables.")
    )]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    #[diagnostic(code(footfall::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Bind { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::LogMissing { .. } => exit_code::NOT_FOUND,
            Self::ConfigExists { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::Api { status, message } => Self::Api { status, message },
            CoreError::Decode { message } => Self::Decode { message },
            CoreError::LogMissing { path } => Self::LogMissing { path },
            CoreError::Io { path, source } => Self::LogRead { path, source },
            CoreError::Restart { reason } => Self::Restart { reason },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}
