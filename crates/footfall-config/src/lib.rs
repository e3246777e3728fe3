//! Shared configuration for the footfall server and display.
//!
//! One TOML file with a `[display]` and a `[server]` section, overlaid with
//! `FOOTFALL_`-prefixed environment variables, translated into
//! `footfall_core` runtime configs. The binary applies flag overrides on
//! top of the result.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use footfall_core::{
    DisplayConfig, LogSource, MarkerStyle, PollerConfig, ServerConfig, WatchdogConfig,
};

/// Environment variable prefix; nested keys are split on `__`
/// (`FOOTFALL_DISPLAY__URL`, `FOOTFALL_SERVER__BIND`).
pub const ENV_PREFIX: &str = "FOOTFALL_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,

    #[serde(default)]
    pub server: ServerSection,
}

/// `[display]`: the polling sign.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplaySection {
    /// Full count URL.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_retry")]
    pub connect_retry_secs: u64,

    /// Restart after `failure_limit` consecutive failures.
    #[serde(default = "default_true")]
    pub watchdog: bool,

    #[serde(default = "default_failure_limit")]
    pub failure_limit: u32,

    #[serde(default = "default_reset_delay")]
    pub reset_delay_secs: u64,

    /// `"detailed"` (`Er`/`Ex`) or `"plain"` (`??`).
    #[serde(default)]
    pub markers: MarkerStyle,

    /// Caption lines drawn left of the count.
    #[serde(default = "default_captions")]
    pub captions: Vec<String>,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            url: default_url(),
            poll_interval_secs: default_poll_interval(),
            timeout_secs: default_timeout(),
            connect_retry_secs: default_connect_retry(),
            watchdog: true,
            failure_limit: default_failure_limit(),
            reset_delay_secs: default_reset_delay(),
            markers: MarkerStyle::default(),
            captions: default_captions(),
        }
    }
}

fn default_url() -> String {
    "http://192.168.0.100:8000/count".into()
}
fn default_poll_interval() -> u64 {
    30
}
fn default_timeout() -> u64 {
    10
}
fn default_connect_retry() -> u64 {
    1
}
fn default_true() -> bool {
    true
}
fn default_failure_limit() -> u32 {
    5
}
fn default_reset_delay() -> u64 {
    5
}
fn default_captions() -> Vec<String> {
    vec!["CTH Daily".into(), "Entry".into(), "Count".into()]
}

/// `[server]`: the counting endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log: LogSection::default(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".into()
}

/// `[server.log]`: set at most one of `shared` or `daily`. With neither,
/// the shared file `people_count.csv` in the working directory is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSection {
    /// Single file for all days, filtered by date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<PathBuf>,

    /// Directory of per-day files named `<YYYY-MM-DD>.<extension>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<PathBuf>,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            shared: None,
            daily: None,
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    "csv".into()
}

/// Shared log used when `[server.log]` names neither form.
pub const DEFAULT_SHARED_LOG: &str = "people_count.csv";

// ── Translation to runtime configs ──────────────────────────────────

impl DisplaySection {
    pub fn to_display_config(&self) -> Result<DisplayConfig, ConfigError> {
        let url: url::Url = self
            .url
            .parse()
            .map_err(|e| invalid("display.url", format!("{e}: {}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "display.url",
                format!("expected http or https, got '{}'", url.scheme()),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(invalid("display.poll_interval_secs", "must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("display.timeout_secs", "must be at least 1"));
        }
        if self.watchdog && self.failure_limit == 0 {
            return Err(invalid("display.failure_limit", "must be at least 1"));
        }

        let watchdog = self.watchdog.then(|| WatchdogConfig {
            failure_limit: self.failure_limit,
            reset_delay: Duration::from_secs(self.reset_delay_secs),
        });

        Ok(DisplayConfig {
            url,
            timeout: Duration::from_secs(self.timeout_secs),
            connect_retry: Duration::from_secs(self.connect_retry_secs.max(1)),
            captions: self.captions.clone(),
            poller: PollerConfig {
                interval: Duration::from_secs(self.poll_interval_secs),
                watchdog,
                markers: self.markers,
            },
        })
    }
}

impl LogSection {
    pub fn to_log_source(&self) -> Result<LogSource, ConfigError> {
        match (&self.shared, &self.daily) {
            (Some(path), None) => Ok(LogSource::Shared { path: path.clone() }),
            (None, Some(dir)) => Ok(LogSource::Daily {
                dir: dir.clone(),
                extension: self.extension.trim_start_matches('.').to_owned(),
            }),
            (Some(_), Some(_)) => Err(invalid(
                "server.log",
                "set either 'shared' or 'daily', not both",
            )),
            (None, None) => Ok(LogSource::Shared {
                path: PathBuf::from(DEFAULT_SHARED_LOG),
            }),
        }
    }
}

impl ServerSection {
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let bind: SocketAddr = self
            .bind
            .parse()
            .map_err(|e| invalid("server.bind", format!("{e}: {}", self.bind)))?;
        Ok(ServerConfig {
            bind,
            log: self.log.to_log_source()?,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "footfall", "footfall").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("footfall");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Layered sources: defaults, then the TOML file, then the environment.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from `path` (or the canonical path) + environment.
///
/// A missing file is not an error: defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_toml(cfg)?)?;
    Ok(())
}

/// Render config as pretty TOML.
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn extract(jail_path: &str) -> Result<Config, figment::Error> {
        figment(Path::new(jail_path)).extract()
    }

    #[test]
    fn defaults_poll_every_thirty_seconds_with_watchdog() {
        let display = Config::default().display.to_display_config().unwrap();
        assert_eq!(display.url.as_str(), "http://192.168.0.100:8000/count");
        assert_eq!(display.poller.interval, Duration::from_secs(30));
        assert_eq!(
            display.poller.watchdog,
            Some(WatchdogConfig {
                failure_limit: 5,
                reset_delay: Duration::from_secs(5),
            })
        );
        assert_eq!(display.captions, vec!["CTH Daily", "Entry", "Count"]);

        let server = Config::default().server.to_server_config().unwrap();
        assert_eq!(server.bind.port(), 8000);
        assert_eq!(
            server.log,
            LogSource::Shared {
                path: PathBuf::from("people_count.csv")
            }
        );
    }

    #[test]
    fn file_then_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "footfall.toml",
                r#"
                [display]
                url = "http://counter.local:9000/count"
                markers = "plain"
                watchdog = false

                [server.log]
                daily = "/var/log/footfall"
                "#,
            )?;
            jail.set_env("FOOTFALL_DISPLAY__POLL_INTERVAL_SECS", "15");

            let cfg = extract("footfall.toml")?;
            assert_eq!(cfg.display.url, "http://counter.local:9000/count");
            assert_eq!(cfg.display.poll_interval_secs, 15);
            assert_eq!(cfg.display.markers, MarkerStyle::Plain);

            let display = cfg.display.to_display_config().unwrap();
            assert_eq!(display.poller.watchdog, None);
            Ok(())
        });
    }

    #[test]
    fn shared_and_daily_together_is_rejected() {
        let section = LogSection {
            shared: Some("a.csv".into()),
            daily: Some("/logs".into()),
            extension: "csv".into(),
        };
        assert!(matches!(
            section.to_log_source(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn daily_in_file_replaces_default_shared_log() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("footfall.toml", "[server.log]\ndaily = \"logs\"\n")?;

            let server = extract("footfall.toml")?.server.to_server_config().unwrap();
            assert_eq!(
                server.log,
                LogSource::Daily {
                    dir: "logs".into(),
                    extension: "csv".into()
                }
            );
            Ok(())
        });
    }

    #[test]
    fn daily_extension_loses_leading_dot() {
        let section = LogSection {
            shared: None,
            daily: Some("/logs".into()),
            extension: ".log".into(),
        };
        assert_eq!(
            section.to_log_source().unwrap(),
            LogSource::Daily {
                dir: "/logs".into(),
                extension: "log".into()
            }
        );
    }

    #[test]
    fn zero_failure_limit_is_rejected_only_with_watchdog() {
        let mut section = DisplaySection {
            failure_limit: 0,
            ..DisplaySection::default()
        };
        assert!(section.to_display_config().is_err());

        section.watchdog = false;
        assert!(section.to_display_config().is_ok());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let section = DisplaySection {
            url: "ftp://counter.local/count".into(),
            ..DisplaySection::default()
        };
        let err = section.to_display_config().unwrap_err();
        assert!(err.to_string().contains("display.url"), "{err}");
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.server.bind = "127.0.0.1:8080".into();
        cfg.display.captions = vec!["Lobby".into()];
        save_config(&cfg, &path).unwrap();

        let loaded: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path))
            .extract()
            .unwrap();
        assert_eq!(loaded, cfg);
    }
}
