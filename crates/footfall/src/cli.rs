//! Clap derive structures for the `footfall` CLI.
//!
//! Only clap types live here so `build.rs` can compile this file on its own
//! to render man pages and completions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// footfall -- daily entry counter and the sign that shows it
#[derive(Debug, Parser)]
#[command(
    name = "footfall",
    version,
    about = "Count today's entries and show them on a sign",
    long_about = "Serves today's entry count from a visitor log over HTTP, and runs the\n\
        polling sign that displays it.\n\n\
        The sign restarts itself after too many consecutive failed polls.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "FOOTFALL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "FOOTFALL_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve today's entry count over HTTP
    Serve(ServeArgs),

    /// Poll the count server and show the result on the sign
    #[command(alias = "sign")]
    Display(DisplayArgs),

    /// Print today's entry count from the local log and exit
    Count(CountArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Log source (shared by serve and count) ──────────────────────────

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Single log file for every day, filtered by date
    #[arg(long, value_name = "PATH", conflicts_with = "daily")]
    pub shared: Option<PathBuf>,

    /// Directory of per-day log files named <YYYY-MM-DD>.<extension>
    #[arg(long, value_name = "DIR")]
    pub daily: Option<PathBuf>,

    /// Extension of per-day log files
    #[arg(long, value_name = "EXT", requires = "daily")]
    pub extension: Option<String>,
}

// ── serve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (e.g. 0.0.0.0:8000)
    #[arg(long, short = 'b', value_name = "ADDR")]
    pub bind: Option<String>,

    #[command(flatten)]
    pub log: LogArgs,
}

// ── display ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Count endpoint (e.g. http://192.168.0.100:8000/count)
    #[arg(long, short = 'u', env = "FOOTFALL_URL")]
    pub url: Option<String>,

    /// Where to draw the sign
    #[arg(long, default_value = "panel")]
    pub backend: Backend,

    /// Seconds between polls
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Never restart; failures only change the sign
    #[arg(long)]
    pub no_watchdog: bool,

    /// Consecutive failures before restarting
    #[arg(long, value_name = "N", conflicts_with = "no_watchdog")]
    pub failure_limit: Option<u32>,

    /// Failure placeholder style
    #[arg(long)]
    pub markers: Option<Markers>,

    /// Start polling without waiting for the server to accept connections
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Full-screen terminal panel laid out like the LED sign
    Panel,
    /// One `value=...` line per update on stdout
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Markers {
    /// `Er` for an error status, `Ex` for anything else
    Detailed,
    /// `??` for every failure
    Plain,
}

// ── count ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Day to count (YYYY-MM-DD, defaults to today)
    #[arg(long, short = 'd', value_name = "DATE")]
    pub date: Option<String>,

    #[command(flatten)]
    pub log: LogArgs,
}

// ── config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with every default filled in
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (file + environment)
    Show,

    /// Print the config file path
    Path,
}

// ── completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
