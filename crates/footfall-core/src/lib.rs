// footfall-core: Visitor counting, watchdog, and polling logic shared by the
// server and the display.

pub mod config;
pub mod error;
pub mod log;
pub mod model;
pub mod network;
pub mod poller;
pub mod source;
pub mod watchdog;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DisplayConfig, PollerConfig, ServerConfig, WatchdogConfig};
pub use error::CoreError;
pub use log::{LogSource, count_entries};
pub use model::{ErrorMarker, MarkerStyle, Reading, VisitorCount};
pub use network::{Reachability, wait_for_server};
pub use poller::{CountSource, Display, Outcome, Poller, Restart};
pub use watchdog::{Verdict, Watchdog};

// Wire types and the HTTP client, so the binary only depends on core.
pub use footfall_api::{CountClient, CountResponse, ErrorResponse, TransportConfig};
