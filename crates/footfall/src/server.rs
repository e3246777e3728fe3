//! HTTP count server.
//!
//! `GET /count` scans today's entry log and answers `{"value": N}`.
//! `GET /health` answers `ok`. Everything else is a 404.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use footfall_core::{CountResponse, ErrorResponse, LogSource, ServerConfig};

use crate::error::CliError;

/// Which day "today" is.
#[derive(Debug, Clone, Copy)]
pub enum Today {
    /// The local clock at request time.
    Local,
    Fixed(NaiveDate),
}

impl Today {
    pub fn date(self) -> NaiveDate {
        match self {
            Self::Local => chrono::Local::now().date_naive(),
            Self::Fixed(date) => date,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    log: Arc<LogSource>,
    today: Today,
}

impl AppState {
    pub fn new(log: LogSource, today: Today) -> Self {
        Self {
            log: Arc::new(log),
            today,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/count", get(count))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until `cancel` fires.
pub async fn serve(config: ServerConfig, cancel: CancellationToken) -> Result<(), CliError> {
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| CliError::Bind {
            addr: config.bind.to_string(),
            source,
        })?;

    info!(
        addr = %listener.local_addr()?,
        log = ?config.log,
        "count server listening"
    );

    let app = router(AppState::new(config.log, Today::Local));
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    info!("count server stopped");
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>, CountError> {
    let date = state.today.date();
    let log = Arc::clone(&state.log);

    let count = tokio::task::spawn_blocking(move || log.count_for(date))
        .await
        .map_err(|e| CountError(format!("log scan aborted: {e}")))?
        .map_err(|e| CountError(e.to_string()))?;

    info!(%date, count = count.get(), "served count");
    Ok(Json(CountResponse { value: count.get() }))
}

async fn health() -> &'static str {
    "ok"
}

/// A count that could not be produced; always a 500.
#[derive(Debug)]
struct CountError(String);

impl IntoResponse for CountError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "count failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: self.0 }),
        )
            .into_response()
    }
}
