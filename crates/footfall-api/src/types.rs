// Wire types for the count endpoint.

use serde::{Deserialize, Serialize};

/// Body of a successful `GET /count`: `{"value": N}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub value: u64,
}

/// Body of a failed `GET /count`: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
