// ── Domain model ──
//
// What the server counts and what the sign shows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of entries recorded today. Never negative, never persisted by the
/// display; the server recomputes it from the log on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorCount(u64);

impl VisitorCount {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for VisitorCount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VisitorCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short placeholder shown instead of a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMarker {
    /// The server answered, but not with `200 OK`.
    Status,
    /// The request never produced a usable answer.
    Exception,
    /// Undifferentiated failure.
    Unknown,
}

impl ErrorMarker {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "Er",
            Self::Exception => "Ex",
            Self::Unknown => "??",
        }
    }
}

impl fmt::Display for ErrorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much a failed fetch reveals on the sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// `Er` for a bad status, `Ex` for everything else.
    #[default]
    Detailed,
    /// `??` for every failure.
    Plain,
}

impl MarkerStyle {
    pub fn marker_for(self, err: &CoreError) -> ErrorMarker {
        match self {
            Self::Detailed => err.marker(),
            Self::Plain => ErrorMarker::Unknown,
        }
    }
}

/// One frame of sign content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reading {
    /// Nothing fetched yet.
    Pending,
    Count(VisitorCount),
    Error(ErrorMarker),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str(" ?"),
            Self::Count(count) => write!(f, "{count}"),
            Self::Error(marker) => f.write_str(marker.as_str()),
        }
    }
}
