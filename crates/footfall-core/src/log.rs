// ── Entry log scanning ──
//
// The log is written by an external counting process, one record per line,
// each holding a date token and a direction token. A line counts as an
// entry when it contains the `IN` marker. Reads are not coordinated with
// the writer, so a scan racing an append may see a partial last line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::CoreError;
use crate::model::VisitorCount;

/// Substring that marks an entry line.
pub const ENTRY_MARKER: &str = "IN";

/// Date format used in log lines and per-day file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Count marker lines, optionally only those also containing `date_filter`.
///
/// Lines that are not valid UTF-8 are decoded lossily instead of aborting
/// the scan.
pub fn count_entries<R: BufRead>(mut reader: R, date_filter: Option<&str>) -> io::Result<u64> {
    let mut count = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.contains(ENTRY_MARKER) && date_filter.is_none_or(|date| line.contains(date)) {
            count += 1;
        }
    }

    Ok(count)
}

/// Where the entry log for a given day lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// One file for every day; lines are filtered by the date token.
    Shared { path: PathBuf },
    /// One file per day, `<dir>/<YYYY-MM-DD>.<extension>`; every marker line counts.
    Daily { dir: PathBuf, extension: String },
}

impl LogSource {
    /// File holding the records for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        match self {
            Self::Shared { path } => path.clone(),
            Self::Daily { dir, extension } => {
                let stem = date.format(DATE_FORMAT).to_string();
                if extension.is_empty() {
                    dir.join(stem)
                } else {
                    dir.join(format!("{stem}.{extension}"))
                }
            }
        }
    }

    /// Date substring a line must contain to count for `date`.
    pub fn date_filter(&self, date: NaiveDate) -> Option<String> {
        match self {
            Self::Shared { .. } => Some(date.format(DATE_FORMAT).to_string()),
            Self::Daily { .. } => None,
        }
    }

    /// Scan the log for `date`. Blocking; call from a blocking context.
    pub fn count_for(&self, date: NaiveDate) -> Result<VisitorCount, CoreError> {
        let path = self.path_for(date);
        let file = File::open(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CoreError::LogMissing {
                    path: path.display().to_string(),
                }
            } else {
                CoreError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        let filter = self.date_filter(date);
        let count =
            count_entries(BufReader::new(file), filter.as_deref()).map_err(|source| {
                CoreError::Io {
                    path: path.display().to_string(),
                    source,
                }
            })?;

        debug!(path = %path.display(), %date, count, "scanned entry log");
        Ok(VisitorCount::new(count))
    }
}
