//! Headless sign: one `value=<text>` line per update.

use std::io::Write;

use tracing::warn;

use footfall_core::{Display, Reading};

pub struct LineSign<W> {
    out: W,
}

impl<W: Write> LineSign<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_line(&mut self, text: &str) {
        let written = writeln!(self.out, "value={text}").and_then(|()| self.out.flush());
        if let Err(e) = written {
            warn!(error = %e, "failed to write sign line");
        }
    }
}

impl<W: Write> Display for LineSign<W> {
    fn render(&mut self, reading: Reading) {
        self.write_line(&reading.to_string());
    }

    /// An empty value marks the sign going dark.
    fn clear(&mut self) {
        self.write_line("");
    }
}
