//! Device restart: replace this process with a fresh copy of itself.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use tracing::warn;

use footfall_core::{CoreError, Restart};

type Cleanup = Box<dyn FnMut() + Send>;

/// Re-executes a program with fixed arguments.
///
/// On Unix the process image is replaced, so a successful restart never
/// returns. Elsewhere a child is spawned and this process exits.
pub struct ProcessRestart {
    program: PathBuf,
    args: Vec<OsString>,
    cleanup: Option<Cleanup>,
}

impl ProcessRestart {
    pub fn new(program: impl Into<PathBuf>, args: impl IntoIterator<Item = OsString>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            cleanup: None,
        }
    }

    /// The running executable with the arguments it was started with.
    pub fn current() -> Result<Self, CoreError> {
        let program = std::env::current_exe().map_err(|e| CoreError::Restart {
            reason: format!("cannot locate own executable: {e}"),
        })?;
        Ok(Self::new(program, std::env::args_os().skip(1)))
    }

    /// Run `f` right before the process is replaced, e.g. to restore the
    /// terminal or flush buffered logs.
    pub fn with_cleanup(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.cleanup = Some(Box::new(f));
        self
    }
}

impl Restart for ProcessRestart {
    fn restart(&mut self) -> Result<(), CoreError> {
        // Logged first: cleanup may flush and close the log writer.
        warn!(program = %self.program.display(), "restarting");
        if let Some(cleanup) = self.cleanup.as_mut() {
            cleanup();
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        Err(CoreError::Restart {
            reason: relaunch(cmd),
        })
    }
}

#[cfg(unix)]
fn relaunch(mut cmd: Command) -> String {
    use std::os::unix::process::CommandExt;

    // Only returns on failure.
    cmd.exec().to_string()
}

#[cfg(not(unix))]
fn relaunch(mut cmd: Command) -> String {
    match cmd.spawn() {
        Ok(_) => std::process::exit(0),
        Err(e) => e.to_string(),
    }
}
