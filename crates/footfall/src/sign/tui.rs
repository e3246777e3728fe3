//! Terminal lifecycle for the panel backend.
//!
//! Raw mode and the alternate screen are undone on normal exit, on drop,
//! on panic (before color-eyre prints its report), and right before a
//! watchdog restart replaces the process.

use std::io::{self, Stdout, stdout};
use std::panic::PanicHookInfo;

use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Does not touch the terminal yet; see [`Tui::enter`].
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        restore();
        Ok(())
    }

    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore();
    }
}

/// Best-effort terminal restoration; safe to call more than once.
pub fn restore() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// color-eyre's panic report, preceded by `cleanup`.
fn panic_hook(cleanup: fn()) -> PanicHook {
    let (report, _) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    let report = report.into_panic_hook();

    Box::new(move |info: &PanicHookInfo<'_>| {
        cleanup();
        report(info);
    })
}

/// Restore the terminal, then print the panic through color-eyre.
///
/// Install before entering the panel so a panic during setup is readable.
pub fn install_panic_hook() {
    std::panic::set_hook(panic_hook(restore));
}
