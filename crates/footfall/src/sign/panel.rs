//! Full-screen panel laid out like the 64x32 LED sign: caption lines on the
//! left, the count in block digits on the right.
//!
//! The poller owns a [`PanelSign`] and publishes readings through a watch
//! channel; [`run_ui`] redraws whenever the reading changes or the terminal
//! is resized.

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use footfall_core::{Display, Reading};

use super::glyphs::BigText;
use super::tui::Tui;

const CAPTION: Color = Color::Rgb(128, 255, 234);
const COUNT: Color = Color::Rgb(80, 250, 123);
const FAILURE: Color = Color::Rgb(255, 99, 99);
const PENDING: Color = Color::Rgb(189, 193, 207);
const BORDER: Color = Color::Rgb(98, 114, 164);

/// What the panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignState {
    Showing(Reading),
    /// Cleared ahead of a restart.
    Blank,
}

/// Poller-side handle to the panel.
pub struct PanelSign {
    tx: watch::Sender<SignState>,
}

/// A sign starting at the pending placeholder, and the receiver for the UI.
pub fn channel() -> (PanelSign, watch::Receiver<SignState>) {
    let (tx, rx) = watch::channel(SignState::Showing(Reading::Pending));
    (PanelSign { tx }, rx)
}

impl Display for PanelSign {
    fn render(&mut self, reading: Reading) {
        self.tx.send_replace(SignState::Showing(reading));
    }

    fn clear(&mut self) {
        self.tx.send_replace(SignState::Blank);
    }
}

// ── Drawing ──────────────────────────────────────────────────────────

fn reading_style(reading: Reading) -> Style {
    let color = match reading {
        Reading::Count(_) => COUNT,
        Reading::Error(_) => FAILURE,
        Reading::Pending => PENDING,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Draw one frame of the sign.
pub fn draw_sign(frame: &mut Frame, captions: &[String], state: SignState) {
    let block = Block::bordered()
        .title(" footfall ")
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let SignState::Showing(reading) = state else {
        return;
    };
    if inner.is_empty() {
        return;
    }

    let caption_width = captions
        .iter()
        .map(|c| u16::try_from(c.chars().count()).unwrap_or(u16::MAX))
        .max()
        .unwrap_or(0)
        .saturating_add(2);
    let [left, right] =
        Layout::horizontal([Constraint::Length(caption_width), Constraint::Min(0)]).areas(inner);

    draw_captions(frame, captions, left);

    let text = reading.to_string();
    frame.render_widget(BigText::new(&text).style(reading_style(reading)), right);
}

/// One caption per equal band, each on the band's middle row.
fn draw_captions(frame: &mut Frame, captions: &[String], area: Rect) {
    let bands = Layout::vertical(captions.iter().map(|_| Constraint::Fill(1))).split(area);
    let style = Style::default().fg(CAPTION);

    for (caption, band) in captions.iter().zip(bands.iter()) {
        let row = Rect {
            y: band.y + band.height / 2,
            height: band.height.min(1),
            ..*band
        };
        frame.render_widget(
            Paragraph::new(caption.as_str())
                .style(style)
                .alignment(Alignment::Center),
            row,
        );
    }
}

// ── UI loop ──────────────────────────────────────────────────────────

fn is_quit(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
}

/// Drive the terminal until quit, cancellation, or the poller going away.
///
/// A quit key cancels `cancel` so the poller stops too.
pub async fn run_ui(
    captions: Vec<String>,
    mut rx: watch::Receiver<SignState>,
    cancel: CancellationToken,
) -> io::Result<()> {
    let mut tui = Tui::new()?;
    tui.enter()?;
    let mut events = EventStream::new();

    loop {
        let state = *rx.borrow_and_update();
        tui.draw(|frame| draw_sign(frame, &captions, state))?;

        tokio::select! {
            () = cancel.cancelled() => break,

            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("poller finished, closing panel");
                    break;
                }
            }

            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit(key) => {
                    debug!("quit requested");
                    cancel.cancel();
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
        }
    }

    tui.exit()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use footfall_core::{ErrorMarker, VisitorCount};

    use super::*;

    fn captions() -> Vec<String> {
        vec!["CTH Daily".into(), "Entry".into(), "Count".into()]
    }

    fn screen(state: SignState) -> Vec<String> {
        screen_sized(48, 14, state)
    }

    fn screen_sized(width: u16, height: u16, state: SignState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw_sign(frame, &captions(), state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_owned())
                    .collect()
            })
            .collect()
    }

    fn contains(screen: &[String], needle: &str) -> bool {
        screen.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn panel_shows_captions_and_count() {
        let screen = screen(SignState::Showing(Reading::Count(VisitorCount::new(58))));
        let text = screen.join("\n");

        for caption in ["CTH Daily", "Entry", "Count"] {
            assert!(contains(&screen, caption), "missing {caption}:\n{text}");
        }
        assert!(contains(&screen, "██"), "no block digits:\n{text}");
    }

    #[test]
    fn captions_are_drawn_top_to_bottom() {
        let screen = screen(SignState::Showing(Reading::Pending));
        let row_of = |needle: &str| screen.iter().position(|r| r.contains(needle)).unwrap();

        assert!(row_of("CTH Daily") < row_of("Entry"));
        assert!(row_of("Entry") < row_of("Count"));
    }

    #[test]
    fn tiny_terminals_draw_only_the_border() {
        let count = SignState::Showing(Reading::Count(VisitorCount::new(7)));
        for (width, height) in [(48, 1), (48, 2), (1, 14), (2, 2)] {
            let screen = screen_sized(width, height, count);
            assert!(!contains(&screen, "CTH Daily"), "{width}x{height}");
            assert!(!contains(&screen, "7"), "{width}x{height}");
        }
    }

    #[test]
    fn blank_sign_has_no_content() {
        let screen = screen(SignState::Blank);
        assert!(!contains(&screen, "CTH Daily"));
        assert!(!contains(&screen, "██"));
    }

    #[test]
    fn sign_handle_publishes_readings_and_clear() {
        let (mut sign, rx) = channel();
        assert_eq!(*rx.borrow(), SignState::Showing(Reading::Pending));

        sign.render(Reading::Error(ErrorMarker::Status));
        assert_eq!(
            *rx.borrow(),
            SignState::Showing(Reading::Error(ErrorMarker::Status))
        );

        sign.clear();
        assert_eq!(*rx.borrow(), SignState::Blank);
    }

    #[test]
    fn quit_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);

        assert!(is_quit(key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
