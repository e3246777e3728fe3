//! Double-size block text for the count, like the scale-2 label on the LED sign.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const GLYPH_ROWS: usize = 5;
const PIXEL_ON: &str = "██";
const PIXEL_OFF: &str = "  ";

/// 3x5 bitmaps for everything the sign can show.
fn glyph(c: char) -> Option<[&'static str; GLYPH_ROWS]> {
    let rows = match c {
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", "###", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", "..#", "..#", "..#"],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        '?' => ["###", "..#", ".##", "...", ".#."],
        'E' => ["###", "#..", "###", "#..", "###"],
        'r' => ["...", "...", "##.", "#..", "#.."],
        'x' => ["...", "...", "#.#", ".#.", "#.#"],
        ' ' => ["...", "...", "...", "...", "..."],
        _ => return None,
    };
    Some(rows)
}

/// Render `text` as block rows, or `None` if a character has no glyph.
pub fn block_rows(text: &str) -> Option<Vec<String>> {
    let glyphs = text.chars().map(glyph).collect::<Option<Vec<_>>>()?;

    let rows = (0..GLYPH_ROWS)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| {
                    g[row]
                        .chars()
                        .map(|p| if p == '#' { PIXEL_ON } else { PIXEL_OFF })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Some(rows)
}

fn width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

/// Block text centred in its area. Falls back to plain text when the area
/// is too small or a character has no glyph.
pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let rows = block_rows(self.text).filter(|rows| {
            let w = rows.first().map_or(0, |r| width(r));
            w <= area.width && GLYPH_ROWS <= usize::from(area.height)
        });

        let Some(rows) = rows else {
            let w = width(self.text).min(area.width);
            let x = area.x + (area.width - w) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(x, y, self.text, usize::from(area.width), self.style);
            return;
        };

        let h = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let top = area.y + (area.height - h) / 2;
        for (y, row) in (top..).zip(&rows) {
            let x = area.x + (area.width - width(row)) / 2;
            buf.set_string(x, y, row, self.style);
        }
    }
}
