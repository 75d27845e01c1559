use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// A simple single-line text input renderer.
///
/// Renders the prompt + text content, with a cursor indicator at the end.
/// Shows a dimmed placeholder while the text is empty.
pub struct TextInput<'a> {
    pub prompt: &'a str,
    pub text: &'a str,
    pub placeholder: &'a str,
    pub style: Style,
}

impl<'a> TextInput<'a> {
    pub fn new(prompt: &'a str, text: &'a str) -> Self {
        Self {
            prompt,
            text,
            placeholder: "",
            style: Style::default().fg(Color::White),
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if self.text.is_empty() && !self.placeholder.is_empty() {
            let line = format!("{}\u{2588}{}", self.prompt, self.placeholder);
            buf.set_stringn(
                area.x,
                area.y,
                line,
                area.width as usize,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let display = format!("{}{}\u{2588}", self.prompt, self.text);
        // If the display is wider than the area, show the rightmost portion.
        let visible = rightmost(&display, area.width as usize);
        buf.set_string(area.x, area.y, visible, self.style);
    }
}

/// The longest suffix of `s` that fits in `max_width` terminal columns.
fn rightmost(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, c) in s.char_indices().rev() {
        width += c.width().unwrap_or(0);
        if width > max_width {
            return &s[idx + c.len_utf8()..];
        }
    }
    s
}
