use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::App;

/// Bottom status bar showing key hints, the backend address, and track count.
pub struct StatusBar<'a> {
    pub app: &'a App,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        // Background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let mut spans = Vec::new();

        let mode_style = Style::default()
            .bg(if self.app.search.is_loading() {
                Color::Yellow
            } else {
                Color::Blue
            })
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let mode_str = if self.app.search.is_loading() {
            " LOADING "
        } else {
            " READY "
        };
        spans.push(Span::styled(mode_str, mode_style));
        spans.push(Span::styled(
            " Enter search  \u{2191}\u{2193} scroll  F1 help  Esc quit ",
            bg_style,
        ));

        if let Some(result) = self.app.search.result() {
            spans.push(Span::styled(
                format!("[{} tracks] ", result.tracks().len()),
                Style::default().bg(Color::DarkGray).fg(Color::Yellow),
            ));
        }

        // Backend address (right-aligned)
        let backend = self.app.client.base_url();
        let left_width: usize = spans.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_width + backend.len() + 1);
        if padding > 0 {
            spans.push(Span::styled(" ".repeat(padding), bg_style));
            spans.push(Span::styled(
                backend,
                Style::default().bg(Color::DarkGray).fg(Color::Gray),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
