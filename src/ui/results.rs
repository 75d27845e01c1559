use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};
use unicode_width::UnicodeWidthStr;

use crate::api::types::ProcessResult;
use crate::search::SearchState;
use crate::ui::status::results_placeholder;

/// One rendered tracklist row. `position` is 1-based and presentation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow<'a> {
    pub position: usize,
    pub time: &'a str,
    pub title: &'a str,
}

/// Project a result into rows, in the order the backend sent them.
pub fn track_rows(result: &ProcessResult) -> Vec<TrackRow<'_>> {
    result
        .tracks()
        .iter()
        .enumerate()
        .map(|(idx, track)| TrackRow {
            position: idx + 1,
            time: &track.time,
            title: &track.title,
        })
        .collect()
}

/// How many rows of a staggered reveal are visible after `elapsed`.
///
/// Row `i` appears at `i * delay`; a zero delay shows everything at once.
pub fn revealed_count(elapsed: Duration, delay: Duration, total: usize) -> usize {
    if delay.is_zero() {
        return total;
    }
    let started = elapsed.as_nanos() / delay.as_nanos() + 1;
    usize::try_from(started).unwrap_or(usize::MAX).min(total)
}

/// Tracklist pane: header plus the ordered list of tracks.
pub struct ResultsView<'a> {
    pub state: &'a SearchState,
    pub scroll_offset: usize,
    pub revealed: usize,
}

impl<'a> ResultsView<'a> {
    pub fn new(state: &'a SearchState) -> Self {
        Self {
            state,
            scroll_offset: 0,
            revealed: usize::MAX,
        }
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn revealed(mut self, revealed: usize) -> Self {
        self.revealed = revealed;
        self
    }
}

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Tracklist ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 2 {
            return;
        }

        let Some(result) = self.state.result() else {
            if let Some(placeholder) = results_placeholder(self.state) {
                let x = inner.x + inner.width.saturating_sub(placeholder.width() as u16) / 2;
                let y = inner.y + inner.height / 2;
                buf.set_stringn(
                    x,
                    y,
                    placeholder,
                    inner.width as usize,
                    Style::default().fg(Color::DarkGray),
                );
            }
            return;
        };

        let content_width = inner.width.saturating_sub(1); // 1 char left margin
        let x = inner.x + 1;
        let bottom = inner.y + inner.height;

        // Header: title / type
        let header = Line::from(vec![
            Span::styled(
                result.title.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" / ", Style::default().fg(Color::DarkGray)),
            Span::styled(result.kind.as_str(), Style::default().fg(Color::Cyan)),
        ]);
        buf.set_line(x, inner.y, &header, content_width);

        let mut y = inner.y + 1;
        if y < bottom {
            let sep = "\u{2500}".repeat(content_width as usize);
            buf.set_string(x, y, &sep, Style::default().fg(Color::DarkGray));
            y += 1;
        }

        let rows = track_rows(result);
        let number_width = rows.len().to_string().len();
        let time_width = rows.iter().map(|r| r.time.width()).max().unwrap_or(0);

        for row in rows
            .iter()
            .take(self.revealed)
            .skip(self.scroll_offset)
        {
            if y >= bottom {
                break;
            }
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>number_width$}  ", row.position),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<time_width$}  ", row.time),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(row.title, Style::default().fg(Color::White)),
            ]);
            buf.set_line(x, y, &line, content_width);
            y += 1;
        }
    }
}
