//! Feedback derived from [`SearchState`]: busy indicator, error notice,
//! initial hint, and the empty-results placeholder.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::search::{SearchError, SearchState};

pub const HINT: &str = "Try a link from YouTube or SoundCloud to get started.";
pub const NO_RESULTS: &str = "No results yet";

const SPINNER_FRAMES: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280f}",
];

/// What the status line should show for a given search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Busy,
    Notice(SearchError),
    Hint,
    Blank,
}

pub fn status_for(state: &SearchState) -> Status {
    match state {
        SearchState::Idle => Status::Hint,
        SearchState::Loading => Status::Busy,
        other => other.error().map_or(Status::Blank, Status::Notice),
    }
}

/// Placeholder for the results pane when there is nothing to list.
pub fn results_placeholder(state: &SearchState) -> Option<&'static str> {
    state.result().is_none().then_some(NO_RESULTS)
}

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// One-line feedback under the link field.
pub struct StatusLine<'a> {
    pub state: &'a SearchState,
    pub spinner_frame: usize,
}

impl<'a> StatusLine<'a> {
    pub fn new(state: &'a SearchState, spinner_frame: usize) -> Self {
        Self {
            state,
            spinner_frame,
        }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let line = match status_for(self.state) {
            Status::Busy => Line::from(vec![
                Span::styled(
                    format!(" {} ", spinner(self.spinner_frame)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("Extracting tracklist...", Style::default().fg(Color::Yellow)),
            ]),
            Status::Notice(error) => Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.to_string(), Style::default().fg(Color::Red)),
            ]),
            Status::Hint => Line::from(Span::styled(
                format!(" {HINT}"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            Status::Blank => return,
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// The "Find Tracks" action; shows a spinner and dims while loading.
pub struct SubmitButton {
    pub loading: bool,
    pub spinner_frame: usize,
}

impl SubmitButton {
    pub fn new(loading: bool, spinner_frame: usize) -> Self {
        Self {
            loading,
            spinner_frame,
        }
    }
}

impl Widget for SubmitButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let (label, style) = if self.loading {
            (
                format!("[ {} ]", spinner(self.spinner_frame)),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                "[ Find Tracks ]".to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        };
        buf.set_stringn(area.x, area.y, label, area.width as usize, style);
    }
}
