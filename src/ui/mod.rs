pub mod help;
pub mod input;
pub mod results;
pub mod status;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::app::App;

use help::HelpView;
use input::TextInput;
use results::ResultsView;
use status::{StatusLine, SubmitButton};
use status_bar::StatusBar;

const PLACEHOLDER: &str = "Paste YouTube or SoundCloud link";
const BUTTON_WIDTH: u16 = 15;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: brand, link field, feedback line, tracklist, status bar
    let [brand_area, field_area, feedback_area, results_area, bar_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_brand(frame, brand_area);
    render_link_field(frame, app, field_area);

    frame.render_widget(
        StatusLine::new(app.search.state(), app.spinner_frame),
        feedback_area,
    );
    frame.render_widget(
        ResultsView::new(app.search.state())
            .scroll_offset(app.scroll_offset)
            .revealed(app.revealed_tracks()),
        results_area,
    );
    frame.render_widget(StatusBar::new(app), bar_area);

    if app.show_help {
        frame.render_widget(HelpView::new(), area);
    }
}

fn render_brand(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " \u{1f3a7} TrackTrace ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Extract tracklists from YouTube & SoundCloud links",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(line, area);
}

fn render_link_field(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.search.is_loading() {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Link ")
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, button_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(BUTTON_WIDTH)]).areas(inner);

    frame.render_widget(
        TextInput::new(" ", &app.input).placeholder(PLACEHOLDER),
        text_area,
    );
    frame.render_widget(
        SubmitButton::new(app.search.is_loading(), app.spinner_frame),
        button_area,
    );
}
