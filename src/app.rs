use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::api::TracktraceClient;
use crate::config::AppConfig;
use crate::event::{ApiResult, AppEvent, Event, EventHandler};
use crate::search::{SearchController, SearchTicket};
use crate::ui;
use crate::ui::results::revealed_count;

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub config: AppConfig,

    // Shared with spawned request tasks.
    pub client: Arc<TracktraceClient>,

    // Input state
    pub input: String,

    // Search state
    pub search: SearchController,

    // Presentation
    pub show_help: bool,
    pub scroll_offset: usize,
    pub spinner_frame: usize,
    pub revealed_at: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, client: TracktraceClient) -> Self {
        let events = EventHandler::new(config.tick_period());
        Self::with_events(config, client, events)
    }

    fn with_events(config: AppConfig, client: TracktraceClient, events: EventHandler) -> Self {
        Self {
            running: true,
            events,
            config,
            client: Arc::new(client),
            input: String::new(),
            search: SearchController::new(),
            show_help: false,
            scroll_offset: 0,
            spinner_frame: 0,
            revealed_at: None,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key)
                        if key.kind == crossterm::event::KeyEventKind::Press =>
                    {
                        self.handle_key_event(key);
                    }
                    crossterm::event::Event::Paste(text) => self.paste(&text),
                    _ => {}
                },
                Event::App(app_event) => self.handle_app_event(*app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    fn tick(&mut self) {
        if self.search.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Number of tracks whose staggered reveal has started.
    pub fn revealed_tracks(&self) -> usize {
        let total = self.search.result().map_or(0, |r| r.tracks().len());
        match self.revealed_at {
            Some(at) => revealed_count(at.elapsed(), self.config.reveal_delay(), total),
            None => total,
        }
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c' | 'C') => self.events.send(AppEvent::Quit),
                KeyCode::Char('u' | 'U') => self.input.clear(),
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Enter => {
                self.events.send(AppEvent::Submit);
            }
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.events.send(AppEvent::Quit);
                } else {
                    self.input.clear();
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Down => self.scroll_by(1),
            KeyCode::Up => self.scroll_back(1),
            KeyCode::PageDown => self.scroll_by(PAGE_ROWS),
            KeyCode::PageUp => self.scroll_back(PAGE_ROWS),
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::End => self.scroll_by(usize::MAX),
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn paste(&mut self, text: &str) {
        if self.show_help {
            return;
        }
        self.input.extend(text.chars().filter(|c| !c.is_control()));
    }

    // -- Scrolling ----------------------------------------------------------

    fn scroll_by(&mut self, rows: usize) {
        let count = self.search.result().map_or(0, |r| r.tracks().len());
        let last = count.saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(rows).min(last);
    }

    fn scroll_back(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    // -- App event handling -------------------------------------------------

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                self.search.abandon();
                self.running = false;
            }
            AppEvent::Submit => {
                // The submit action is disabled while a request is outstanding.
                if self.search.is_loading() {
                    return;
                }
                self.scroll_offset = 0;
                self.revealed_at = None;
                if let Some(ticket) = self.search.submit(&self.input) {
                    self.dispatch_process(ticket);
                }
            }
            AppEvent::ProcessLoaded { seq, result } => {
                if self.search.complete(seq, result) && self.search.result().is_some() {
                    self.revealed_at = Some(Instant::now());
                }
            }
        }
    }

    // -- API dispatch -------------------------------------------------------

    fn dispatch_process(&self, ticket: SearchTicket) {
        let client = Arc::clone(&self.client);
        let sender = self.events.sender();

        tokio::spawn(async move {
            let SearchTicket { seq, url, cancel } = ticket;
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(seq, "search request cancelled");
                    return;
                }
                result = client.process(&url) => result,
            };
            let mapped: ApiResult<_> = result.map_err(|e| Arc::new(e.to_string()));
            let _ = sender.send(Event::App(Box::new(AppEvent::ProcessLoaded {
                seq,
                result: mapped,
            })));
        });
    }
}
