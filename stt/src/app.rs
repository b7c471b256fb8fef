use std::time::Duration;

use cadence::{Effect, SessionEvent, Stats, TestSession};
use crossterm::event::{self, Event, KeyCode};
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::config::{Settings, Theme};
use crate::error::AppError;
use crate::utils::KeyEventHelper;
use crate::view;

/// The app itself
pub struct App {
    session: TestSession,
    theme: Theme,
    tick_rate: Duration,
}

impl App {
    /// Creates a new `App`
    pub fn new(session: TestSession, settings: &Settings) -> Self {
        Self {
            session,
            theme: settings.theme.clone(),
            tick_rate: Duration::from_millis(settings.tick_rate_ms.max(1)),
        }
    }

    /// Runs the app until the user quits.
    ///
    /// Returns the result of the test, or `None` if it was aborted.
    pub fn run(mut self) -> Result<Option<Stats>, AppError> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();

        result.map(|()| self.session.current_stats())
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<(), AppError> {
        loop {
            terminal.draw(|frame| view::draw(frame, &self.session, &self.theme))?;

            let event = event::poll(self.tick_rate)?
                .then(event::read)
                .transpose()?;

            if let Some(session_event) = event.as_ref().and_then(session_event) {
                if self.apply(session_event) {
                    return Ok(());
                }
            }

            // Expiry is noticed even while keys keep arriving
            self.apply(SessionEvent::Tick);
        }
    }

    /// Feeds the session. Returns true once the user quit.
    fn apply(&mut self, event: SessionEvent) -> bool {
        match self.session.handle(event) {
            Some(Effect::Quit) => {
                info!(phase = ?self.session.phase(), "quit");
                true
            }
            Some(effect) => {
                debug!(?effect, ?event, "session effect");
                false
            }
            None => false,
        }
    }
}

/// Translates a terminal event into a session event
pub fn session_event(event: &Event) -> Option<SessionEvent> {
    let Event::Key(key) = event else {
        return None;
    };

    if !key.is_press() {
        return None;
    }

    if key.is_ctrl_press_char('c') || key.code == KeyCode::Esc {
        return Some(SessionEvent::Quit);
    }

    match key.code {
        KeyCode::Backspace => Some(SessionEvent::Backspace),
        KeyCode::Enter => Some(SessionEvent::Start),
        KeyCode::Char(character) if !key.is_ctrl() => u8::try_from(character)
            .ok()
            .filter(u8::is_ascii)
            .map(SessionEvent::Char),
        _ => None,
    }
}
