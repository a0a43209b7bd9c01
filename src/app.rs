// App state and main event loop.
// Owns the auth session, applies fetch results, and handles keyboard input.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiClient, User};
use crate::context::AppContext;
use crate::error::Result;
use crate::session::{AuthSession, AuthState, fetch_session_user};
use crate::settings::SettingsSnapshot;
use crate::storage::FileStore;
use crate::ui;

const INPUT_WAIT: Duration = Duration::from_millis(100);

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Session,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Session, Tab::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Session => "Session",
            Tab::Settings => "Animation",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Session => Tab::Settings,
            Tab::Settings => Tab::Session,
        }
    }

    pub fn prev(&self) -> Self {
        // Two tabs: previous and next coincide.
        self.next()
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Whether the app should exit.
    pub should_quit: bool,
    /// Server the client talks to, for display.
    pub server: String,
    /// Derived session view, recomputed every frame.
    pub auth_state: AuthState,
    /// Latest animation settings, `None` when the provider is not running.
    pub settings: Option<SettingsSnapshot>,
    auth: AuthSession<FileStore>,
    api: Arc<ApiClient>,
    results_tx: UnboundedSender<Result<Option<User>>>,
    results_rx: UnboundedReceiver<Result<Option<User>>>,
}

impl App {
    pub fn new(context: &AppContext) -> Self {
        let auth = context.auth_session();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            active_tab: Tab::default(),
            should_quit: false,
            server: context.api.base_url().to_string(),
            auth_state: auth.state(),
            settings: None,
            auth,
            api: Arc::clone(&context.api),
            results_tx,
            results_rx,
        }
    }

    /// Main event loop.
    pub fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        context: &AppContext,
    ) -> io::Result<()> {
        self.request_current_user();
        while !self.should_quit {
            self.apply_results();
            self.refresh_view(context);
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Start a current-user fetch unless one is already out.
    pub fn request_current_user(&mut self) {
        if !self.auth.begin_fetch() {
            return;
        }

        let api = Arc::clone(&self.api);
        let tx = self.results_tx.clone();
        let retry = self.auth.retry();
        tokio::spawn(async move {
            let result = fetch_session_user(api.as_ref(), retry).await;
            // The receiver only goes away when the app is exiting.
            let _ = tx.send(result);
        });
    }

    /// Apply finished fetches to the session.
    fn apply_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.auth.resolve(result);
        }
    }

    fn refresh_view(&mut self, context: &AppContext) {
        self.auth_state = self.auth.state();
        self.settings = context
            .animation_settings()
            .ok()
            .map(|provider| provider.snapshot());
    }

    /// Wait briefly for input so fetch results keep flowing between keys.
    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(INPUT_WAIT)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.prev(),
            KeyCode::Char('r') => self.request_current_user(),
            _ => {}
        }
    }
}
