//! Main TUI application: the page shell.
//!
//! Handles:
//! - Panel focus and input routing
//! - Spawning one request worker per submission
//! - Applying settled outcomes to the owning panel
//! - The blocking alert

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::adapters::HttpRecordService;
use crate::application::{Action, Outcome};
use crate::config::ClientConfig;
use crate::ports::RecordService;

use super::ui::{
    render_page, Alert, FormPanel, PageView, RegistrationPanel, RetrievalPanel, UploadPanel,
    PAGE_TITLE,
};
use super::worker::{RequestWorker, RequestWorkerHandle};

/// Main application state
pub struct App<S: RecordService + 'static = HttpRecordService> {
    /// Shared read-only collaborator client
    service: Arc<S>,

    /// Panel receiving keyboard input
    focus: Action,

    registration: RegistrationPanel,
    upload: UploadPanel,
    retrieval: RetrievalPanel,

    /// Alert blocking input until dismissed
    alert: Option<Alert>,

    /// Calls still in flight, oldest first
    pending: Vec<RequestWorkerHandle>,

    should_quit: bool,
}

impl App<HttpRecordService> {
    /// Create an application talking HTTP to the configured service.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        tracing::info!(base_url = config.base_url(), "Using record service");
        let service = HttpRecordService::new(config)?;
        Ok(Self::with_service(Arc::new(service)))
    }
}

impl<S: RecordService + 'static> App<S> {
    /// Create application with an injected service (Composition Root pattern).
    ///
    /// All panels start empty with focus on registration.
    #[must_use]
    pub fn with_service(service: Arc<S>) -> Self {
        Self {
            service,
            focus: Action::Register,
            registration: RegistrationPanel::default(),
            upload: UploadPanel::default(),
            retrieval: RetrievalPanel::default(),
            alert: None,
            pending: Vec::new(),
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle(PAGE_TITLE))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if !self.pending.is_empty() {
            tracing::info!(
                pending = self.pending.len(),
                "Exiting with requests still in flight"
            );
        }

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive to worker completions
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the full page into a frame.
    pub fn draw(&self, f: &mut Frame) {
        render_page(
            f,
            &PageView {
                registration: &self.registration,
                upload: &self.upload,
                retrieval: &self.retrieval,
                focus: self.focus,
                alert: self.alert.as_ref(),
            },
        );
    }

    /// Route one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        // The alert swallows everything until dismissed.
        if self.alert.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        match key {
            KeyCode::Tab => self.focus = next_panel(self.focus),
            KeyCode::BackTab => self.focus = prev_panel(self.focus),
            KeyCode::Down => self.focused_panel().next_field(),
            KeyCode::Up => self.focused_panel().prev_field(),
            KeyCode::Left | KeyCode::Right => {
                self.focused_panel().cycle_option();
            }
            KeyCode::Char(' ') => {
                let panel = self.focused_panel();
                if !panel.cycle_option() {
                    panel.input_char(' ');
                }
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_panel().input_char(c);
            }
            KeyCode::Backspace => self.focused_panel().delete_char(),
            KeyCode::Delete => self.focused_panel().clear_field(),
            KeyCode::Enter => self.submit(self.focus),
            _ => {}
        }
    }

    /// Submit a panel. Precondition failures raise an alert and never
    /// reach the service.
    ///
    /// Nothing stops a second submit while the first is in flight; both
    /// calls run and the last one to settle wins.
    pub fn submit(&mut self, action: Action) {
        match self.panel_mut(action).submit() {
            Ok(submission) => {
                tracing::info!(%action, "Submitting");
                let worker = RequestWorker::spawn(self.service.clone(), submission);
                self.pending.push(worker);
            }
            Err(message) => {
                tracing::warn!(%action, "Submission rejected: {}", message);
                self.alert = Some(Alert::new(message));
            }
        }
    }

    /// Apply every outcome that has settled since the last poll.
    pub fn poll_workers(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let mut settled = Vec::new();
        self.pending.retain(|worker| match worker.try_recv() {
            Some(outcome) => {
                settled.push(outcome);
                false
            }
            None => true,
        });

        for outcome in settled {
            self.apply(outcome);
        }
    }

    /// Block until every in-flight call settles or `timeout` elapses,
    /// applying outcomes as they arrive.
    ///
    /// Returns `true` if nothing is left in flight.
    pub fn wait_for_pending(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll_workers();
            if self.pending.is_empty() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(5).min(deadline - now));
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        let action = outcome.action();
        if let Outcome::Failed(failed) = &outcome {
            self.alert = Some(Alert::new(failed.failure_message()));
        }
        self.panel_mut(action).settle(outcome);
    }

    fn focused_panel(&mut self) -> &mut dyn FormPanel {
        self.panel_mut(self.focus)
    }

    fn panel_mut(&mut self, action: Action) -> &mut dyn FormPanel {
        match action {
            Action::Register => &mut self.registration,
            Action::Upload => &mut self.upload,
            Action::Retrieve => &mut self.retrieval,
        }
    }

    /// Panel with keyboard focus.
    #[must_use]
    pub fn focus(&self) -> Action {
        self.focus
    }

    /// Move keyboard focus to a panel.
    pub fn set_focus(&mut self, action: Action) {
        self.focus = action;
    }

    #[must_use]
    pub fn registration(&self) -> &RegistrationPanel {
        &self.registration
    }

    #[must_use]
    pub fn upload(&self) -> &UploadPanel {
        &self.upload
    }

    #[must_use]
    pub fn retrieval(&self) -> &RetrievalPanel {
        &self.retrieval
    }

    /// Alert currently blocking input, if any.
    #[must_use]
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Number of calls in flight across all panels.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn next_panel(action: Action) -> Action {
    match action {
        Action::Register => Action::Upload,
        Action::Upload => Action::Retrieve,
        Action::Retrieve => Action::Register,
    }
}

fn prev_panel(action: Action) -> Action {
    match action {
        Action::Register => Action::Retrieve,
        Action::Upload => Action::Register,
        Action::Retrieve => Action::Upload,
    }
}
