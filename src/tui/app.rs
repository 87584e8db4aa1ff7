//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Synchronous analysis on submit

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{ModelAssets, RandomForest, StandardScaler};
use crate::application::AnalysisService;

use super::ui::{
    form::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Analysis service, present only when both model artifacts loaded
    service: Option<AnalysisService<RandomForest, StandardScaler>>,

    /// Why the assets are unavailable, when they are
    asset_error: Option<String>,

    /// Patient form state
    form_state: PatientFormState,

    /// Result screen state
    result_state: ResultState,
}

impl App {
    /// Create a new application instance, loading model assets from the
    /// configured directory.
    ///
    /// A failed asset load does not abort startup: the app runs with the
    /// assets marked unavailable and reports that on the first analysis
    /// attempt instead of crashing.
    ///
    /// # Errors
    /// Returns error only for unrecoverable initialization failures.
    pub fn new() -> Result<Self> {
        let model_dir =
            std::env::var("HEARTGUARD_MODEL_DIR").unwrap_or_else(|_| "models".to_string());

        let (service, asset_error) = match ModelAssets::load(Path::new(&model_dir)) {
            Ok(assets) => (
                Some(AnalysisService::new(assets.classifier, assets.scaler)),
                None,
            ),
            Err(e) => {
                tracing::warn!("Model assets unavailable: {e}");
                (None, Some(e.to_string()))
            }
        };

        Ok(Self::with_assets(service, asset_error))
    }

    /// Create the application with pre-constructed assets (Composition Root
    /// pattern). Used by `new()` and by tests.
    #[must_use]
    pub fn with_assets(
        service: Option<AnalysisService<RandomForest, StandardScaler>>,
        asset_error: Option<String>,
    ) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            asset_error,
            form_state: PatientFormState::default(),
            result_state: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Form => render_patient_form(f, content_area, &self.form_state),
                    Screen::Result => render_result(f, content_area, &self.result_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down => {
                self.form_state.next_field();
            }
            KeyCode::Tab => {
                self.form_state.next_section();
            }
            KeyCode::BackTab => {
                self.form_state.prev_section();
            }
            KeyCode::Left => {
                self.form_state.cycle_left();
            }
            KeyCode::Right => {
                self.form_state.cycle_right();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.run_analysis();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.screen = Screen::Form;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = PatientFormState::default();
                self.screen = Screen::Form;
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Run the full pipeline for the current form inputs.
    ///
    /// Asset availability is checked first: with no loaded model the attempt
    /// short-circuits before any encoding, per the error-handling contract.
    /// Encoding errors stay on the form; inference errors land on the result
    /// screen so input problems and artifact problems read differently.
    fn run_analysis(&mut self) {
        let Some(service) = &self.service else {
            let reason = self
                .asset_error
                .clone()
                .unwrap_or_else(|| "model assets not loaded".to_string());
            self.result_state = ResultState::Error {
                message: format!(
                    "Prediction unavailable: {reason}. \
                     Place model.json and scaler.json in the model directory."
                ),
            };
            self.screen = Screen::Result;
            return;
        };

        let profile = match self.form_state.to_profile() {
            Ok(profile) => profile,
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
                return;
            }
        };

        if let Err(errors) = profile.validate() {
            self.form_state.error_message = Some(errors.join(", "));
            return;
        }

        match service.analyze(&profile) {
            Ok(analysis) => {
                self.result_state = ResultState::Complete { analysis };
                self.screen = Screen::Result;
            }
            Err(e) => {
                tracing::error!("Analysis failed: {e}");
                self.result_state = ResultState::Error {
                    message: e.to_string(),
                };
                self.screen = Screen::Result;
            }
        }
    }
}
