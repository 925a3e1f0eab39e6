//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Background risk checks via the worker

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
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

use crate::adapters::lexicon::LexiconSentiment;
use crate::adapters::model::{self, LogisticModel};
use crate::application::{AssessmentService, AssessmentStage, FeedbackService};
use crate::config::Config;

use super::ui::{
    assessment::{render_assessment, AssessmentState},
    feedback::{render_feedback, FeedbackState},
    form::{render_health_form, HealthFormState},
    render_disclaimer,
};
use super::worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Assessment,
    Feedback,
}

/// Main application state
pub struct App {
    screen: Screen,

    /// Screen to return to when feedback is closed
    previous_screen: Screen,

    should_quit: bool,

    assessment_service: Arc<AssessmentService<LogisticModel>>,

    feedback_service: FeedbackService<LexiconSentiment>,

    form_state: HealthFormState,

    assessment_state: AssessmentState,

    feedback_state: FeedbackState,

    /// Pending assessment worker (if running)
    pending_worker: Option<AssessmentWorkerHandle>,

    /// Current stage and when it started (for UI animation)
    phase: Option<(AssessmentStage, Instant)>,
}

impl App {
    /// Create a new application, loading the model named by `config`.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded or verified.
    pub fn new(config: &Config) -> Result<Self> {
        let model_dir = config.model_path.as_path();
        if !model_dir.exists() {
            return Err(anyhow!(
                "Model path not found at {:?}. Set VITALIS_MODEL_PATH to a directory containing model.json.",
                model_dir
            ));
        }

        // Refuse to start without a usable model.
        let loaded = LogisticModel::load(model_dir, config.require_model_digest)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {}", model_dir, e))?;
        let classifier = model::init_global(loaded)?;
        tracing::info!(
            "Risk model ready (sha256 {}, threshold {:.2})",
            classifier.digest(),
            classifier.threshold()
        );

        Ok(Self::with_dependencies(
            Arc::new(AssessmentService::new(classifier)),
            FeedbackService::new(Arc::new(LexiconSentiment::new())),
        ))
    }

    /// Create application with injected services.
    pub fn with_dependencies(
        assessment_service: Arc<AssessmentService<LogisticModel>>,
        feedback_service: FeedbackService<LexiconSentiment>,
    ) -> Self {
        Self {
            screen: Screen::Form,
            previous_screen: Screen::Form,
            should_quit: false,
            assessment_service,
            feedback_service,
            form_state: HealthFormState::default(),
            // Replaced on the first submit, before the screen is shown.
            assessment_state: AssessmentState::Encoding { progress: 0.0 },
            feedback_state: FeedbackState::default(),
            pending_worker: None,
            phase: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

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
            self.poll_worker();
            self.tick_progress();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match self.screen {
                    Screen::Form => render_health_form(f, chunks[0], &self.form_state),
                    Screen::Assessment => {
                        render_assessment(f, chunks[0], &self.assessment_state)
                    }
                    Screen::Feedback => render_feedback(f, chunks[0], &self.feedback_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            // Short poll to stay responsive
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

    /// Drain progress updates from the background worker.
    fn poll_worker(&mut self) {
        while let Some(progress) = self
            .pending_worker
            .as_mut()
            .and_then(|worker| worker.try_recv())
        {
            match progress {
                AssessmentProgress::Stage(stage) => self.set_phase(stage),
                AssessmentProgress::Complete(assessment) => {
                    self.assessment_state = AssessmentState::Complete { assessment };
                    self.finish_worker();
                }
                AssessmentProgress::Error(message) => {
                    tracing::warn!("Risk check failed: {message}");
                    self.assessment_state = AssessmentState::Error { message };
                    self.finish_worker();
                }
            }
        }
    }

    fn finish_worker(&mut self) {
        self.pending_worker = None;
        self.phase = None;
    }

    fn set_phase(&mut self, phase: AssessmentStage) {
        let floor = match phase {
            AssessmentStage::Encoding => 0.0,
            AssessmentStage::Predicting => 0.30,
            AssessmentStage::Advising => 0.85,
        };
        let progress = self.assessment_state.progress().unwrap_or(0.0).max(floor);

        self.phase = Some((phase, Instant::now()));
        self.assessment_state = Self::state_for(phase, progress);
    }

    fn state_for(phase: AssessmentStage, progress: f64) -> AssessmentState {
        match phase {
            AssessmentStage::Encoding => AssessmentState::Encoding { progress },
            AssessmentStage::Predicting => AssessmentState::Predicting { progress },
            AssessmentStage::Advising => AssessmentState::Advising { progress },
        }
    }

    /// Ease the gauge toward the current phase's ceiling.
    fn tick_progress(&mut self) {
        let Some((phase, started_at)) = self.phase else {
            return;
        };
        let Some(current) = self.assessment_state.progress() else {
            return;
        };

        let elapsed = started_at.elapsed().as_secs_f64();
        let (floor, target, tau) = match phase {
            AssessmentStage::Encoding => (0.02, 0.30, 0.4),
            AssessmentStage::Predicting => (0.30, 0.85, 0.8),
            AssessmentStage::Advising => (0.85, 0.98, 0.4),
        };

        let k = 1.0 - (-elapsed / tau).exp();
        let desired = floor + (target - floor) * k;
        let progress = desired.max(current).min(target);

        self.assessment_state = Self::state_for(phase, progress);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Assessment => self.handle_assessment_key(key),
            Screen::Feedback => self.handle_feedback_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Left => self.form_state.cycle_choice(false),
            KeyCode::Right | KeyCode::Char(' ') => self.form_state.cycle_choice(true),
            KeyCode::Char('s') | KeyCode::Char('S') => self.form_state.load_sample_data(),
            KeyCode::Char('f') | KeyCode::Char('F') => self.open_feedback(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_assessment_key(&mut self, key: KeyCode) {
        match &self.assessment_state {
            AssessmentState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => self.screen = Screen::Form,
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = HealthFormState::default();
                    self.screen = Screen::Form;
                }
                KeyCode::Char('f') | KeyCode::Char('F') => self.open_feedback(),
                _ => {}
            },
            AssessmentState::Error { .. } => {
                if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                    self.screen = Screen::Form;
                }
            }
            _ => {}
        }
    }

    fn handle_feedback_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.feedback_state.clear();
                self.screen = self.previous_screen;
            }
            KeyCode::Enter => self.analyze_feedback(),
            KeyCode::Backspace => self.feedback_state.delete_char(),
            KeyCode::Char(c) => self.feedback_state.input_char(c),
            _ => {}
        }
    }

    fn open_feedback(&mut self) {
        self.previous_screen = self.screen;
        self.feedback_state.clear();
        self.screen = Screen::Feedback;
    }

    fn analyze_feedback(&mut self) {
        match self.feedback_service.analyze(&self.feedback_state.text) {
            Ok(result) => {
                self.feedback_state.result = Some(result);
                self.feedback_state.error = None;
            }
            Err(e) => {
                self.feedback_state.result = None;
                self.feedback_state.error = Some(e.to_string());
            }
        }
    }

    fn submit_form(&mut self) {
        let metrics = match self.form_state.to_health_metrics() {
            Ok(metrics) => metrics,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        if let Err(errors) = metrics.validate() {
            self.form_state.error_message = Some(errors.join(", "));
            return;
        }

        self.screen = Screen::Assessment;
        self.set_phase(AssessmentStage::Encoding);

        let worker = AssessmentWorker::spawn(self.assessment_service.clone(), metrics);
        self.pending_worker = Some(worker);

        // Clear plaintext buffers from the UI immediately.
        self.form_state.clear_sensitive();
    }
}
