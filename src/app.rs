use crate::config::QuizConfig;
use crate::input::InputSource;
use crate::logger;
use crate::models::{SessionPhase, Transition, UiEvent};
use crate::question_bank::QuestionBank;
use crate::session::QuizSession;
use crate::ui::layout::{calculate_menu_chunks, calculate_quiz_chunks, calculate_summary_chunks};
use crate::utils::rect_contains;
use rand::rngs::StdRng;
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Something a pointer can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Start,
    PlayAgain,
    Quit,
    Option(usize),
}

/// Host-side state: the question bank, the current session, and the glue
/// between pointer positions and session operations.
pub struct App {
    bank: QuestionBank,
    session: QuizSession,
    rng: StdRng,
    error: Option<String>,
}

impl App {
    pub fn new(config: QuizConfig, bank: QuestionBank, rng: StdRng, now: Instant) -> Self {
        Self {
            bank,
            session: QuizSession::new(config, now),
            rng,
            error: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Last error from trying to start a round, shown on the welcome screen.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn tick(&mut self, now: Instant) -> Option<Transition> {
        let transition = self.session.tick(now);
        if let Some(transition) = transition {
            logger::log(&format!("Transition: {:?}", transition));
        }
        transition
    }

    /// Finds the button or option under `(x, y)` on the screen for the
    /// current phase, laid out in `area`.
    pub fn target_at(&self, area: Rect, x: u16, y: u16) -> Option<Target> {
        match self.session.phase() {
            SessionPhase::NotStarted => {
                let layout = calculate_menu_chunks(area);
                if rect_contains(layout.start_button, x, y) {
                    Some(Target::Start)
                } else if rect_contains(layout.quit_button, x, y) {
                    Some(Target::Quit)
                } else {
                    None
                }
            }
            SessionPhase::InProgress => {
                let layout = calculate_quiz_chunks(area);
                if let Some(option) = layout.option_at(x, y) {
                    Some(Target::Option(option))
                } else if rect_contains(layout.quit_button, x, y) {
                    Some(Target::Quit)
                } else {
                    None
                }
            }
            SessionPhase::Over => {
                let layout = calculate_summary_chunks(area);
                if rect_contains(layout.play_again_button, x, y) {
                    Some(Target::PlayAgain)
                } else if rect_contains(layout.quit_button, x, y) {
                    Some(Target::Quit)
                } else {
                    None
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: UiEvent, area: Rect, now: Instant) -> Control {
        let target = match event {
            UiEvent::Quit => Some(Target::Quit),
            UiEvent::PointerDown { x, y } => self.target_at(area, x, y),
        };

        match target {
            Some(Target::Quit) => {
                logger::log("Quit requested");
                return Control::Quit;
            }
            Some(Target::Start) | Some(Target::PlayAgain) => self.start_round(now),
            Some(Target::Option(option)) => {
                self.session.submit(option, now);
            }
            None => {}
        }
        Control::Continue
    }

    fn start_round(&mut self, now: Instant) {
        match self.session.start_round(&self.bank, &mut self.rng, now) {
            Ok(_) => self.error = None,
            Err(e) => {
                logger::log(&format!("Failed to start round: {}", e));
                self.error = Some(format!("Cannot start: {}", e));
            }
        }
    }
}

/// The host loop: tick, draw, poll input, until the user quits.
pub fn run_app<B: Backend, I: InputSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    input: &mut I,
    poll_interval: Duration,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());

        let now = Instant::now();
        let completed = terminal.draw(|f| crate::ui::draw(f, app, now))?;
        let area = completed.area;

        if let Some(event) = input.next_event(poll_interval)?
            && app.handle_event(event, area, Instant::now()) == Control::Quit
        {
            return Ok(());
        }
    }
}
