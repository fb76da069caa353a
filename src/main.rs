use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use protein_quiz::{logger, run_app, App, QuestionBank, QuizConfig, TerminalInput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let config = QuizConfig::default();
    logger::init(&config.log_path);
    logger::log("Starting quiz");

    let bank = match QuestionBank::load(&config.questions_path)
        .and_then(|bank| bank.ensure_round_size(config.questions_per_round).map(|_| bank))
    {
        Ok(bank) => bank,
        Err(e) => {
            logger::log(&format!("Startup failed: {}", e));
            eprintln!(
                "Failed to load questions from {}: {}",
                config.questions_path.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };
    logger::log(&format!("Loaded {} questions", bank.questions().len()));

    match run(config, bank) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log(&format!("Terminal error: {}", e));
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Raw mode, alternate screen and mouse capture, undone on drop so every
/// exit path leaves the terminal usable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    }
}

fn run(config: QuizConfig, bank: QuestionBank) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let poll_interval = config.poll_interval;
    let mut app = App::new(config, bank, StdRng::from_entropy(), Instant::now());
    let mut input = TerminalInput;
    run_app(&mut terminal, &mut app, &mut input, poll_interval)
}
