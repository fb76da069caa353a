pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod question_bank;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use app::{run_app, App, Control, Target};
pub use config::QuizConfig;
pub use error::QuizError;
pub use input::{InputSource, TerminalInput};
pub use models::{
    Attempt, AttemptPhase, AttemptState, Feedback, Question, QuestionSet, SessionPhase,
    Transition, UiEvent,
};
pub use question_bank::QuestionBank;
pub use session::QuizSession;
pub use ui::draw;
