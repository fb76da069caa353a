use std::path::PathBuf;
use std::time::Duration;

pub const GAME_TITLE: &str = "Quiz Game About Proteins";
pub const DEFAULT_QUESTIONS_FILE: &str = "questions.json";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

pub const BASE_TIME: Duration = Duration::from_secs(15);
pub const EXTRA_TIME: Duration = Duration::from_secs(10);
pub const QUESTIONS_PER_ROUND: usize = 10;
pub const POINTS_PER_CORRECT: u32 = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Tunables for a quiz round. Everything is compiled in; there are no flags
/// or environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub title: String,
    pub questions_path: PathBuf,
    pub log_path: PathBuf,
    pub questions_per_round: usize,
    pub points_per_correct: u32,
    /// Window for the first attempt at a question.
    pub base_time: Duration,
    /// Window for the second attempt, granted after a miss or a timeout.
    pub extra_time: Duration,
    /// How long "correct" feedback stays up before the next question.
    pub correct_delay: Duration,
    /// How long the retry message stays up before the extra window starts.
    pub retry_delay: Duration,
    /// How long the final "wrong" message stays up before moving on.
    pub final_delay: Duration,
    /// Upper bound on how long the host loop waits for input per frame.
    pub poll_interval: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            title: GAME_TITLE.to_string(),
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            questions_per_round: QUESTIONS_PER_ROUND,
            points_per_correct: POINTS_PER_CORRECT,
            base_time: BASE_TIME,
            extra_time: EXTRA_TIME,
            correct_delay: Duration::from_secs(1),
            retry_delay: Duration::from_secs(2),
            final_delay: Duration::from_secs(1),
            poll_interval: Duration::from_millis(100),
        }
    }
}
