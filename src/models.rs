use crate::config::OPTIONS_PER_QUESTION;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct: usize,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

/// The full pool of questions. Cloning shares the same read-only storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Arc<[Question]>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn contains(&self, question: &Question) -> bool {
        self.questions.iter().any(|q| q == question)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    Attempt1Active,
    Attempt2Active,
    /// An answer was accepted; feedback is showing until `advance_at`.
    Resolved { advance_at: Instant },
    /// The second window ran out without a correct answer.
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptState {
    pub attempt: Attempt,
    pub phase: AttemptPhase,
    /// May lie in the future while retry feedback is still on screen.
    pub window_start: Instant,
    pub window_duration: Duration,
}

impl AttemptState {
    pub fn first(now: Instant, base_time: Duration) -> Self {
        Self {
            attempt: Attempt::First,
            phase: AttemptPhase::Attempt1Active,
            window_start: now,
            window_duration: base_time,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            AttemptPhase::Attempt1Active | AttemptPhase::Attempt2Active
        )
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.window_start)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.window_duration.saturating_sub(self.elapsed(now))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.window_duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    CorrectFirstAttempt,
    CorrectSecondAttempt,
    WrongRetry,
    WrongFinal,
}

impl Feedback {
    pub fn message(&self, extra_time: Duration) -> String {
        match self {
            Feedback::CorrectFirstAttempt => "Correct! First attempt.".to_string(),
            Feedback::CorrectSecondAttempt => "Correct! Second attempt.".to_string(),
            Feedback::WrongRetry => format!(
                "Wrong answer. You have {} more seconds to try again!",
                extra_time.as_secs()
            ),
            Feedback::WrongFinal => "Wrong answer. Moving to the next question.".to_string(),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Feedback::CorrectFirstAttempt => "correct-first-attempt",
            Feedback::CorrectSecondAttempt => "correct-second-attempt",
            Feedback::WrongRetry => "wrong-retry",
            Feedback::WrongFinal => "wrong-final",
        }
    }
}

/// What a call to `QuizSession::tick` changed, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First window ran out; a second window was granted without feedback.
    SilentRetry,
    /// Second window ran out and the question was skipped.
    TimedOut { next: usize },
    /// A resolved question's feedback delay ended.
    NextQuestion { next: usize },
    RoundOver { score: u32 },
}

/// Discrete events the host loop feeds into the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    PointerDown { x: u16, y: u16 },
}
