use crate::config::QuizConfig;
use crate::error::Result;
use crate::logger;
use crate::models::{
    Attempt, AttemptPhase, AttemptState, Feedback, Question, SessionPhase, Transition,
};
use crate::question_bank::QuestionBank;
use rand::Rng;
use std::time::{Duration, Instant};

/// Feedback on screen, visible until `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShownFeedback {
    pub feedback: Feedback,
    pub until: Instant,
}

/// One round of the quiz and the per-question timing/attempt state machine.
///
/// Nothing in here sleeps. Delays are stored as instants and checked on the
/// next `tick`.
#[derive(Debug)]
pub struct QuizSession {
    config: QuizConfig,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    phase: SessionPhase,
    attempt: AttemptState,
    feedback: Option<ShownFeedback>,
}

impl QuizSession {
    pub fn new(config: QuizConfig, now: Instant) -> Self {
        let attempt = AttemptState::first(now, config.base_time);
        Self {
            config,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            phase: SessionPhase::NotStarted,
            attempt,
            feedback: None,
        }
    }

    /// Samples a fresh round from `bank`. Returns `Ok(false)` if a round is
    /// already in progress.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
        now: Instant,
    ) -> Result<bool> {
        if self.phase == SessionPhase::InProgress {
            return Ok(false);
        }
        let questions = bank.sample(self.config.questions_per_round, rng)?;
        self.begin(questions, now);
        Ok(true)
    }

    /// Starts a round over an already chosen question list.
    pub fn begin(&mut self, questions: Vec<Question>, now: Instant) {
        logger::log(&format!("Round started with {} questions", questions.len()));
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        if self.questions.is_empty() {
            self.phase = SessionPhase::Over;
            return;
        }
        self.phase = SessionPhase::InProgress;
        self.enter_question(now);
    }

    fn enter_question(&mut self, now: Instant) {
        self.attempt = AttemptState::first(now, self.config.base_time);
        self.feedback = None;
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn attempt(&self) -> &AttemptState {
        &self.attempt
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.questions.get(self.current_index)
    }

    /// Whole seconds left in the current window, floored.
    pub fn time_left(&self, now: Instant) -> u64 {
        self.attempt.remaining(now).as_secs()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback.map(|shown| shown.feedback)
    }

    /// The feedback message still due on screen at `now`.
    pub fn visible_feedback(&self, now: Instant) -> Option<Feedback> {
        self.feedback
            .filter(|shown| now < shown.until)
            .map(|shown| shown.feedback)
    }

    /// True while the retry message is up and the extra window has not begun.
    pub fn retry_pending(&self, now: Instant) -> bool {
        self.attempt.phase == AttemptPhase::Attempt2Active && now < self.attempt.window_start
    }

    /// Applies the time-driven transitions for `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Transition> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }

        let phase = self.attempt.phase;
        match phase {
            AttemptPhase::Attempt1Active if self.attempt.is_expired(now) => {
                self.attempt = AttemptState {
                    attempt: Attempt::Second,
                    phase: AttemptPhase::Attempt2Active,
                    window_start: now,
                    window_duration: self.config.extra_time,
                };
                logger::log(&format!(
                    "Question {} timed out on first attempt, granting extra time",
                    self.current_index + 1
                ));
                Some(Transition::SilentRetry)
            }
            AttemptPhase::Attempt2Active if self.attempt.is_expired(now) => {
                self.attempt.phase = AttemptPhase::Advanced;
                logger::log(&format!(
                    "Question {} timed out on second attempt",
                    self.current_index + 1
                ));
                Some(match self.advance(now) {
                    Transition::NextQuestion { next } => Transition::TimedOut { next },
                    other => other,
                })
            }
            AttemptPhase::Resolved { advance_at } if now >= advance_at => Some(self.advance(now)),
            AttemptPhase::Advanced => Some(self.advance(now)),
            _ => None,
        }
    }

    /// Submits `option` for the current question. Returns `None` when the
    /// submission was ignored.
    pub fn submit(&mut self, option: usize, now: Instant) -> Option<Feedback> {
        // A click that lands after the window closed belongs to the timeout,
        // not to the question it was aimed at.
        if self.phase == SessionPhase::InProgress
            && self.attempt.is_active()
            && self.attempt.is_expired(now)
        {
            self.tick(now);
            return None;
        }
        if self.phase != SessionPhase::InProgress
            || !self.attempt.is_active()
            || self.retry_pending(now)
        {
            return None;
        }
        let question = self.questions.get(self.current_index)?;
        let correct = question.is_correct(option);

        let feedback = match (correct, self.attempt.attempt) {
            (true, attempt) => {
                self.score += self.config.points_per_correct;
                self.resolve(now, self.config.correct_delay);
                if attempt == Attempt::First {
                    Feedback::CorrectFirstAttempt
                } else {
                    Feedback::CorrectSecondAttempt
                }
            }
            (false, Attempt::First) => {
                let window_start = now + self.config.retry_delay;
                self.attempt = AttemptState {
                    attempt: Attempt::Second,
                    phase: AttemptPhase::Attempt2Active,
                    window_start,
                    window_duration: self.config.extra_time,
                };
                Feedback::WrongRetry
            }
            (false, Attempt::Second) => {
                self.resolve(now, self.config.final_delay);
                Feedback::WrongFinal
            }
        };

        let until = match self.attempt.phase {
            AttemptPhase::Resolved { advance_at } => advance_at,
            _ => self.attempt.window_start,
        };
        self.feedback = Some(ShownFeedback { feedback, until });

        logger::log(&format!(
            "Question {}: option {} -> {} (score {})",
            self.current_index + 1,
            option.saturating_add(1),
            feedback.tag(),
            self.score
        ));
        Some(feedback)
    }

    fn resolve(&mut self, now: Instant, delay: Duration) {
        self.attempt.phase = AttemptPhase::Resolved {
            advance_at: now + delay,
        };
    }

    fn advance(&mut self, now: Instant) -> Transition {
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.phase = SessionPhase::Over;
            self.feedback = None;
            logger::log(&format!("Round over, final score {}", self.score));
            Transition::RoundOver { score: self.score }
        } else {
            self.enter_question(now);
            Transition::NextQuestion {
                next: self.current_index,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn question(i: usize, correct: usize) -> Question {
        Question {
            prompt: format!("Question {}?", i),
            options: [
                format!("a{}", i),
                format!("b{}", i),
                format!("c{}", i),
                format!("d{}", i),
            ],
            correct,
        }
    }

    fn questions(count: usize) -> Vec<Question> {
        (0..count).map(|i| question(i, i % 4)).collect()
    }

    fn started_session(count: usize, t0: Instant) -> QuizSession {
        let mut session = QuizSession::new(QuizConfig::default(), t0);
        session.begin(questions(count), t0);
        session
    }

    fn wrong_option(session: &QuizSession) -> usize {
        (session.current_question().unwrap().correct + 1) % 4
    }

    fn correct_option(session: &QuizSession) -> usize {
        session.current_question().unwrap().correct
    }

    #[test]
    fn test_new_session_not_started() {
        let t0 = Instant::now();
        let mut session = QuizSession::new(QuizConfig::default(), t0);
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.current_question().is_none());
        assert_eq!(session.submit(0, t0), None);
        assert_eq!(session.tick(t0 + secs(100)), None);
    }

    #[test]
    fn test_start_round_samples_from_bank() {
        let t0 = Instant::now();
        let json = format!(
            r#"{{"questions": [{}]}}"#,
            (0..15)
                .map(|i| format!(
                    r#"{{"question": "Q{i}", "options": ["a", "b", "c", "d"], "correct": 2}}"#
                ))
                .collect::<Vec<_>>()
                .join(",")
        );
        let bank = QuestionBank::from_json(&json).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = QuizSession::new(QuizConfig::default(), t0);

        assert!(session.start_round(&bank, &mut rng, t0).unwrap());
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.total_questions(), 10);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt1Active);

        // already running
        assert!(!session.start_round(&bank, &mut rng, t0).unwrap());
    }

    #[test]
    fn test_start_round_insufficient_questions() {
        let t0 = Instant::now();
        let bank = QuestionBank::new(crate::models::QuestionSet::new(questions(4)));
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = QuizSession::new(QuizConfig::default(), t0);
        assert!(session.start_round(&bank, &mut rng, t0).is_err());
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_tick_before_base_time_keeps_first_attempt() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        assert_eq!(session.time_left(t0), 15);
        assert_eq!(session.tick(t0 + secs(14)), None);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt1Active);
        assert_eq!(session.time_left(t0 + secs(14)), 1);
        assert_eq!(session.time_left(t0 + Duration::from_millis(14_500)), 0);
    }

    #[test]
    fn test_tick_at_base_time_grants_silent_retry() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let t1 = t0 + secs(15);

        assert_eq!(session.tick(t1), Some(Transition::SilentRetry));
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt2Active);
        assert_eq!(session.attempt().attempt, Attempt::Second);
        assert_eq!(session.attempt().window_start, t1);
        assert_eq!(session.attempt().window_duration, secs(10));
        assert_eq!(session.time_left(t1), 10);
        assert_eq!(session.feedback(), None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_second_window_timeout_advances_without_points() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        session.tick(t0 + secs(15));

        assert_eq!(session.tick(t0 + secs(24)), None);
        assert_eq!(
            session.tick(t0 + secs(25)),
            Some(Transition::TimedOut { next: 1 })
        );
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt1Active);
        assert_eq!(session.attempt().window_start, t0 + secs(25));
        assert_eq!(session.time_left(t0 + secs(25)), 15);
    }

    #[test]
    fn test_correct_first_attempt() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let t1 = t0 + secs(3);
        let answer = correct_option(&session);

        assert_eq!(
            session.submit(answer, t1),
            Some(Feedback::CorrectFirstAttempt)
        );
        assert_eq!(session.score(), 10);
        assert_eq!(
            session.attempt().phase,
            AttemptPhase::Resolved {
                advance_at: t1 + secs(1)
            }
        );
        assert_eq!(session.visible_feedback(t1), Some(Feedback::CorrectFirstAttempt));
    }

    #[test]
    fn test_resolved_advances_after_delay() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let answer = correct_option(&session);
        session.submit(answer, t0);

        assert_eq!(session.tick(t0 + Duration::from_millis(999)), None);
        assert_eq!(session.current_index(), 0);
        assert_eq!(
            session.tick(t0 + secs(1)),
            Some(Transition::NextQuestion { next: 1 })
        );
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.feedback(), None);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt1Active);
        assert_eq!(session.time_left(t0 + secs(1)), 15);
    }

    #[test]
    fn test_submit_while_resolved_is_noop() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let answer = correct_option(&session);
        session.submit(answer, t0);

        assert_eq!(session.submit(answer, t0), None);
        assert_eq!(session.submit(wrong_option(&session), t0), None);
        assert_eq!(session.score(), 10);
        assert_eq!(session.feedback(), Some(Feedback::CorrectFirstAttempt));
    }

    #[test]
    fn test_wrong_first_attempt_grants_fresh_extra_window() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        // only one second left of the first window
        let t1 = t0 + secs(14);
        let wrong = wrong_option(&session);

        assert_eq!(session.submit(wrong, t1), Some(Feedback::WrongRetry));
        assert_eq!(session.score(), 0);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt2Active);
        assert_eq!(session.attempt().window_duration, secs(10));
        // retry window starts once the message has been shown
        assert_eq!(session.attempt().window_start, t1 + secs(2));
        assert_eq!(session.time_left(t1), 10);
        assert_eq!(session.time_left(t1 + secs(2)), 10);
        assert_eq!(session.time_left(t1 + secs(3)), 9);

        assert_eq!(session.tick(t1 + secs(11)), None);
        assert_eq!(
            session.tick(t1 + secs(12)),
            Some(Transition::TimedOut { next: 1 })
        );
    }

    #[test]
    fn test_wrong_first_attempt_early_still_gets_full_extra_window() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let wrong = wrong_option(&session);
        session.submit(wrong, t0 + secs(1));
        assert_eq!(session.attempt().window_duration, secs(10));
        assert_eq!(session.time_left(t0 + secs(3)), 10);
    }

    #[test]
    fn test_retry_feedback_visible_until_window_starts() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let wrong = wrong_option(&session);
        session.submit(wrong, t0);

        assert!(session.retry_pending(t0 + secs(1)));
        assert_eq!(
            session.visible_feedback(t0 + secs(1)),
            Some(Feedback::WrongRetry)
        );
        assert!(!session.retry_pending(t0 + secs(2)));
        assert_eq!(session.visible_feedback(t0 + secs(2)), None);
    }

    #[test]
    fn test_submit_ignored_while_retry_message_showing() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let wrong = wrong_option(&session);
        let answer = correct_option(&session);
        session.submit(wrong, t0);

        assert_eq!(session.submit(answer, t0 + secs(1)), None);
        assert_eq!(session.score(), 0);
        assert_eq!(
            session.submit(answer, t0 + secs(2)),
            Some(Feedback::CorrectSecondAttempt)
        );
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_wrong_second_attempt_resolves_without_points() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let wrong = wrong_option(&session);
        session.submit(wrong, t0);
        let t1 = t0 + secs(5);

        assert_eq!(session.submit(wrong, t1), Some(Feedback::WrongFinal));
        assert_eq!(session.score(), 0);
        assert_eq!(
            session.attempt().phase,
            AttemptPhase::Resolved {
                advance_at: t1 + secs(1)
            }
        );
        assert_eq!(
            session.tick(t1 + secs(1)),
            Some(Transition::NextQuestion { next: 1 })
        );
    }

    #[test]
    fn test_correct_after_silent_retry() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        session.tick(t0 + secs(15));
        let answer = correct_option(&session);

        // no delay on the silent path; the second window is live immediately
        assert_eq!(
            session.submit(answer, t0 + secs(15)),
            Some(Feedback::CorrectSecondAttempt)
        );
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_out_of_range_option_is_wrong() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        assert_eq!(session.submit(17, t0), Some(Feedback::WrongRetry));
        assert_eq!(session.submit(17, t0 + secs(2)), Some(Feedback::WrongFinal));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_full_round_ends_over() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let mut now = t0;

        for i in 0..10 {
            let answer = correct_option(&session);
            assert_eq!(session.submit(answer, now), Some(Feedback::CorrectFirstAttempt));
            now += secs(1);
            let transition = session.tick(now);
            if i < 9 {
                assert_eq!(transition, Some(Transition::NextQuestion { next: i + 1 }));
            } else {
                assert_eq!(transition, Some(Transition::RoundOver { score: 100 }));
            }
        }

        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(session.score(), 100);
        assert!(session.current_question().is_none());

        assert_eq!(session.submit(0, now), None);
        assert_eq!(session.tick(now + secs(60)), None);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn test_round_of_timeouts_scores_zero() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let mut now = t0;
        for _ in 0..10 {
            now += secs(15);
            assert_eq!(session.tick(now), Some(Transition::SilentRetry));
            now += secs(10);
            assert!(session.tick(now).is_some());
        }
        assert_eq!(session.phase(), SessionPhase::Over);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_mixed_round_scoring() {
        let t0 = Instant::now();
        let mut session = started_session(3, t0);

        // first question: wrong then right
        let wrong = wrong_option(&session);
        let answer = correct_option(&session);
        session.submit(wrong, t0);
        session.submit(answer, t0 + secs(2));
        session.tick(t0 + secs(3));

        // second question: wrong twice
        let wrong = wrong_option(&session);
        session.submit(wrong, t0 + secs(3));
        session.submit(wrong, t0 + secs(5));
        session.tick(t0 + secs(6));

        // third question: right first time
        let answer = correct_option(&session);
        session.submit(answer, t0 + secs(6));
        assert_eq!(
            session.tick(t0 + secs(7)),
            Some(Transition::RoundOver { score: 20 })
        );
    }

    #[test]
    fn test_restart_after_over_resets_state() {
        let t0 = Instant::now();
        let mut session = started_session(1, t0);
        let answer = correct_option(&session);
        session.submit(answer, t0);
        session.tick(t0 + secs(1));
        assert_eq!(session.phase(), SessionPhase::Over);

        let bank = QuestionBank::new(crate::models::QuestionSet::new(questions(12)));
        let mut rng = StdRng::seed_from_u64(5);
        let t1 = t0 + secs(30);
        assert!(session.start_round(&bank, &mut rng, t1).unwrap());
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.total_questions(), 10);
        assert_eq!(session.attempt().window_start, t1);
    }

    #[test]
    fn test_empty_round_is_immediately_over() {
        let t0 = Instant::now();
        let mut session = QuizSession::new(QuizConfig::default(), t0);
        session.begin(Vec::new(), t0);
        assert_eq!(session.phase(), SessionPhase::Over);
    }

    #[test]
    fn test_late_answer_after_second_window_scores_nothing() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        session.tick(t0 + secs(15));
        session.tick(t0 + Duration::from_millis(24_950));
        let answer = correct_option(&session);

        assert_eq!(session.submit(answer, t0 + Duration::from_millis(25_050)), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt1Active);
        assert_eq!(session.feedback(), None);
    }

    #[test]
    fn test_late_wrong_answer_after_first_window_takes_silent_retry() {
        let t0 = Instant::now();
        let mut session = started_session(10, t0);
        let wrong = wrong_option(&session);
        let late = t0 + Duration::from_millis(15_050);

        assert_eq!(session.submit(wrong, late), None);
        assert_eq!(session.attempt().phase, AttemptPhase::Attempt2Active);
        assert_eq!(session.attempt().window_start, late);
        assert_eq!(session.attempt().window_duration, secs(10));
        assert_eq!(session.feedback(), None);
        assert_eq!(session.score(), 0);
    }
}
