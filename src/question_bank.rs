use crate::config::OPTIONS_PER_QUESTION;
use crate::error::{QuizError, Result};
use crate::models::{Question, QuestionSet};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<RawQuestion>,
}

// Fields are optional so a missing one is reported against the question
// it belongs to rather than as a bare serde error.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: Option<String>,
    options: Option<Vec<String>>,
    correct: Option<i64>,
}

impl RawQuestion {
    fn validate(self, index: usize) -> Result<Question> {
        let prompt = match self.question {
            Some(prompt) if !prompt.trim().is_empty() => prompt,
            _ => return Err(QuizError::malformed(index, "missing question text")),
        };

        let options = self
            .options
            .ok_or_else(|| QuizError::malformed(index, "missing options"))?;
        let found = options.len();
        let options: [String; OPTIONS_PER_QUESTION] = options.try_into().map_err(|_| {
            QuizError::malformed(
                index,
                format!("expected {} options, found {}", OPTIONS_PER_QUESTION, found),
            )
        })?;

        let correct = self
            .correct
            .ok_or_else(|| QuizError::malformed(index, "missing correct answer index"))?;
        let correct = usize::try_from(correct)
            .ok()
            .filter(|&c| c < OPTIONS_PER_QUESTION)
            .ok_or_else(|| {
                QuizError::malformed(
                    index,
                    format!("correct answer index {} is outside 0..=3", correct),
                )
            })?;

        Ok(Question {
            prompt,
            options,
            correct,
        })
    }
}

/// The question pool, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    set: QuestionSet,
}

impl QuestionBank {
    pub fn new(set: QuestionSet) -> Self {
        Self { set }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: QuestionFile = serde_json::from_str(content)?;
        let questions = file
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.validate(index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(QuestionSet::new(questions)))
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.set
    }

    pub fn ensure_round_size(&self, n: usize) -> Result<()> {
        if self.set.len() < n {
            return Err(QuizError::InsufficientQuestions {
                available: self.set.len(),
                requested: n,
            });
        }
        Ok(())
    }

    /// Draws `n` distinct questions in random order.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Question>> {
        self.ensure_round_size(n)?;
        let mut picked: Vec<Question> = self
            .set
            .as_slice()
            .choose_multiple(rng, n)
            .cloned()
            .collect();
        picked.shuffle(rng);
        Ok(picked)
    }
}
