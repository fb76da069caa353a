use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("malformed question data{}: {reason}", question_suffix(.index))]
    MalformedData { index: Option<usize>, reason: String },
    #[error("not enough questions: need {requested}, only {available} available")]
    InsufficientQuestions { available: usize, requested: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuizError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        QuizError::MalformedData {
            index: Some(index),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::MalformedData {
            index: None,
            reason: err.to_string(),
        }
    }
}

fn question_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" (question {})", i + 1),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
