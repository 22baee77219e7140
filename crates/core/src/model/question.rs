use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in a bank definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
    pub explanation: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        answer: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer,
            explanation: explanation.into(),
        }
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, if fewer than
    /// two options are given, or if the answer index is out of range.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = self.question.trim();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.options.len() < Question::MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }

        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        if self.answer >= self.options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                answer: self.answer,
                len: self.options.len(),
            });
        }

        Ok(Question {
            prompt: prompt.to_owned(),
            options: self.options,
            correct: self.answer,
            explanation: self.explanation.trim().to_owned(),
        })
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    explanation: String,
}

impl Question {
    pub const MIN_OPTIONS: usize = 2;

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct
    }

    /// Convert back into a draft, e.g. for export.
    #[must_use]
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            question: self.prompt.clone(),
            options: self.options.clone(),
            answer: self.correct,
            explanation: self.explanation.clone(),
        }
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("answer index {answer} is out of range for {len} options")]
    AnswerOutOfRange { answer: usize, len: usize },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft::new(
            "What is the SI unit of force?",
            ["Joule", "Watt", "Newton", "Pascal"],
            2,
            "The Newton (N) is the SI unit of force.",
        )
    }

    #[test]
    fn valid_draft_validates() {
        let question = draft().validate().unwrap();
        assert_eq!(question.prompt(), "What is the SI unit of force?");
        assert_eq!(question.option_count(), 4);
        assert_eq!(question.correct_index(), 2);
        assert!(question.is_correct(2));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let mut d = draft();
        d.question = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn single_option_is_rejected() {
        let d = QuestionDraft::new("Q", ["only"], 0, "");
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::TooFewOptions { len: 1 }
        );
    }

    #[test]
    fn blank_option_is_rejected() {
        let d = QuestionDraft::new("Q", ["a", " "], 0, "");
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::EmptyOption { index: 1 }
        );
    }

    #[test]
    fn answer_must_point_at_an_option() {
        let mut d = draft();
        d.answer = 4;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::AnswerOutOfRange { answer: 4, len: 4 }
        );
    }

    #[test]
    fn draft_deserializes_from_site_json_shape() {
        let json = r#"{
            "question": "What does HTML stand for?",
            "options": ["Hyper Text Markup Language", "High Tech Modern Language"],
            "answer": 0,
            "explanation": "HTML stands for Hyper Text Markup Language."
        }"#;
        let d: QuestionDraft = serde_json::from_str(json).unwrap();
        let q = d.validate().unwrap();
        assert_eq!(q.options()[0], "Hyper Text Markup Language");
        assert_eq!(q.to_draft().answer, 0);
    }
}
