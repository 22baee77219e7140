use thiserror::Error;

use crate::model::question::{Question, QuestionDraft, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question {index}: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question {index} has {found} options, expected {expected}")]
    OptionCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Ordered, non-empty set of quiz questions.
///
/// Every question has the same number of options, matching the fixed row of
/// option buttons on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validate drafts into a bank, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` for no drafts, `BankError::InvalidQuestion` for the
    /// first draft that fails validation, and `BankError::OptionCountMismatch` if the
    /// option counts differ.
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, BankError> {
        let mut questions = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.into_iter().enumerate() {
            let question = draft
                .validate()
                .map_err(|source| BankError::InvalidQuestion { index, source })?;
            questions.push(question);
        }
        Self::from_questions(questions)
    }

    /// # Errors
    ///
    /// See [`QuestionBank::from_drafts`].
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        let Some(first) = questions.first() else {
            return Err(BankError::Empty);
        };
        let expected = first.option_count();
        if let Some((index, q)) = questions
            .iter()
            .enumerate()
            .find(|(_, q)| q.option_count() != expected)
        {
            return Err(BankError::OptionCountMismatch {
                index,
                expected,
                found: q.option_count(),
            });
        }
        Ok(Self { questions })
    }

    /// The five questions shipped with the portfolio page.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_drafts(builtin_drafts()).expect("built-in questions should be valid")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of option slots each question fills.
    #[must_use]
    pub fn option_slots(&self) -> usize {
        self.questions.first().map_or(0, Question::option_count)
    }

    /// Reorder the questions with the given permutation source.
    ///
    /// `shuffle` receives the question list and may reorder it in place; the
    /// bank's invariants hold for any permutation.
    #[must_use]
    pub fn reordered(mut self, shuffle: impl FnOnce(&mut [Question])) -> Self {
        shuffle(&mut self.questions);
        self
    }
}

fn builtin_drafts() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new(
            "What is the atomic number of Carbon?",
            ["6", "12", "14", "8"],
            0,
            "Carbon has 6 protons in its nucleus, giving it an atomic number of 6.",
        ),
        QuestionDraft::new(
            "Which element is essential for combustion?",
            ["Nitrogen", "Oxygen", "Hydrogen", "Carbon Dioxide"],
            1,
            "Oxygen supports combustion and is essential for fire to burn.",
        ),
        QuestionDraft::new(
            "What is the SI unit of force?",
            ["Joule", "Watt", "Newton", "Pascal"],
            2,
            "The Newton (N) is the SI unit of force, named after Sir Isaac Newton.",
        ),
        QuestionDraft::new(
            "Which programming language is primarily used for web development?",
            ["Python", "Java", "JavaScript", "C++"],
            2,
            "JavaScript is the primary language for interactive web development.",
        ),
        QuestionDraft::new(
            "What does HTML stand for?",
            [
                "Hyper Text Markup Language",
                "High Tech Modern Language",
                "Hyper Transfer Markup Language",
                "Home Tool Markup Language",
            ],
            0,
            "HTML stands for Hyper Text Markup Language, the standard for creating web pages.",
        ),
    ]
}
