use folio_core::model::{QuestionBank, QuestionDraft};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuizError;

/// Parse a question bank from the JSON array format used by the site:
/// `[{"question": .., "options": [..], "answer": 0, "explanation": ..}, ..]`.
///
/// # Errors
///
/// Returns `QuizError::Json` for malformed JSON and `QuizError::Bank` if a
/// question fails validation.
pub fn load_bank_json(raw: &str) -> Result<QuestionBank, QuizError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(raw)?;
    let bank = QuestionBank::from_drafts(drafts)?;
    tracing::debug!(questions = bank.len(), "question bank loaded");
    Ok(bank)
}

/// Return the bank with its questions in a random order.
#[must_use]
pub fn shuffled_bank<R: Rng + ?Sized>(bank: QuestionBank, rng: &mut R) -> QuestionBank {
    bank.reordered(|questions| questions.shuffle(rng))
}
