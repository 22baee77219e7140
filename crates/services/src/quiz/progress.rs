use super::service::QuizState;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub answered: usize,
    pub state: QuizState,
}

impl QuizProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Completed
    }

    /// One-based position for "Question 2 of 5" style labels.
    #[must_use]
    pub fn position(&self) -> usize {
        (self.index + 1).min(self.total)
    }
}
