use chrono::{DateTime, Utc};

/// Mutable state of one pass through the question bank.
///
/// Owned by `QuizService`; a restart replaces it with a fresh value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    index: usize,
    score: usize,
    answered: Vec<bool>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    #[must_use]
    pub fn new(len: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            index: 0,
            score: 0,
            answered: vec![false; len],
            started_at,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answered.is_empty()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.answered.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered.iter().filter(|a| **a).count()
    }

    pub(crate) fn jump_to(&mut self, index: usize) {
        self.index = index.min(self.len());
    }

    /// Record an answer for the current question.
    ///
    /// Only the first answer for a question can score. Returns `true` if the
    /// score changed.
    pub(crate) fn record_answer(&mut self, correct: bool) -> bool {
        let Some(flag) = self.answered.get_mut(self.index) else {
            return false;
        };
        let first = !*flag;
        *flag = true;
        if first && correct {
            self.score += 1;
            return true;
        }
        false
    }

    /// Move past the current question. Returns `true` if another question remains.
    pub(crate) fn step(&mut self) -> bool {
        self.index = (self.index + 1).min(self.len());
        self.index < self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::time::fixed_now;

    #[test]
    fn only_first_correct_answer_scores() {
        let mut session = QuizSession::new(3, fixed_now());
        assert!(session.record_answer(true));
        assert!(!session.record_answer(true));
        assert_eq!(session.score(), 1);
        assert!(session.is_answered(0));
        assert!(!session.is_answered(1));
    }

    #[test]
    fn step_stops_at_len() {
        let mut session = QuizSession::new(2, fixed_now());
        assert!(session.step());
        assert!(!session.step());
        assert_eq!(session.index(), 2);
        assert!(!session.step());
        assert_eq!(session.index(), 2);
        assert!(!session.record_answer(true));
    }
}
