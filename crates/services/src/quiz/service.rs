use std::fmt;
use std::sync::Arc;

use folio_core::Clock;
use folio_core::model::{QuestionBank, QuizSummary};

use super::progress::QuizProgress;
use super::session::QuizSession;
use super::view::{Feedback, FeedbackTone, QuizView};

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Unanswered,
    Answered,
    Completed,
}

/// Why an operation left the quiz untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    QuestionOutOfRange { index: usize, len: usize },
    OptionOutOfRange { selected: usize, slots: usize },
    WrongState { state: QuizState },
}

/// Result of a quiz operation: applied, or a harmless no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Applied(T),
    Ignored(IgnoreReason),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Ignored(_) => None,
        }
    }
}

/// What the player learns after picking an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub scored: bool,
    pub score: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceResult {
    NextQuestion { index: usize },
    Completed(QuizSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlPress {
    Advanced(AdvanceResult),
    Restarted,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Quiz state machine over a fixed question bank.
///
/// Every operation is a pure state transition; the resulting [`QuizView`] is
/// what an adapter copies onto the page.
pub struct QuizService {
    bank: Arc<QuestionBank>,
    clock: Clock,
    session: QuizSession,
    state: QuizState,
    view: QuizView,
    summary: Option<QuizSummary>,
}

impl QuizService {
    /// Start a session and show the first question.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, clock: Clock) -> Self {
        let session = QuizSession::new(bank.len(), clock.now());
        let view = QuizView::blank(bank.option_slots(), bank.len());
        let mut service = Self {
            bank,
            clock,
            session,
            state: QuizState::Unanswered,
            view,
            summary: None,
        };
        let _ = service.load_question(0);
        service
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn view(&self) -> &QuizView {
        &self.view
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.session.score()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.session.index()
    }

    /// Summary of the last completed run, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            index: self.session.index(),
            total: self.bank.len(),
            score: self.session.score(),
            answered: self.session.answered_count(),
            state: self.state,
        }
    }

    /// Display question `index` with every option enabled and unmarked.
    ///
    /// Out-of-range indices are ignored.
    pub fn load_question(&mut self, index: usize) -> Outcome<()> {
        let Some(question) = self.bank.get(index) else {
            return self.ignore(IgnoreReason::QuestionOutOfRange {
                index,
                len: self.bank.len(),
            });
        };
        self.session.jump_to(index);
        self.view.show_question(question);
        self.state = QuizState::Unanswered;
        Outcome::Applied(())
    }

    /// Lock in an answer for the current question.
    ///
    /// Only the first submission per displayed question is accepted; later
    /// clicks and out-of-range options are ignored.
    pub fn submit_answer(&mut self, selected: usize) -> Outcome<AnswerFeedback> {
        if self.state != QuizState::Unanswered {
            return self.ignore(IgnoreReason::WrongState { state: self.state });
        }
        let Some(question) = self.bank.get(self.session.index()) else {
            return self.ignore(IgnoreReason::QuestionOutOfRange {
                index: self.session.index(),
                len: self.bank.len(),
            });
        };
        if selected >= question.option_count() {
            return self.ignore(IgnoreReason::OptionOutOfRange {
                selected,
                slots: question.option_count(),
            });
        }

        let correct_index = question.correct_index();
        let is_correct = question.is_correct(selected);
        let (message, tone) = if is_correct {
            (
                format!("Correct! {}", question.explanation()),
                FeedbackTone::Affirmative,
            )
        } else {
            (
                format!("Not quite. {}", question.explanation()),
                FeedbackTone::Corrective,
            )
        };

        let scored = self.session.record_answer(is_correct);
        self.view.show_answer(
            selected,
            correct_index,
            Feedback {
                text: message.clone(),
                tone,
            },
        );
        self.view.score_text = self.session.score().to_string();
        self.state = QuizState::Answered;

        tracing::debug!(
            index = self.session.index(),
            selected,
            is_correct,
            score = self.session.score(),
            "quiz answer accepted"
        );

        Outcome::Applied(AnswerFeedback {
            selected,
            correct_index,
            is_correct,
            scored,
            score: self.session.score(),
            message,
        })
    }

    /// Move to the next question, or finish the quiz after the last one.
    pub fn advance(&mut self) -> Outcome<AdvanceResult> {
        if self.state != QuizState::Answered {
            return self.ignore(IgnoreReason::WrongState { state: self.state });
        }

        if self.session.step() {
            let index = self.session.index();
            let _ = self.load_question(index);
            return Outcome::Applied(AdvanceResult::NextQuestion { index });
        }

        let completed_at = self.clock.now();
        let summary = QuizSummary::new(
            self.session.score(),
            self.bank.len(),
            self.session.started_at(),
            completed_at.max(self.session.started_at()),
        );
        let summary = match summary {
            Ok(summary) => summary,
            Err(err) => {
                // Score and total come from the same session, so this is unreachable
                // unless the session was tampered with.
                tracing::error!(error = %err, "quiz summary rejected");
                return self.ignore(IgnoreReason::WrongState { state: self.state });
            }
        };

        self.view.show_completed(summary.message());
        self.state = QuizState::Completed;
        self.summary = Some(summary.clone());
        tracing::info!(
            score = summary.score(),
            total = summary.total(),
            "quiz completed"
        );
        Outcome::Applied(AdvanceResult::Completed(summary))
    }

    /// Start over from the first question with a fresh session.
    pub fn restart(&mut self) -> Outcome<()> {
        if self.state != QuizState::Completed {
            return self.ignore(IgnoreReason::WrongState { state: self.state });
        }
        self.session = QuizSession::new(self.bank.len(), self.clock.now());
        self.view.score_text = "0".into();
        for slot in &mut self.view.options {
            slot.visible = true;
        }
        let _ = self.load_question(0);
        tracing::debug!("quiz restarted");
        Outcome::Applied(())
    }

    /// The button below the quiz: "Next Question" while answering, "Restart
    /// Quiz" once completed.
    pub fn press_control(&mut self) -> Outcome<ControlPress> {
        match self.state {
            QuizState::Answered => match self.advance() {
                Outcome::Applied(result) => Outcome::Applied(ControlPress::Advanced(result)),
                Outcome::Ignored(reason) => Outcome::Ignored(reason),
            },
            QuizState::Completed => match self.restart() {
                Outcome::Applied(()) => Outcome::Applied(ControlPress::Restarted),
                Outcome::Ignored(reason) => Outcome::Ignored(reason),
            },
            QuizState::Unanswered => self.ignore(IgnoreReason::WrongState { state: self.state }),
        }
    }

    /// Replace the clock, e.g. to keep a fixed clock moving in tests.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    fn ignore<T>(&self, reason: IgnoreReason) -> Outcome<T> {
        tracing::debug!(?reason, state = ?self.state, "quiz operation ignored");
        Outcome::Ignored(reason)
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("questions", &self.bank.len())
            .field("index", &self.session.index())
            .field("score", &self.session.score())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
