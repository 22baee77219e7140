mod loader;
mod progress;
mod service;
mod session;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use loader::{load_bank_json, shuffled_bank};
pub use progress::QuizProgress;
pub use service::{AdvanceResult, AnswerFeedback, ControlPress, IgnoreReason, Outcome, QuizService, QuizState};
pub use session::QuizSession;
pub use view::{ControlView, Feedback, FeedbackTone, OptionMarker, OptionView, QuizView};
