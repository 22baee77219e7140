mod bank;
mod ids;
mod project;
mod question;
mod summary;
mod theme;

pub use bank::{BankError, QuestionBank};
pub use ids::{ModalId, TargetId};
pub use project::{ProjectCard, ProjectFilter};
pub use question::{Question, QuestionDraft, QuestionError};
pub use summary::{QuizSummary, SummaryError};
pub use theme::{THEME_PREFERENCE_KEY, Theme, ThemeParseError};
