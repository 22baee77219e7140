#![forbid(unsafe_code)]

pub mod animation;
pub mod error;
pub mod quiz;
pub mod site;
pub mod theme_service;

pub use folio_core::Clock;

pub use error::{AnimationError, QuizError, ThemeServiceError};
pub use animation::{AnimationEngine, EngineConfig, Frame, ManualObserver, VisibilityObserver};
pub use quiz::{Outcome, QuizService, QuizState, QuizView};
pub use theme_service::ThemeService;
