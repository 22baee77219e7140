mod driver;
mod engine;
mod observer;

// Public API of the viewport animation subsystem.
pub use crate::error::AnimationError;
pub use driver::run_until_settled;
pub use engine::{AnimationEngine, EngineConfig, Frame, TargetStatus};
pub use observer::{GeometryObserver, ManualObserver, VisibilityEvent, VisibilityObserver};
