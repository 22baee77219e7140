//! Shared error types for the services crate.

use thiserror::Error;

use folio_core::model::BankError;
use folio_core::model::TargetId;
use storage::repository::StorageError;

/// Errors emitted while building a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error("question bank is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors emitted while registering animation targets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnimationError {
    #[error("animation target {0} has no declared value; is the element missing?")]
    MissingTarget(TargetId),
    #[error("animation target {0} is already registered")]
    DuplicateTarget(TargetId),
}

/// Errors emitted by `ThemeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThemeServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
