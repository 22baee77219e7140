use thiserror::Error;

use crate::model::{BankError, QuestionError, SummaryError, ThemeParseError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Theme(#[from] ThemeParseError),
}
