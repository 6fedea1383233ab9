// Error types shared by the data-access layer and the interactive prompts.

use thiserror::Error;

/// Failures raised by a [`crate::dao::CountryDao`] implementation.
#[derive(Error, Debug)]
pub enum DaoError {
    #[error("a country with code '{0}' already exists")]
    Duplicate(String),
    #[error("no country with code '{0}'")]
    NotFound(String),
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Outcome of a prompt or menu action that did not produce a value.
///
/// `Input` and `Storage` are reported to the user and the menu loop goes on.
/// `Stream` means the input can no longer be read and the session must end.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("{0}")]
    Input(String),
    #[error("Something went wrong with the stream: {0}")]
    Stream(#[from] std::io::Error),
    #[error("Something went wrong with the stream: end of input reached")]
    EndOfInput,
    #[error("{0}")]
    Storage(#[from] DaoError),
}

impl PromptError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, PromptError::Stream(_) | PromptError::EndOfInput)
    }
}
