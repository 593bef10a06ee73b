//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain refusals and add command and config concerns.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid command {input:?}: {message}")]
    InvalidCommand { input: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn invalid_command(input: &str, message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            input: input.to_string(),
            message: message.into(),
        }
    }

    /// True for an edit the core declined; the session is unchanged.
    pub fn is_refusal(&self) -> bool {
        matches!(self, ApplicationError::Domain(e) if e.is_refusal())
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
