//! Error types for the homework status bot.
//!
//! Every failure a polling cycle can hit maps to one [`BotError`] variant.
//! [`BotError::TokenNotFound`] and [`BotError::Config`] only arise at
//! startup and stop the process; the rest are logged by the scheduler and
//! the loop carries on.

use thiserror::Error;

/// Unified application error.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Required token is missing: {name}")]
    TokenNotFound { name: String },

    #[error("Config error: {message}")]
    Config { message: String },

    /// Transport failure, undecodable body, or a missing required key.
    #[error("Response API error: {message}")]
    ResponseApi { message: String },

    #[error("Unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    /// A value in the API response has the wrong JSON type.
    #[error("Unexpected type: {message}")]
    UnexpectedType { message: String },

    #[error("Homework status error: {message}")]
    HomeworkStatus { message: String },

    #[error("Failed to send message: {message}")]
    SendMessage { message: String },
}

impl BotError {
    pub fn token_not_found(name: impl Into<String>) -> Self {
        Self::TokenNotFound { name: name.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn response_api(message: impl Into<String>) -> Self {
        Self::ResponseApi { message: message.into() }
    }

    pub fn unexpected_type(message: impl Into<String>) -> Self {
        Self::UnexpectedType { message: message.into() }
    }

    pub fn homework_status(message: impl Into<String>) -> Self {
        Self::HomeworkStatus { message: message.into() }
    }

    pub fn send_message(message: impl Into<String>) -> Self {
        Self::SendMessage { message: message.into() }
    }
}

pub type BotResult<T> = Result<T, BotError>;
