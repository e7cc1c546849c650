//! Common error types for Priorify

use thiserror::Error;

/// Common result type for Priorify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Priorify crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Label is not part of the category universe
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
