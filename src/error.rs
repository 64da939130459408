//! Error types for Calculatrice

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// API error
    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Calculation error, recovered into a message on the result page
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// One of `a`, `b` or `op` was not supplied
    #[error("Missing parameters.")]
    MissingParameter,

    /// An operand did not parse as a finite number
    #[error("Invalid input: please enter valid numbers.")]
    InvalidNumber,

    /// `div` with a zero divisor
    #[error("Division by zero.")]
    DivisionByZero,

    /// Operator code outside add/sub/mul/div
    #[error("Invalid operation.")]
    InvalidOperation,

    /// Anything else
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
