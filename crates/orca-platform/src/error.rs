//! WebCrypto Errors
//!
//! The fixed error taxonomy surfaced by crypto operations. Messages are
//! human-readable and never contain key material.

use std::fmt;

/// Error category, mirroring the DOM exception each maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    Type,
    NotSupported,
    Syntax,
    InvalidAccess,
    Data,
    Operation,
}

impl ErrorType {
    /// DOM-facing exception name
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Type => "TypeError",
            ErrorType::NotSupported => "NotSupportedError",
            ErrorType::Syntax => "SyntaxError",
            ErrorType::InvalidAccess => "InvalidAccessError",
            ErrorType::Data => "DataError",
            ErrorType::Operation => "OperationError",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A crypto operation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error_type}: {message}")]
pub struct Error {
    pub error_type: ErrorType,
    pub message: String,
}

impl Error {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Type, message)
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(ErrorType::NotSupported, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Syntax, message)
    }

    pub fn invalid_access(message: impl Into<String>) -> Self {
        Self::new(ErrorType::InvalidAccess, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Data, message)
    }

    pub fn operation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Operation, message)
    }
}

/// Result alias for crypto operations
pub type Result<T> = core::result::Result<T, Error>;
