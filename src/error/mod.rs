//! Error handling and diagnostics for the Base language
//!
//! Lexing and parsing stop at the first fatal condition. Both stages report
//! through [`BaseError`]; non-fatal lexer conditions are collected as
//! [`LexWarning`]s instead.

use std::fmt;

use thiserror::Error;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for Base front-end operations
pub type BaseResult<T> = Result<T, BaseError>;

/// A fatal lexer or parser error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaseError {
    /// Lexical analysis error
    #[error("Lexer error: {message} at line {line}")]
    Lex { message: String, line: usize },

    /// Parsing error
    #[error("Parse error at line {line}: {message}")]
    Parse { message: String, line: usize },
}

impl BaseError {
    /// Create a new lexer error
    pub fn lex_error(message: impl Into<String>, line: usize) -> Self {
        Self::Lex {
            message: message.into(),
            line,
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::Lex { .. } => "Lexer error",
            Self::Parse { .. } => "Parse error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::Lex { message, .. } | Self::Parse { message, .. } => message,
        }
    }

    /// Line the error was raised on (1-based).
    pub fn line(&self) -> usize {
        match self {
            Self::Lex { line, .. } | Self::Parse { line, .. } => *line,
        }
    }
}

/// A non-fatal lexer condition. The token it was raised for is still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexWarning {
    pub message: String,
    pub line: usize,
}

impl LexWarning {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for LexWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexer warning: {} at line {}", self.message, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BaseError::lex_error("Unterminated string", 3);

        assert_eq!(err.kind(), "Lexer error");
        assert_eq!(err.message(), "Unterminated string");
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_error_display() {
        let err = BaseError::parse_error("Expected ';' after expression", 5);
        assert_eq!(
            err.to_string(),
            "Parse error at line 5: Expected ';' after expression"
        );

        let err = BaseError::lex_error("Unterminated block comment", 2);
        assert_eq!(
            err.to_string(),
            "Lexer error: Unterminated block comment at line 2"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = LexWarning::new("Unknown escape sequence \\q", 7);
        assert_eq!(
            warning.to_string(),
            "Lexer warning: Unknown escape sequence \\q at line 7"
        );
    }
}
