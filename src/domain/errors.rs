// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the value model, its codecs and the configuration store.
//!
//! All errors use `thiserror`. Access-control rejections and coercion
//! fallbacks are deliberately absent: `set_attribute` reports a rejected
//! write as `false`, and `coerce_to` falls back to a type default.

use std::fmt;
use thiserror::Error;

/// The reason a text document failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A character that cannot start or continue the current production.
    UnexpectedCharacter(char),
    /// The input ended in the middle of a value.
    UnexpectedEnd,
    /// A backslash followed by something other than a known escape.
    InvalidEscape(char),
    /// `\u` not followed by four hex digits, or a code point that is not a scalar value.
    InvalidUnicodeEscape,
    /// A high surrogate not followed by a `\u` low surrogate, or a lone low surrogate.
    UnpairedSurrogate,
    /// Non-whitespace content after the top-level value.
    TrailingCharacters,
    /// The input was empty or only whitespace.
    EmptyDocument,
    /// A number token that could not be converted.
    InvalidNumber,
    /// Arrays and objects nested deeper than the parser allows.
    NestingTooDeep,
    /// A syntax error reported by a third-party format parser.
    Syntax(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {:?}", c),
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseErrorKind::InvalidEscape(c) => write!(f, "invalid escape '\\{}'", c),
            ParseErrorKind::InvalidUnicodeEscape => write!(f, "invalid unicode escape"),
            ParseErrorKind::UnpairedSurrogate => write!(f, "unpaired UTF-16 surrogate"),
            ParseErrorKind::TrailingCharacters => write!(f, "trailing characters after document"),
            ParseErrorKind::EmptyDocument => write!(f, "empty document"),
            ParseErrorKind::InvalidNumber => write!(f, "invalid number"),
            ParseErrorKind::NestingTooDeep => write!(f, "nesting too deep"),
            ParseErrorKind::Syntax(message) => f.write_str(message),
        }
    }
}

/// The main error type for value and configuration operations.
///
/// # Examples
///
/// ```
/// use valcfg::domain::errors::{ConfigError, ParseErrorKind};
///
/// let error = ConfigError::ParseError {
///     offset: 3,
///     kind: ParseErrorKind::UnexpectedEnd,
/// };
/// assert_eq!(error.to_string(), "Parse error at byte 3: unexpected end of input");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Malformed text at a byte offset.
    #[error("Parse error at byte {offset}: {kind}")]
    ParseError {
        /// Byte offset into the input where parsing stopped
        offset: usize,
        /// What went wrong
        kind: ParseErrorKind,
    },

    /// A document value was not an object where one is required.
    #[error("Schema error in '{path}': {message}")]
    SchemaError {
        /// The file or section that had the wrong shape
        path: String,
        /// The error message
        message: String,
    },

    /// A strict cast asked for a variant the value does not hold.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The requested type
        expected: &'static str,
        /// The variant actually stored
        found: &'static str,
    },

    /// Invalid UTF-16 or UTF-32 input to the unicode bridge.
    #[error("Invalid unicode: {message}")]
    UnicodeError {
        /// The error message
        message: String,
    },

    /// A value could not be represented in the binary format.
    #[error("Failed to encode value: {message}")]
    EncodeError {
        /// The error message
        message: String,
    },

    /// The image display parameters could not be derived from the attributes.
    #[error("Failed to derive image configuration: {message}")]
    ImageConfigError {
        /// The error message
        message: String,
    },

    /// An I/O error occurred while reading or writing a backing file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `ParseError` at the given offset.
    pub fn parse(offset: usize, kind: ParseErrorKind) -> Self {
        ConfigError::ParseError { offset, kind }
    }

    /// Creates a `SchemaError` for the given path.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::SchemaError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A specialized Result type for value and configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
