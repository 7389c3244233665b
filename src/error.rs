//! Error types for TOML encoding and decoding.
//!
//! Every fallible operation in this crate returns [`Error`]. Errors are
//! grouped into two caller-facing categories (see [`ErrorCategory`]):
//!
//! - **ParseError**: the TOML text could not be parsed
//! - **InputObjectInvalid**: the value handed to the encoder cannot become a
//!   TOML document (most commonly because its root is not a table)
//!
//! Failures that the encoder recovers from on its own, like a property getter
//! that fails or a value that exceeds the depth budget, never surface here.
//!
//! Batch operations wrap errors in [`ItemError`], which also keeps the input
//! that failed so the caller can report it.
//!
//! ## Examples
//!
//! ```rust
//! use tomlconv::{decode, Error, ErrorCategory};
//!
//! let result = decode("name = [unterminated");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert_eq!(err.category(), ErrorCategory::ParseError);
//!     // Syntax errors carry line and column information
//!     assert!(matches!(err, Error::Syntax { line: 1, .. }));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while converting to or from TOML.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// TOML syntax error with the offending source line
    #[error("Syntax error at line {line}, column {col}:\n{context}\n{msg}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
    },

    /// The encoder root did not classify as a table
    #[error("Input object must be a dictionary like object, found {found}")]
    RootNotTable { found: &'static str },

    /// Unsupported type for conversion
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// The caller-facing classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// TOML text could not be parsed.
    ParseError,
    /// A value could not be encoded as a TOML document.
    InputObjectInvalid,
}

impl ErrorCategory {
    /// Returns the stable identifier for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::ParseError => "ParseError",
            ErrorCategory::InputObjectInvalid => "InputObjectInvalid",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token", "a = = 1");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a syntax error from a byte offset into `source`.
    ///
    /// Line and column are 1-based; the context is the full source line that
    /// contains the offset.
    pub fn syntax_at(source: &str, offset: usize, msg: &str) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let col = before[line_start..].chars().count() + 1;
        let context = source[line_start..].lines().next().unwrap_or_default();
        Error::syntax(line, col, msg.trim_end(), context)
    }

    /// Creates the error raised when an encoder root is not dictionary-like.
    pub fn root_not_table(found: &'static str) -> Self {
        Error::RootNotTable { found }
    }

    /// Creates an unsupported type error for values that cannot be converted.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the caller-facing category of this error.
    ///
    /// Only syntax errors are parse errors; everything else means the input
    /// handed to the encoder was unusable.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Syntax { .. } => ErrorCategory::ParseError,
            _ => ErrorCategory::InputObjectInvalid,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// A per-item failure from one of the batch operations.
///
/// `target` is the input that failed: the TOML text for decoding, the host
/// value for encoding.
#[derive(Debug, Clone, Error)]
#[error("{category}: {error}")]
pub struct ItemError<T> {
    pub category: ErrorCategory,
    #[source]
    pub error: Error,
    pub target: T,
}

impl<T> ItemError<T> {
    /// Wraps `error` with the given category and failing input.
    pub fn new(category: ErrorCategory, error: Error, target: T) -> Self {
        ItemError {
            category,
            error,
            target,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_at_first_line() {
        let err = Error::syntax_at("a = [", 4, "expected value");
        match err {
            Error::Syntax {
                line, col, context, ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(col, 5);
                assert_eq!(context, "a = [");
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_at_later_line() {
        let source = "a = 1\nb = = 2\nc = 3";
        let err = Error::syntax_at(source, 10, "unexpected '='");
        match err {
            Error::Syntax {
                line, col, context, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(col, 5);
                assert_eq!(context, "b = = 2");
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_at_clamps_offset() {
        let err = Error::syntax_at("x", 100, "eof");
        assert!(matches!(err, Error::Syntax { line: 1, col: 2, .. }));
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            Error::syntax(1, 1, "bad", "").category(),
            ErrorCategory::ParseError
        );
        assert_eq!(
            Error::root_not_table("array").category(),
            ErrorCategory::InputObjectInvalid
        );
        assert_eq!(
            Error::custom("x").category(),
            ErrorCategory::InputObjectInvalid
        );
        assert_eq!(ErrorCategory::ParseError.to_string(), "ParseError");
    }

    #[test]
    fn test_item_error_display() {
        let err = ItemError::new(
            ErrorCategory::InputObjectInvalid,
            Error::root_not_table("string"),
            "value".to_string(),
        );
        let text = err.to_string();
        assert!(text.starts_with("InputObjectInvalid: "));
        assert!(text.contains("dictionary like object"));
    }
}
