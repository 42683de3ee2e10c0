//! The error taxonomy shared by every compilation stage.
//!
//! Every stage (lexer, parser, interpreter) raises a fatal error the
//! moment it hits a malformed construct; there is no recovery or partial
//! output. `WispError` is the single type that all three stages convert
//! their failures into on the way out to the driver, which prints it to
//! stderr and exits non-zero.

use thiserror::Error;

use crate::Span;

/// A single-line, fatal error from lexing, parsing, or evaluation.
///
/// All variants format as `"<kind>: <message> (<span>)"` so the driver
/// can print them directly without further formatting work.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WispError {
    /// An unrecognized character was encountered while scanning.
    #[error("LexError: {message} ({span})")]
    Lex { message: String, span: Span },

    /// A token did not match what the grammar expected at this point.
    #[error("ParseError: {message} ({span})")]
    Parse { message: String, span: Span },

    /// A name could not be resolved after consulting every fallback scope.
    #[error("NameError: {message} ({span})")]
    Name { message: String, span: Span },

    /// An operator was applied to operand types it does not support.
    #[error("TypeError: {message} ({span})")]
    Type { message: String, span: Span },

    /// A list or string index fell outside the valid range.
    #[error("IndexError: {message} ({span})")]
    Index { message: String, span: Span },

    /// A catch-all for built-in function failures.
    #[error("RuntimeError: {message} ({span})")]
    Runtime { message: String, span: Span },
}

impl WispError {
    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        Self::Lex { message: message.into(), span }
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        Self::Parse { message: message.into(), span }
    }

    pub fn name(message: impl Into<String>, span: Span) -> Self {
        Self::Name { message: message.into(), span }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::Type { message: message.into(), span }
    }

    pub fn index(message: impl Into<String>, span: Span) -> Self {
        Self::Index { message: message.into(), span }
    }

    pub fn runtime(message: impl Into<String>, span: Span) -> Self {
        Self::Runtime { message: message.into(), span }
    }
}

/// Convenience alias used throughout the pipeline.
pub type WispResult<T> = std::result::Result<T, WispError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_kind_and_span() {
        let e = WispError::name("x", Span::new(4));
        assert_eq!(e.to_string(), "NameError: x (line 4)");
    }
}
