//! Error codes for the Robolang diagnostic system.
//!
//! Error codes are organized by stage:
//! - `E0xx` - Lexical errors
//! - `E1xx` - Syntax errors
//! - `E2xx` - Semantic errors

use std::fmt;

use crate::error::Severity;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was found that cannot begin or continue any token,
    /// such as `@`, `#` or `$`.
    E001,

    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser found a token that does not fit the statement being parsed.
    E100,

    /// Unexpected end of input.
    ///
    /// The source ended in the middle of a statement or inside an unclosed
    /// `repetir` block.
    E101,

    /// Missing value.
    ///
    /// A method that takes one value was called without one, as in `r1.base`.
    E102,

    /// Unexpected value.
    ///
    /// A method that takes no value was given one, as in `r1.iniciar(1)`.
    E103,

    /// Unknown method.
    ///
    /// A dotted call names something that is not a built-in method.
    E104,

    // =========================================================================
    // Semantic Errors (E2xx)
    // =========================================================================
    /// Undeclared robot.
    ///
    /// A robot was used before any `Robot <name>` declaration.
    E200,

    /// Duplicate robot declaration.
    ///
    /// A robot with this name has already been declared.
    E201,

    /// Value out of range.
    ///
    /// A method argument lies outside the method's valid range.
    E202,

    /// Malformed numeric argument.
    ///
    /// A method argument has a fractional part; all arguments are integers.
    E203,
}

impl ErrorCode {
    /// Returns a short description used as the default label text.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected character",

            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "unexpected end of input",
            ErrorCode::E102 => "missing value",
            ErrorCode::E103 => "unexpected value",
            ErrorCode::E104 => "unknown method",

            ErrorCode::E200 => "undeclared robot",
            ErrorCode::E201 => "duplicate declaration",
            ErrorCode::E202 => "value out of range",
            ErrorCode::E203 => "malformed numeric argument",
        }
    }

    /// The analysis stage this code belongs to.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::E001 => Severity::Lexical,
            ErrorCode::E100
            | ErrorCode::E101
            | ErrorCode::E102
            | ErrorCode::E103
            | ErrorCode::E104 => Severity::Syntax,
            ErrorCode::E200 | ErrorCode::E201 | ErrorCode::E202 | ErrorCode::E203 => {
                Severity::Semantic
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug output of the variant is its name, e.g. "E001".
        write!(f, "{self:?}")
    }
}
