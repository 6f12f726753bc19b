//! The core diagnostic type.
//!
//! A [`Diagnostic`] is a single problem found in the source, with its
//! stage, position, error code, labeled spans and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::{Position, Span},
};

/// A positioned message describing one problem in the source.
///
/// # Example
///
/// ```text
/// semantic[E202] at 4:9: value 400 is out of range [0..360] for method `base`
///   |
/// 4 | r1.base(400)
///   |         ^^^ value out of range
///   |
///   = help: use a value between 0 and 360
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    position: Position,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a lexical diagnostic.
    pub fn lexical(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Lexical, position, message)
    }

    /// Create a syntax diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use robolang_parser::{Position, Span};
    /// # use robolang_parser::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::syntax(Position::new(3, 4), "method `base` requires a value")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(20..24), "missing value")
    ///     .with_help("write `r1.base(90)` or `r1.base = 90`");
    /// ```
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Syntax, position, message)
    }

    /// Create a semantic diagnostic.
    pub fn semantic(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Semantic, position, message)
    }

    /// Get the stage that produced this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the 1-based line and column the diagnostic points at.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Shorthand for `position().line()`.
    pub fn line(&self) -> u32 {
        self.position.line()
    }

    /// Shorthand for `position().column()`.
    pub fn column(&self) -> u32 {
        self.position.column()
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    ///
    /// The code must belong to this diagnostic's stage (`E0xx` lexical,
    /// `E1xx` syntax, `E2xx` semantic).
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        debug_assert_eq!(
            code.severity(),
            self.severity,
            "error code {code} does not match a {} diagnostic",
            self.severity
        );
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, position: Position, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            position,
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "syntax[E100] at 3:5: message" or "syntax at 3:5: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, " at {}: {}", self.position, self.message)
    }
}

impl std::error::Error for Diagnostic {}
