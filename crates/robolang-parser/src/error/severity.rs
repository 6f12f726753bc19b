//! Diagnostic kinds.
//!
//! A diagnostic's severity names the analysis stage that raised it. All three
//! are errors in the sense that a program carrying any of them is invalid;
//! they differ only in where the problem was found.

use std::fmt;

/// The stage of analysis that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// A character that cannot start or continue any token.
    Lexical,

    /// A token sequence that matches no grammar alternative.
    Syntax,

    /// A well-formed statement that breaks a naming or range rule.
    Semantic,
}

impl Severity {
    /// Returns `true` for [`Severity::Lexical`].
    pub fn is_lexical(&self) -> bool {
        matches!(self, Severity::Lexical)
    }

    /// Returns `true` for [`Severity::Syntax`].
    pub fn is_syntax(&self) -> bool {
        matches!(self, Severity::Syntax)
    }

    /// Returns `true` for [`Severity::Semantic`].
    pub fn is_semantic(&self) -> bool {
        matches!(self, Severity::Semantic)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Lexical => write!(f, "lexical"),
            Severity::Syntax => write!(f, "syntax"),
            Severity::Semantic => write!(f, "semantic"),
        }
    }
}
