//! Collector for accumulating diagnostics across the analysis pipeline.
//!
//! The [`DiagnosticCollector`] is append-only: diagnostics keep the order in
//! which they were discovered, and nothing is ever removed or rewritten.

use crate::error::Diagnostic;

/// An ordered, append-only list of diagnostics.
///
/// # Example
///
/// ```
/// # use robolang_parser::Position;
/// # use robolang_parser::error::{Diagnostic, DiagnosticCollector, ErrorCode};
///
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::lexical(Position::new(1, 12), "unexpected character `@`")
///         .with_code(ErrorCode::E001),
/// );
/// collector.emit(
///     Diagnostic::semantic(Position::new(2, 1), "robot `r3` is not declared")
///         .with_code(ErrorCode::E200),
/// );
///
/// assert_eq!(collector.len(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append several diagnostics, keeping their order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// All diagnostics collected so far, in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of diagnostics collected.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection and hand over the diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
