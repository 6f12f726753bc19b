//! # Robolang Parser
//!
//! Lexer, parser and symbol table for Robolang, a small language for driving
//! robotic arms:
//!
//! ```text
//! Robot r1
//! r1.iniciar
//! r1.velocidad = 50
//! r1.repetir(2) {
//!     r1.base(90)
//!     r1.garra(45)
//! }
//! r1.detener
//! ```
//!
//! [`analyze`] runs the whole pipeline over one source string. Source text is
//! split into tokens, the parser recognizes statements and hands each
//! declaration and call to the symbol table, and every problem found on the
//! way is collected as a [`Diagnostic`](error::Diagnostic). Analysis never
//! stops at the first problem.
//!
//! ```
//! use robolang_parser::{analyze, error::ErrorCode};
//!
//! let result = analyze("Robot r1\nr1.base(400)");
//!
//! assert_eq!(result.diagnostics().len(), 1);
//! assert_eq!(result.diagnostics()[0].code(), Some(ErrorCode::E202));
//! assert!(result.symbols().robot("r1").is_some());
//! ```

pub mod context;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod symbols;
pub mod tokens;


use log::debug;

pub use context::{AnalysisContext, TokenStreamError};
pub use span::{Position, Span};

use crate::{
    error::{Diagnostic, Severity},
    symbols::SymbolTableSnapshot,
    tokens::Token,
};

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisResult<'src> {
    tokens: Vec<Token<'src>>,
    diagnostics: Vec<Diagnostic>,
    symbols: SymbolTableSnapshot,
}

impl<'src> AnalysisResult<'src> {
    /// All significant tokens, ending with exactly one end-of-input token.
    pub fn tokens(&self) -> &[Token<'src>] {
        &self.tokens
    }

    /// Every diagnostic, in discovery order: lexical first, then syntax and
    /// semantic in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics found by one stage.
    pub fn diagnostics_of(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.severity() == severity)
    }

    /// Declared robots and the method catalog.
    pub fn symbols(&self) -> &SymbolTableSnapshot {
        &self.symbols
    }

    /// Returns `true` if no diagnostic of any kind was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyze one Robolang source string.
///
/// Each call owns a fresh [`AnalysisContext`], so repeated or concurrent
/// calls never influence each other.
pub fn analyze(source: &str) -> AnalysisResult<'_> {
    debug!(bytes = source.len(); "Analyzing source");

    let tokens = lexer::tokenize(source);
    let mut ctx = AnalysisContext::new();

    if let Err(err) = ctx.analyze_tokens(&tokens) {
        // Unreachable with lexer output, but still reported rather than lost.
        ctx.diagnostics.emit(err.into());
    }

    let (symbols, diagnostics) = ctx.into_parts();
    AnalysisResult {
        tokens,
        diagnostics: diagnostics.into_diagnostics(),
        symbols: symbols.snapshot(),
    }
}
