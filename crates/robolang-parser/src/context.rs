//! Per-run analysis state.

use log::debug;
use thiserror::Error;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    lexer, parser,
    span::Position,
    symbols::SymbolTable,
    tokens::{Token, TokenKind},
};

/// A token stream that no lexer could have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenStreamError {
    #[error("token stream is empty")]
    Empty,
    #[error("token stream does not end with an end-of-input token")]
    MissingEndOfInput,
}

impl From<TokenStreamError> for Diagnostic {
    fn from(err: TokenStreamError) -> Self {
        Diagnostic::syntax(Position::start(), err.to_string())
            .with_code(ErrorCode::E101)
            .with_help("tokens must come from `Lexer` or `tokenize`")
    }
}

/// Everything one analysis run owns: the symbol table and the diagnostics.
///
/// A context is created by its caller and threaded through the lexer
/// diagnostics, the parser and the symbol table. Nothing is shared between
/// contexts except the read-only method catalog, so independent runs may
/// proceed on separate threads.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub(crate) symbols: SymbolTable,
    pub(crate) diagnostics: DiagnosticCollector,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    /// Run every stage after lexing over `tokens`.
    ///
    /// Lexical diagnostics for error tokens come first, then whatever the
    /// parser and symbol table report, then the final duplicate sweep.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStreamError`] without touching the context if `tokens`
    /// does not end with [`TokenKind::EndOfInput`].
    pub fn analyze_tokens(&mut self, tokens: &[Token<'_>]) -> Result<(), TokenStreamError> {
        match tokens.last() {
            None => return Err(TokenStreamError::Empty),
            Some(last) if last.kind() != TokenKind::EndOfInput => {
                return Err(TokenStreamError::MissingEndOfInput);
            }
            Some(_) => {}
        }

        self.diagnostics.extend(
            tokens
                .iter()
                .filter(|token| token.kind() == TokenKind::Error)
                .map(lexer::error_token_diagnostic),
        );

        let statements = parser::parse(tokens, self);

        let duplicates = self.symbols.find_duplicate_robots();
        self.diagnostics.extend(duplicates);

        debug!(
            statements,
            robots = self.symbols.robots().count(),
            diagnostics = self.diagnostics.len();
            "Analysis finished"
        );

        Ok(())
    }

    /// Split the context into its symbol table and diagnostics.
    pub fn into_parts(self) -> (SymbolTable, DiagnosticCollector) {
        (self.symbols, self.diagnostics)
    }
}
