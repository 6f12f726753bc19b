//! Diagnostics for the Robolang analysis pipeline.
//!
//! Nothing in the pipeline stops at the first problem. Every stage reports
//! what it finds as a [`Diagnostic`] and keeps going, so a single pass
//! surfaces every lexical, syntax and semantic issue in the source.
//!
//! # Overview
//!
//! - [`Diagnostic`] is one positioned message with an [`ErrorCode`], one or
//!   more labeled spans and optional help text.
//! - [`Severity`] tells which stage found the problem.
//! - [`DiagnosticCollector`] is the ordered, append-only list shared by the
//!   lexer, the parser and the symbol table.
//!
//! # Example
//!
//! ```
//! # use robolang_parser::{Position, Span};
//! # use robolang_parser::error::{Diagnostic, ErrorCode};
//!
//! let second = Span::new(9..17);
//! let first = Span::new(0..8);
//!
//! let diag = Diagnostic::semantic(Position::new(2, 1), "robot `r1` is already declared")
//!     .with_code(ErrorCode::E201)
//!     .with_label(second, "duplicate declaration")
//!     .with_secondary_label(first, "first declared here")
//!     .with_help("remove the duplicate or use a different name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;
