//! Errors reported by the CLI.

use std::io;

use thiserror::Error;

use robolang_parser::error::Diagnostic;

use crate::config::ConfigError;

/// Everything that makes a CLI run fail.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No input: pass a file path or `--sample <name>`")]
    NoInput,

    /// The program was analyzed and has problems.
    #[error("{} problem(s) found in {name}", .diagnostics.len())]
    Analysis {
        /// File path or sample name.
        name: String,
        /// The analyzed source, for rendering snippets.
        src: String,
        diagnostics: Vec<Diagnostic>,
    },
}
