//! CLI logic for the Robolang analyzer.
//!
//! Reads a program from a file or a built-in sample, analyzes it, and prints
//! the token and symbol tables. Problems in the program are returned as
//! [`CliError::Analysis`] so the caller can render them.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod report;
mod samples;

pub use args::Args;
pub use config::{AppConfig, ConfigError, ReportConfig};
pub use error::CliError;
pub use samples::Sample;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use robolang_parser::analyze;

/// Run the Robolang CLI application, printing the report to stdout.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - A program with at least one diagnostic
pub fn run(args: &Args) -> Result<(), CliError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the Robolang CLI application, writing the report to `out`.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let report_config = ReportConfig {
        tokens: app_config.report.tokens && !args.no_tokens,
        symbols: app_config.report.symbols && !args.no_symbols,
    };

    let (name, source) = read_program(args)?;
    info!(program = name; "Analyzing program");

    let result = analyze(&source);
    report::write_report(out, &name, &result, report_config)?;

    if result.is_clean() {
        info!(program = name; "No problems found");
        return Ok(());
    }

    let diagnostics = result.diagnostics().to_vec();
    Err(CliError::Analysis {
        name,
        src: source,
        diagnostics,
    })
}

/// Name and source text of the program selected by `args`.
fn read_program(args: &Args) -> Result<(String, String), CliError> {
    match (&args.input, args.sample) {
        (Some(path), _) => Ok((path.clone(), fs::read_to_string(path)?)),
        (None, Some(sample)) => Ok((sample.display_name(), sample.source().to_string())),
        (None, None) => Err(CliError::NoInput),
    }
}
