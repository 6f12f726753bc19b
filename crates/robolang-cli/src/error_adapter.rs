//! miette rendering for CLI failures.
//!
//! A failed analysis becomes one [`Reportable`] per diagnostic, each carrying
//! the program source so miette can draw the labeled snippet. Any other
//! failure becomes a single reportable, with a hint where one helps.
//!
//! Codes are namespaced by analysis stage, e.g. `robolang::syntax::E102`.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use robolang_parser::{Span, error::Diagnostic};

use crate::{config::ConfigError, error::CliError};

/// Something `main` can hand to a miette report handler.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One analyzer diagnostic and the program it was found in.
    Finding { diag: &'a Diagnostic, src: &'a str },
    /// A failure that has no location in the program.
    Failure(&'a CliError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Finding { diag, .. } => write!(
                f,
                "{} error at {}: {}",
                diag.severity(),
                diag.position(),
                diag.message()
            ),
            Reportable::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Finding { .. } => None,
            Reportable::Failure(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            Reportable::Finding { diag, .. } => match diag.code() {
                Some(code) => format!("robolang::{}::{code}", diag.severity()),
                None => format!("robolang::{}", diag.severity()),
            },
            Reportable::Failure(CliError::Io(_)) => "robolang::io".to_string(),
            Reportable::Failure(CliError::Config(_)) => "robolang::config".to_string(),
            Reportable::Failure(CliError::NoInput) => "robolang::usage".to_string(),
            Reportable::Failure(CliError::Analysis { .. }) => "robolang::analysis".to_string(),
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        // Every stage rejects the program; none of them only warns.
        Some(MietteSeverity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match self {
            Reportable::Finding { diag, .. } => diag.help()?,
            Reportable::Failure(CliError::NoInput) => "try `robolang --sample correct`",
            Reportable::Failure(CliError::Config(ConfigError::MissingFile(_))) => {
                "check the path given to `--config`"
            }
            Reportable::Failure(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Finding { src, .. } => Some(src as &dyn miette::SourceCode),
            Reportable::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Finding { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = to_source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split a [`CliError`] into the reports `main` renders, one per diagnostic.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Analysis {
            src, diagnostics, ..
        } => diagnostics
            .iter()
            .map(|diag| Reportable::Finding { diag, src })
            .collect(),
        _ => vec![Reportable::Failure(err)],
    }
}
