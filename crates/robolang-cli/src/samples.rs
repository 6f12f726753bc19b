//! Built-in sample programs.
//!
//! The samples are the programs under `demos/`, compiled into the binary so
//! `robolang --sample <name>` works without any files at hand.

use clap::ValueEnum;

/// One of the built-in sample programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// A program with no problems
    Correct,
    /// A program with invalid characters and malformed statements
    LexicalErrors,
    /// A program with duplicate, undeclared and out-of-range uses
    SemanticErrors,
}

impl Sample {
    /// The sample's source text.
    pub fn source(self) -> &'static str {
        match self {
            Sample::Correct => include_str!("../../../demos/correct.rob"),
            Sample::LexicalErrors => include_str!("../../../demos/errors/lexical_errors.rob"),
            Sample::SemanticErrors => include_str!("../../../demos/errors/semantic_errors.rob"),
        }
    }

    /// Name used in reports, e.g. `<sample:correct>`.
    pub fn display_name(self) -> String {
        let name = self
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        format!("<sample:{name}>")
    }
}
