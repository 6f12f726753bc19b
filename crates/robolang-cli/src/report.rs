//! Plain-text report of an analysis: token table, symbol table, summary.

use std::io::{self, Write};

use robolang_core::method::MethodSignature;
use robolang_parser::{AnalysisResult, error::Severity};

use crate::config::ReportConfig;

/// Write the tables enabled in `config`, then a one-line summary.
pub fn write_report(
    out: &mut impl Write,
    name: &str,
    result: &AnalysisResult<'_>,
    config: ReportConfig,
) -> io::Result<()> {
    writeln!(out, "{name}")?;

    if config.tokens {
        writeln!(out)?;
        write_tokens(out, result)?;
    }
    if config.symbols {
        writeln!(out)?;
        write_symbols(out, result)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", summary(result))
}

fn write_tokens(out: &mut impl Write, result: &AnalysisResult<'_>) -> io::Result<()> {
    writeln!(out, "Tokens")?;
    writeln!(out, "{:>4}  {:<20} {:<12} {:>5} {:>6}", "#", "LEXEME", "KIND", "LINE", "COLUMN")?;
    for (index, token) in result.tokens().iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<20} {:<12} {:>5} {:>6}",
            index + 1,
            token.lexeme(),
            token.kind().label(),
            token.line(),
            token.column()
        )?;
    }
    Ok(())
}

fn write_symbols(out: &mut impl Write, result: &AnalysisResult<'_>) -> io::Result<()> {
    let symbols = result.symbols();

    writeln!(out, "Robots")?;
    if symbols.robots().is_empty() {
        writeln!(out, "  (none declared)")?;
    }
    for robot in symbols.robots() {
        writeln!(out, "  {:<16} declared at {}", robot.name(), robot.position())?;
    }

    writeln!(out)?;
    writeln!(out, "Methods")?;
    for signature in symbols.methods() {
        writeln!(out, "  {}", describe_method(signature))?;
    }
    Ok(())
}

fn describe_method(signature: &MethodSignature) -> String {
    let name = signature.name();
    match signature.range() {
        Some(range) => format!("{name:<12} {} value   {range}", signature.arity().count()),
        None => format!("{name:<12} no value"),
    }
}

/// One line: "no problems found" or the count per stage.
pub fn summary(result: &AnalysisResult<'_>) -> String {
    let total = result.diagnostics().len();
    if total == 0 {
        return "no problems found".to_string();
    }

    let count = |severity| result.diagnostics_of(severity).count();
    format!(
        "{total} problem{} found ({} lexical, {} syntax, {} semantic)",
        if total == 1 { "" } else { "s" },
        count(Severity::Lexical),
        count(Severity::Syntax),
        count(Severity::Semantic),
    )
}

#[cfg(test)]
mod tests {
    use robolang_parser::analyze;

    use super::*;

    fn render(source: &str, config: ReportConfig) -> String {
        let result = analyze(source);
        let mut out = Vec::new();
        write_report(&mut out, "test.rob", &result, config).expect("write to Vec");
        String::from_utf8(out).expect("utf-8 report")
    }

    #[test]
    fn test_full_report() {
        let report = render("Robot r1\nr1.base(90)", ReportConfig::default());

        assert!(report.starts_with("test.rob\n"));
        assert!(report.contains("Tokens"));
        assert!(report.contains("ROBOT"));
        assert!(report.contains("METHOD"));
        assert!(report.contains("EOF"));
        assert!(report.contains("r1               declared at 1:7"));
        assert!(report.contains("base         1 value   [0..360]"));
        assert!(report.contains("repetir      1 value   [1..+∞)"));
        assert!(report.contains("iniciar      no value"));
        assert!(report.trim_end().ends_with("no problems found"));
    }

    #[test]
    fn test_tables_can_be_disabled() {
        let report = render(
            "Robot r1",
            ReportConfig {
                tokens: false,
                symbols: false,
            },
        );
        assert_eq!(report, "test.rob\n\nno problems found\n");
    }

    #[test]
    fn test_no_robots() {
        let report = render(
            "",
            ReportConfig {
                tokens: false,
                symbols: true,
            },
        );
        assert!(report.contains("(none declared)"));
    }

    #[test]
    fn test_summary_counts_each_stage() {
        let result = analyze("Robot r1\nr1.base\n@\nr1.garra(91)\nr3.iniciar");
        assert_eq!(
            summary(&result),
            "4 problems found (1 lexical, 1 syntax, 2 semantic)"
        );

        let single = analyze("r3.iniciar");
        assert_eq!(
            summary(&single),
            "1 problem found (0 lexical, 0 syntax, 1 semantic)"
        );
    }
}
