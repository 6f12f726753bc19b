//! Command-line argument definitions for the Robolang CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the program to analyze, the configuration
//! file, which tables to print, and logging verbosity.

use clap::{ArgGroup, Parser};

use crate::samples::Sample;

/// Command-line arguments for the Robolang analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("program").required(true).args(["input", "sample"])))]
pub struct Args {
    /// Path to the input Robolang file
    #[arg(help = "Path to the input file")]
    pub input: Option<String>,

    /// Analyze a built-in sample program instead of a file
    #[arg(long, value_enum)]
    pub sample: Option<Sample>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Do not print the token table
    #[arg(long)]
    pub no_tokens: bool,

    /// Do not print the symbol table
    #[arg(long)]
    pub no_symbols: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_path() {
        let args =
            Args::try_parse_from(["robolang", "arm.rob", "--no-tokens"]).expect("valid args");
        assert_eq!(args.input.as_deref(), Some("arm.rob"));
        assert_eq!(args.sample, None);
        assert!(args.no_tokens);
        assert!(!args.no_symbols);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_sample() {
        let args = Args::try_parse_from(["robolang", "--sample", "semantic-errors"])
            .expect("valid args");
        assert_eq!(args.sample, Some(Sample::SemanticErrors));
        assert_eq!(args.input, None);
    }

    #[test]
    fn test_program_is_required() {
        assert!(Args::try_parse_from(["robolang"]).is_err());
    }

    #[test]
    fn test_input_and_sample_conflict() {
        assert!(Args::try_parse_from(["robolang", "arm.rob", "--sample", "correct"]).is_err());
    }

    #[test]
    fn test_unknown_sample() {
        assert!(Args::try_parse_from(["robolang", "--sample", "broken"]).is_err());
    }
}
