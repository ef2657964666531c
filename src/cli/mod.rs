//! CLI module for the Pytircy compiler
//!
//! ## Usage
//!
//! - `pytircy <file> [-o <output>]` - Compile to C++ (default output: `out.pytircy.cpp`)
//! - `pytircy --lex <file>` - Print tokens (debug)
//! - `pytircy --parse <file>` - Print the syntax tree (debug)
//! - `pytircy --emit <file>` - Print generated C++ to stdout (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::version::PYTIRCY_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Output path used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "out.pytircy.cpp";

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compile a typed Python subset to C++ source
#[derive(Parser, Debug)]
#[command(name = "pytircy")]
#[command(version = PYTIRCY_VERSION)]
#[command(about = "Compile a typed Python subset to C++ source", long_about = None)]
pub struct Cli {
    /// Source file to compile
    #[arg(
        value_name = "SOURCE",
        required_unless_present_any = ["lex_file", "parse_file", "emit_file"]
    )]
    pub source: Option<PathBuf>,

    /// Where to write the generated C++
    #[arg(short = 'o', long = "output", value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "source")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "source")]
    pub parse_file: Option<PathBuf>,

    /// Print generated C++ to stdout instead of writing a file (debug)
    #[arg(long = "emit", value_name = "FILE", conflicts_with = "source")]
    pub emit_file: Option<PathBuf>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    eprintln!("{}", banner());

    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// `Pytircy Compiler v<version>`
pub fn banner() -> String {
    format!("Pytircy Compiler v{}", PYTIRCY_VERSION)
}

/// Execute the parsed command line and return the exit code.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file);
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file);
    }
    if let Some(file) = cli.emit_file {
        return commands::emit_file(&file);
    }

    match cli.source {
        Some(source) => commands::compile_file(&source, &cli.output),
        None => Err(CliError::failure("Error: no source file given")),
    }
}

// ============================================================================
// Tests
// ============================================================================
