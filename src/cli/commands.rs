//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::backend::EmitError;
use crate::frontend::diagnostics::{self, CompileError};
use crate::frontend::{lexer, parser};
use crate::{PipelineError, compile_source};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during compilation.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let display = file_path.display();
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", display, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            display,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", display, e)))
}

/// Lex and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| syntax_failure(file_path, &source, &errs))?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the syntax tree.
pub fn parse_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| syntax_failure(file_path, &source, &errs))?;
    let module = parser::parse(&tokens).map_err(|errs| syntax_failure(file_path, &source, &errs))?;

    println!("{:#?}", module);
    Ok(ExitCode::SUCCESS)
}

/// Compile a file and print the C++ to stdout.
pub fn emit_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let cpp = compile(file_path, &source)?;
    print!("{}", cpp);
    Ok(ExitCode::SUCCESS)
}

/// Compile `file_path` and write the C++ to `output`, creating parent directories as needed.
pub fn compile_file(file_path: &Path, output: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let cpp = compile(file_path, &source)?;

    if output.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            output.display()
        );
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::failure(format!("Cannot create output directory '{}': {}", parent.display(), e))
        })?;
    }
    fs::write(output, &cpp)
        .map_err(|e| CliError::failure(format!("Error writing output '{}': {}", output.display(), e)))?;

    tracing::debug!(output = %output.display(), bytes = cpp.len(), "wrote C++ output");
    println!("✓ Wrote {}", output.display());
    Ok(ExitCode::SUCCESS)
}

/// Run the whole pipeline, turning any stage failure into a rendered [`CliError`].
fn compile(file_path: &Path, source: &str) -> CliResult<String> {
    compile_source(source).map_err(|err| match err {
        PipelineError::Lex(errs) | PipelineError::Parse(errs) => syntax_failure(file_path, source, &errs),
        PipelineError::Emit(err) => emit_failure(file_path, &err),
    })
}

fn syntax_failure(file_path: &Path, source: &str, errors: &[CompileError]) -> CliError {
    let name = file_path.display().to_string();
    CliError::failure(diagnostics::format_errors(&name, source, errors))
}

/// Emit errors carry no span, so they are rendered without source context.
fn emit_failure(file_path: &Path, err: &EmitError) -> CliError {
    let mut rendered = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut rendered, err).is_err() {
        rendered = err.to_string();
    }
    CliError::failure(format!(
        "Emit error in {}:\n{}",
        file_path.display(),
        rendered.trim_end()
    ))
}
