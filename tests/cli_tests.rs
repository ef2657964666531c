//! End-to-end tests for the `pytircy` binary.
//!
//! Each test runs the compiled binary in a scratch directory and checks the files it writes and its exit status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const PROGRAM: &str = "import vector\n\ndef add(a: int, b: int) -> int:\n    return a + b\n";
const PROGRAM_CPP: &str = "#include <vector>\nint add(int a, int b) {\nreturn (a + b);\n}\n";

fn pytircy(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pytircy"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run pytircy")
}

fn scratch_with(source: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prog.py"), source).unwrap();
    dir
}

#[test]
fn writes_default_output_in_working_directory() {
    let dir = scratch_with(PROGRAM);
    let out = pytircy(dir.path(), &["prog.py"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let cpp = fs::read_to_string(dir.path().join("out.pytircy.cpp")).unwrap();
    assert_eq!(cpp, PROGRAM_CPP);
}

#[test]
fn writes_to_output_flag_and_creates_parents() {
    let dir = scratch_with(PROGRAM);
    let out = pytircy(dir.path(), &["prog.py", "-o", "build/gen/prog.cpp"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let cpp = fs::read_to_string(dir.path().join("build/gen/prog.cpp")).unwrap();
    assert_eq!(cpp, PROGRAM_CPP);
    assert!(!dir.path().join("out.pytircy.cpp").exists());
}

#[test]
fn prints_version_banner_to_stderr() {
    let dir = scratch_with(PROGRAM);
    let out = pytircy(dir.path(), &["prog.py"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with(&format!("Pytircy Compiler v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn emit_error_exits_with_failure_and_names_error() {
    let dir = scratch_with("y = 1\n");
    let out = pytircy(dir.path(), &["prog.py"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("assignment to undeclared variable 'y'"), "stderr: {}", stderr);
    assert!(!dir.path().join("out.pytircy.cpp").exists());
}

#[test]
fn syntax_error_is_rendered_with_file_name() {
    let dir = scratch_with("x: int = = 1\n");
    let out = pytircy(dir.path(), &["prog.py"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("prog.py"), "stderr: {}", stderr);
}

#[test]
fn missing_source_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = pytircy(dir.path(), &["nope.py"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cannot access file 'nope.py'"));
}

#[test]
fn emit_flag_prints_to_stdout() {
    let dir = scratch_with(PROGRAM);
    let out = pytircy(dir.path(), &["--emit", "prog.py"]);

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), PROGRAM_CPP);
    assert!(!dir.path().join("out.pytircy.cpp").exists());
}

#[test]
fn lex_and_parse_flags_dump_debug_output() {
    let dir = scratch_with("x: int = 5\n");

    let lexed = pytircy(dir.path(), &["--lex", "prog.py"]);
    assert!(lexed.status.success());
    assert!(String::from_utf8_lossy(&lexed.stdout).contains("Ident(\"x\")"));

    let parsed = pytircy(dir.path(), &["--parse", "prog.py"]);
    assert!(parsed.status.success());
    assert!(String::from_utf8_lossy(&parsed.stdout).contains("AnnAssign"));
}
