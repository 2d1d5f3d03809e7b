// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end tests for the `lamo` binary.
//!
//! Each test writes a .lamo file into a temp directory and runs the real
//! binary against it. Tests that need a C compiler skip themselves when
//! none is installed.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn lamo_binary() -> PathBuf {
    let mut path = env::current_exe().expect("current_exe");
    path.pop(); // remove test binary name
    if path.ends_with("deps") {
        path.pop();
    }
    path.push(format!("lamo{}", env::consts::EXE_SUFFIX));
    path
}

fn lamo(args: &[&str]) -> Output {
    Command::new(lamo_binary())
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("FORCE_COLOR")
        .output()
        .expect("failed to spawn lamo")
}

fn write_program(dir: &Path, name: &str, src: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, src).expect("write source");
    path.to_string_lossy().into_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn has_c_compiler() -> bool {
    let cc = env::var("LAMO_CC")
        .or_else(|_| env::var("CC"))
        .unwrap_or_else(|_| "cc".to_string());
    Command::new(cc).arg("--version").output().is_ok()
}

const FACTORIALS: &str = "\
fn fact(n) {
    if (n <= 1) { return 1; }
    return n * fact(n - 1);
}

let total = 0;
for (let i = 1; i <= 4; i++) {
    total += fact(i);
}
print(total);
print(\"done\");
";

// ── informational commands ──────────────────────────────────

#[test]
fn version_prints_package_version() {
    let out = lamo(&["version"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), format!("lamo {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_commands() {
    let out = lamo(&["help"]);
    assert!(out.status.success());
    let text = stdout(&out);
    for cmd in ["run", "build", "emit", "lex", "parse", "explain"] {
        assert!(text.contains(cmd), "help is missing `{}`:\n{}", cmd, text);
    }
}

#[test]
fn help_for_one_command() {
    let out = lamo(&["help", "build"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("--keep-c"));

    let out = lamo(&["help", "frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn unknown_command_fails() {
    let out = lamo(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown command `frobnicate`"), "stderr: {}", stderr(&out));
}

#[test]
fn missing_file_argument_is_usage_error() {
    let out = lamo(&["emit"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("usage: lamo emit"), "stderr: {}", stderr(&out));
}

#[test]
fn unreadable_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.lamo");
    let out = lamo(&["emit", &path.to_string_lossy()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("error: reading "), "stderr: {}", stderr(&out));
}

#[test]
fn explain_known_and_unknown_codes() {
    let out = lamo(&["explain", "E0100"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("error[E0100]: unexpected token"), "stdout: {}", stdout(&out));

    let out = lamo(&["explain", "e0103"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("nested function"));

    let out = lamo(&["explain", "E9999"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown error code `E9999`"));
}

#[test]
fn explain_without_code_lists_all() {
    let out = lamo(&["explain"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 7, "got:\n{}", text);
    assert!(text.starts_with("E0001"));
}

// ── phase dumps ─────────────────────────────────────────────

#[test]
fn lex_dumps_tokens_with_positions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "t.lamo", "let x = 1;\n");
    let out = lamo(&["lex", &path]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let lines: Vec<String> = stdout(&out).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 6, "got: {:?}", lines);
    assert_eq!(lines[0], "   1:1   Let        let");
    assert_eq!(lines[1], "   1:5   Ident      x");
    assert!(lines[5].contains("Eof"));
}

#[test]
fn lex_json_is_an_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "t.lamo", "print(1);");
    let out = lamo(&["--format", "json", "lex", &path]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    let tokens = value.as_array().expect("array of tokens");
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0]["lexeme"], "print");
}

#[test]
fn parse_prints_tree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "p.lamo", "let x = 2 * 3;");
    let out = lamo(&["parse", &path]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("VarDecl"), "stdout: {}", text);
    assert!(text.contains("Mul"), "stdout: {}", text);
}

#[test]
fn parse_json_has_decls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "p.lamo", "fn f(a) { return a; }\nprint(f(1));");
    let out = lamo(&["--format=json", "parse", &path]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(value["decls"].as_array().map(Vec::len), Some(2));
}

// ── diagnostics ─────────────────────────────────────────────

#[test]
fn syntax_error_short_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "bad.lamo", "let x = (5 + 3;\n");
    let out = lamo(&["emit", &path]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty(), "no C on failure, got: {}", stdout(&out));
    assert_eq!(
        stderr(&out),
        format!("{}:1:15: error[E0100]: expected ')', found ';'\n", path)
    );
}

#[test]
fn syntax_error_human_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "bad.lamo", "print(1);\nretrun 5;\n");
    let out = lamo(&["--format", "human", "parse", &path]);
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.starts_with("error[E0102]: "), "stderr: {}", text);
    assert!(text.contains(&format!("  --> {}:2:8\n", path)), "stderr: {}", text);
    assert!(text.contains("  2 | retrun 5;\n"), "stderr: {}", text);
    assert!(text.contains("= help: did you mean `return`?"), "stderr: {}", text);
}

#[test]
fn syntax_error_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "bad.lamo", "if (1) { fn g() { } }");
    let out = lamo(&["--format", "json", "build", &path]);
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(value["success"], false);
    assert_eq!(value["phase"], "parse");
    assert_eq!(value["diagnostics"][0]["code"], "E0103");
}

#[test]
fn bad_format_is_rejected() {
    let out = lamo(&["--format", "xml", "version"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown format `xml`"));
}

// ── emit ────────────────────────────────────────────────────

#[test]
fn emit_prints_c() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "e.lamo", "let x = 5 + 3;\nprint(x);\n");
    let out = lamo(&["emit", &path]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(out.stderr.is_empty(), "quiet unless --verbose: {}", stderr(&out));
    let c = stdout(&out);
    assert!(c.starts_with("// Generated by lamo"), "got: {}", c);
    assert!(c.contains("int main() {\n    int x = 5 + 3;\n    printf(\"%d\\n\", x);\n    return 0;\n}\n"), "got: {}", c);
}

#[test]
fn emit_to_file_with_verbose_banners() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "e.lamo", "print(\"hi\");");
    let c_path = dir.path().join("e.c");
    let out = lamo(&["--verbose", "emit", &path, "-o", &c_path.to_string_lossy()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("Parse: 1 declarations OK"), "stderr: {}", stderr(&out));
    let c = fs::read_to_string(&c_path).expect("C file written");
    assert!(c.contains("printf(\"%s\\n\", \"hi\");"));
    let arrow_line = format!("  --> {}", c_path.display());
    assert!(stderr(&out).contains(&arrow_line), "stderr: {}", stderr(&out));
}

#[test]
fn deep_nesting_is_a_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = format!("print({}1);", "- ".repeat(200_000));
    let path = write_program(dir.path(), "deep.lamo", &src);
    let out = lamo(&["emit", &path]);
    assert_eq!(out.status.code(), Some(1), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("E0105"), "stderr: {}", stderr(&out));
}

// ── toolchain ───────────────────────────────────────────────

#[test]
fn missing_compiler_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "r.lamo", "print(1);");
    let out = Command::new(lamo_binary())
        .args(["run", &path])
        .env("NO_COLOR", "1")
        .env("LAMO_CC", dir.path().join("no-such-cc"))
        .output()
        .expect("failed to spawn lamo");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("could not run C compiler"), "stderr: {}", stderr(&out));
}

#[test]
fn run_prints_program_output() {
    if !has_c_compiler() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "fact.lamo", FACTORIALS);
    let out = lamo(&["run", &path]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "33\ndone\n");
}

#[test]
fn multi_line_string_literal_runs() {
    if !has_c_compiler() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "lines.lamo", "print(\"a\nb\");");
    let out = lamo(&["run", &path]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "a\nb\n");
}

#[test]
fn run_forwards_exit_status() {
    if !has_c_compiler() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "exit.lamo", "print(\"bye\");\nexit(3);\nprint(\"unreachable\");\n");
    let out = lamo(&[&path]);
    assert_eq!(out.status.code(), Some(3), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "bye\n");
}

#[test]
fn build_keeps_c_and_produces_runnable_binary() {
    if !has_c_compiler() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_program(dir.path(), "fact.lamo", FACTORIALS);
    let bin = dir.path().join(format!("fact{}", env::consts::EXE_SUFFIX));
    let out = lamo(&["build", &path, "-o", &bin.to_string_lossy(), "--keep-c"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(dir.path().join("fact.c").exists(), "C source kept");

    let run = Command::new(&bin).output().expect("run built binary");
    assert!(run.status.success());
    assert_eq!(stdout(&run), "33\ndone\n");
}
