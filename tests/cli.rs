use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn base() -> Command {
    let mut cmd = cargo_bin_cmd!("base");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn version_flag_exits_without_parsing() {
    base()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base lang"));

    base()
        .arg("--v")
        .assert()
        .success()
        .stdout(predicate::str::contains(base_lang::VERSION));
}

#[test]
fn missing_file_prints_usage() {
    base()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: base <filename>"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "main.ts", "print(1);");

    base()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file extension: .ts"));
}

#[test]
fn unreadable_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.base");

    base()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn successful_parse_prints_ast() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "hello.BASE", "let number x = 1;\nprint(x);\n");

    base()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsing successful"))
        .stdout(predicate::str::contains("AST:"))
        .stdout(predicate::str::contains("  let VariableDeclaration"))
        .stdout(predicate::str::contains("      Identifier: print"));
}

#[test]
fn parse_error_is_reported_with_context() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "broken.bxml", "let number x = 1;\nlet y = 2;\n");

    base()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Parsing successful").not())
        .stderr(predicate::str::contains(
            "Parse error at line 2: Expected type annotation, got 'y'",
        ))
        .stderr(predicate::str::contains("let y = 2;"));
}

#[test]
fn lexer_warning_does_not_stop_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "warn.base", "print(\"a\\qb\");\n");

    base()
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Lexer warning: Unknown escape sequence \\q"))
        .stdout(predicate::str::contains("StringLiteral: \"aqb\""));
}

#[test]
fn strict_mode_rejects_template_literals() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "template.base", "print(`hi`);\n");

    base().arg(&path).assert().success();

    base()
        .arg("--strict")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Lexer error: Template literals are not allowed"));
}

#[test]
fn token_dump() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "tokens.base", "let number x = 1;\n");

    base()
        .arg("--tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total tokens: 7"))
        .stdout(predicate::str::contains("keyword 'let'"));
}

#[test]
fn warnings_are_shown_when_parse_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "both.base", "print(\"a\\qb\");\nlet y = 2;\n");

    base()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Lexer warning: Unknown escape sequence \\q at line 1",
        ))
        .stderr(predicate::str::contains(
            "Parse error at line 2: Expected type annotation, got 'y'",
        ));
}

#[test]
fn verbose_flag_enables_debug_logging() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "log.base", "print(1);\n");

    base()
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded source").not());

    base()
        .arg("--verbose")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded source"))
        .stderr(predicate::str::contains("parsed program"));
}

#[test]
fn rust_log_overrides_log_level() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "trace.base", "print(1);\n");

    base()
        .env("RUST_LOG", "trace")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed program"))
        .stderr(predicate::str::contains("token"));
}

#[test]
fn deep_nesting_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let source = format!("print({}1{});\n", "(".repeat(3000), ")".repeat(3000));
    let path = write_source(&dir, "deep.base", &source);

    base()
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Parse error at line 1: Nesting too deep"));
}
