//! CLI interface tests for the `lusc` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lusc() -> Command {
    Command::cargo_bin("lusc").expect("lusc binary should build")
}

fn write_source(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).expect("write source file");
    path
}

#[test]
fn test_help_flag() {
    lusc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: lusc"));
}

#[test]
fn test_version_flag() {
    lusc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lusc"));
}

#[test]
fn test_missing_input_file() {
    lusc()
        .arg("nao_existe.lus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read input file"));
}

#[test]
fn test_unknown_option() {
    lusc()
        .arg("--turbo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option"));
}

#[test]
fn test_compile_to_output_file() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "ola.lus", "funcao principal() { escreva(\"Ola\") }");
    let output = dir.path().join("ola.py");

    lusc()
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("compilation succeeded"));

    let python = std::fs::read_to_string(&output).expect("output file should exist");
    assert!(python.contains("def principal():"));
    assert!(python.contains("print(\"Ola\", sep='')"));
}

#[test]
fn test_compile_failure_produces_no_output_file() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        &dir,
        "ruim.lus",
        "funcao principal() { var x: inteiro = \"hi\" }",
    );
    let output = dir.path().join("ruim.py");

    lusc()
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("SEMANTIC ERROR"))
        .stderr(predicate::str::contains("compilation failed"));

    assert!(!output.exists(), "no output may be written on failure");
}

#[test]
fn test_lex_error_is_framed() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "lex.lus", "var x = @");

    lusc()
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("LEX ERROR at line 1"))
        .stderr(predicate::str::contains("unrecognized character '@'"));
}

#[test]
fn test_parse_errors_report_several() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "sintaxe.lus", "var = 1\nvar x: inteiro = )\n");

    let assert = lusc().arg(&source).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.matches("PARSE ERROR").count() >= 2, "{}", stderr);
}

#[test]
fn test_tokens_dump() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "t.lus", "funcao principal() { }");

    lusc()
        .arg(&source)
        .arg("--tokens")
        .assert()
        .success()
        .stderr(predicate::str::contains("Function"))
        .stderr(predicate::str::contains("L1:C1"));
}

#[test]
fn test_ast_dump_shows_tree_and_symbols() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "arvore.lus", "funcao principal() { var x = 1 }");

    lusc()
        .arg(&source)
        .arg("--ast")
        .assert()
        .success()
        .stderr(predicate::str::contains("Program"))
        .stderr(predicate::str::contains("Function principal()"))
        .stderr(predicate::str::contains("paraInteiro"));
}

#[test]
fn test_ast_json_export() {
    let dir = TempDir::new().unwrap();
    let source = write_source(&dir, "j.lus", "funcao principal() { escreva(1) }");
    let json_path = dir.path().join("ast.json");

    lusc()
        .arg(&source)
        .arg("--ast-json")
        .arg(&json_path)
        .assert()
        .success();

    let json = std::fs::read_to_string(&json_path).expect("JSON file should exist");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert!(parsed.get("decls").is_some());
}

#[test]
fn test_warnings_do_not_fail_the_build() {
    let dir = TempDir::new().unwrap();
    // No `principal` function: a warning, not an error.
    let source = write_source(&dir, "aviso.lus", "var x = 1");

    lusc()
        .arg(&source)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning"))
        .stderr(predicate::str::contains("compilation succeeded with 1 warning(s)"));
}
