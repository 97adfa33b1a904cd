//! End-to-end compile-and-run scenarios.
//!
//! Each test compiles a program and executes the emitted Python with
//! `python3`, asserting on the observed stdout. Compiler chatter goes to
//! stderr, so stdout carries exactly the program's own output.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lusc() -> Command {
    Command::cargo_bin("lusc").expect("lusc binary should build")
}

fn run_program(source: &str) -> assert_cmd::assert::Assert {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("programa.lus");
    std::fs::write(&path, source).unwrap();
    lusc().arg(&path).arg("--run").assert()
}

#[test]
fn test_hello() {
    run_program("funcao principal(){ escreva(\"Ola\") }")
        .success()
        .stdout("Ola\n");
}

#[test]
fn test_arithmetic_precedence() {
    run_program("funcao principal(){ escreva(2 + 3 * 4) }")
        .success()
        .stdout("14\n");
}

#[test]
fn test_inclusive_for_accumulator() {
    run_program(
        "funcao principal(){ var s:inteiro=0; para i de 1 ate 10 { s = s + i }; escreva(s) }",
    )
    .success()
    .stdout("55\n");
}

#[test]
fn test_recursion() {
    run_program(
        "funcao fat(n:inteiro):inteiro{ se (n<=1){ retorna 1 }; retorna n*fat(n-1) } \
         funcao principal(){ escreva(fat(5)) }",
    )
    .success()
    .stdout("120\n");
}

#[test]
fn test_type_error_blocks_execution() {
    run_program("funcao principal(){ var x:inteiro = \"hi\" }")
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("SEMANTIC ERROR at line 1"))
        .stderr(predicate::str::contains("cannot assign 'texto' to 'inteiro'"));
}

#[test]
fn test_assignment_to_constant_fails() {
    run_program("funcao principal(){ const P:real=3.14; P = 2.0 }")
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("SEMANTIC ERROR"))
        .stderr(predicate::str::contains("'P'"));
}

#[test]
fn test_compound_assign_equivalence() {
    let compound =
        run_program("funcao principal(){ var x:inteiro=10; x += 5; x *= 2; escreva(x) }");
    compound.success().stdout("30\n");

    let expanded =
        run_program("funcao principal(){ var x:inteiro=10; x = x + 5; x = x * 2; escreva(x) }");
    expanded.success().stdout("30\n");
}

#[test]
fn test_for_step_and_zero_iterations() {
    run_program(
        "funcao principal(){ var n:inteiro=0\n\
         para i de 0 ate 10 passo 2 { n = n + 1 }\n\
         escreva(n)\n\
         para j de 5 ate 1 { n = n + 100 }\n\
         escreva(n) }",
    )
    .success()
    .stdout("6\n6\n");
}

#[test]
fn test_while_and_logic() {
    run_program(
        "funcao principal(){\n\
         var c:inteiro = 3\n\
         enquanto (c > 0 e verdadeiro) {\n\
             escreva(c)\n\
             c -= 1\n\
         }\n\
         }",
    )
    .success()
    .stdout("3\n2\n1\n");
}

#[test]
fn test_senaose_chain_at_runtime() {
    run_program(
        "funcao classifica(n:inteiro) {\n\
         se (n > 0) { escreva(\"positivo\") }\n\
         senaose (n == 0) { escreva(\"zero\") }\n\
         senao { escreva(\"negativo\") }\n\
         }\n\
         funcao principal(){ classifica(3) classifica(0) classifica(-7) }",
    )
    .success()
    .stdout("positivo\nzero\nnegativo\n");
}

#[test]
fn test_builtins_at_runtime() {
    run_program(
        "funcao principal(){\n\
         escreva(paraInteiro(\"41\") + 1)\n\
         escreva(tamanho(\"abcd\"))\n\
         escreva(arredonda(2.5e0 + 0.1))\n\
         }",
    )
    .success()
    .stdout("42\n4\n3\n");
}

#[test]
fn test_text_concatenation_at_runtime() {
    run_program("funcao principal(){ escreva(\"Ola, \" + \"Mundo\" + \"!\") }")
        .success()
        .stdout("Ola, Mundo!\n");
}

#[test]
fn test_print_concatenates_arguments() {
    run_program("funcao principal(){ escreva(\"a=\", 1, \" b=\", 2) }")
        .success()
        .stdout("a=1 b=2\n");
}

#[test]
fn test_division_is_real() {
    run_program("funcao principal(){ escreva(7 / 2) }")
        .success()
        .stdout("3.5\n");
}

#[test]
fn test_power_right_associative_at_runtime() {
    // 2 ** 3 ** 2 = 2 ** 9 = 512
    run_program("funcao principal(){ escreva(2 ** 3 ** 2) }")
        .success()
        .stdout("512\n");
}

#[test]
fn test_parenthesization_is_behavior_neutral() {
    run_program("funcao principal(){ escreva(((2)) + (((3 * 4))) ) }")
        .success()
        .stdout("14\n");
}

#[test]
fn test_demo_runs_without_arguments() {
    lusc()
        .assert()
        .success()
        .stdout(predicate::str::contains("Linguagem Lusitano"))
        .stdout(predicate::str::contains("6! = 720"))
        .stdout(predicate::str::contains("Soma de 1 ate 100: 5050"));
}

#[test]
fn test_lex_error_aborts_before_parse() {
    run_program("funcao principal(){ escreva(!x) }")
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("LEX ERROR"))
        .stderr(predicate::str::contains("'nao' or '!='"));
}
