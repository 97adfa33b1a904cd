//! Edge-case and property tests for the scanner.

use proptest::prelude::*;

use crate::token::TokenKind;
use crate::tokenize;

#[test]
fn test_full_program_token_count() {
    let source = r#"
funcao fatorial(n: inteiro): inteiro {
    se (n <= 1) {
        retorna 1
    }
    retorna n * fatorial(n - 1)
}
"#;
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
        1
    );
}

#[test]
fn test_crlf_line_endings() {
    let tokens = tokenize("var x = 1\r\nvar y = 2\r\n").unwrap();
    let second_var = tokens.iter().filter(|t| t.kind == TokenKind::Var).nth(1).unwrap();
    assert_eq!(second_var.span.line, 2);
    assert_eq!(second_var.span.column, 1);
}

#[test]
fn test_adjacent_operators_and_operands() {
    let tokens = tokenize("a+b*c").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_inside_string_is_text() {
    let tokens = tokenize("\"funcao se enquanto\"").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::TextLiteral);
    assert_eq!(tokens.len(), 2);
}

#[test]
fn test_only_whitespace_and_comments() {
    let tokens = tokenize("  \t\n// so comentario\n/* bloco */\n").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

proptest! {
    /// Lexing always terminates with exactly one trailing Eof, or fails.
    #[test]
    fn prop_scan_terminates_with_single_eof(source in "\\PC{0,200}") {
        if let Ok(tokens) = tokenize(&source) {
            prop_assert!(!tokens.is_empty());
            prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
            let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eof_count, 1);
        }
    }

    /// No token except Eof has an empty lexeme.
    #[test]
    fn prop_non_eof_lexemes_nonempty(source in "\\PC{0,200}") {
        if let Ok(tokens) = tokenize(&source) {
            for token in &tokens {
                if token.kind != TokenKind::Eof {
                    prop_assert!(!token.lexeme.is_empty());
                }
            }
        }
    }

    /// Token start offsets are non-decreasing in source order.
    #[test]
    fn prop_positions_monotonic(source in "[a-z0-9+*/(){}=<>,;: \\n\"]{0,200}") {
        if let Ok(tokens) = tokenize(&source) {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].span.start <= pair[1].span.start);
                prop_assert!(
                    (pair[0].span.line, pair[0].span.column)
                        <= (pair[1].span.line, pair[1].span.column)
                );
            }
        }
    }
}
