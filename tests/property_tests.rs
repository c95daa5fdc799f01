// Yava - A compiler for a small Java-like language emitting JVM assembly
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Property-based tests for the Yava compiler.
//!
//! These tests verify invariants that should hold for all inputs, using
//! proptest for random input generation.

use proptest::prelude::*;
use yava::codegen::constants::int_constant;
use yava::codegen::emit::OperandStack;
use yava::lexer::{self, TokenKind};
use yava::ErrorCode;

/// Kind and text of every token, positions dropped.
fn shapes(source: &str) -> Option<Vec<(TokenKind, String)>> {
    lexer::tokenize(source)
        .ok()
        .map(|tokens| tokens.into_iter().map(|t| (t.kind, t.text)).collect())
}

fn token_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_$][a-zA-Z0-9_$]{0,6}",
        "[1-9][0-9]{0,5}",
        "0x[0-9a-fA-F]{1,4}",
        "\"([a-zA-Z0-9 ,.!?']|\\\\[btnfr\"'\\\\])*\"",
        "'([a-zA-Z0-9 ]|\\\\[btnfr\"'\\\\])'",
        prop::sample::select(vec![
            "+", "-", "*", "/", "%", "++", "--", "<", ">", "<=", ">=", "==", "!=", "&&", "||",
            "!", "=", "+=", "-=", ">>>", "<<=", "?", ":", ";", ",", ".", "(", ")", "[", "]",
            "{", "}",
        ])
        .prop_map(str::to_string),
    ]
}

// ============================================================================
// Lexer Properties
// ============================================================================

proptest! {
    /// Re-lexing the reconstructed source text yields the same tokens.
    #[test]
    fn prop_lexer_round_trip(pieces in prop::collection::vec(token_piece(), 0..30)) {
        let source = pieces.join(" ");
        if let Ok(tokens) = lexer::tokenize(&source) {
            let rebuilt: Vec<String> = tokens.iter().map(|t| t.source_text()).collect();
            let original: Vec<(TokenKind, String)> =
                tokens.into_iter().map(|t| (t.kind, t.text)).collect();
            prop_assert_eq!(shapes(&rebuilt.join(" ")), Some(original));
        }
    }

    /// Identifiers that are not reserved words lex to a single identifier.
    #[test]
    fn prop_identifier_is_single_token(name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,12}") {
        let tokens = lexer::tokenize(&name).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert!(matches!(
            tokens[0].kind,
            TokenKind::Identifier
                | TokenKind::Keyword
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
        ));
        prop_assert_eq!(&tokens[0].text, &name);
    }

    /// Token positions increase through the source.
    #[test]
    fn prop_positions_increase(pieces in prop::collection::vec(token_piece(), 0..30)) {
        let source = pieces.join("\n");
        if let Ok(tokens) = lexer::tokenize(&source) {
            for pair in tokens.windows(2) {
                let (a, b) = (pair[0].position, pair[1].position);
                prop_assert!((a.line, a.column) < (b.line, b.column));
            }
        }
    }

    /// The compiler never panics, whatever the input.
    #[test]
    fn prop_compile_never_panics(source in "[ -~\\n]{0,200}") {
        let _ = yava::compile(&source);
    }
}

// ============================================================================
// Code Generation Properties
// ============================================================================

proptest! {
    /// Constant encoding depends only on the value range.
    #[test]
    fn prop_int_constant_form(value in any::<i32>()) {
        let instruction = int_constant(value);
        let expected = match value {
            0..=5 => "iconst_",
            6..=255 => "bipush ",
            _ => "ldc ",
        };
        prop_assert!(instruction.starts_with(expected), "{} -> {}", value, instruction);
        prop_assert!(instruction.ends_with(&value.to_string()));
    }

    /// The recorded maximum is the largest prefix sum of the depth changes.
    #[test]
    fn prop_stack_max_is_prefix_sum_max(deltas in prop::collection::vec(-3i32..=3, 0..50)) {
        let mut stack = OperandStack::new();
        let mut depth = 0i32;
        let mut expected = 0i32;

        for delta in deltas {
            if delta >= 0 {
                stack.push(delta as u16);
                depth += delta;
            } else {
                let count = (-delta).min(depth);
                stack.pop(count as u16);
                depth -= count;
            }
            expected = expected.max(depth);
            prop_assert_eq!(i32::from(stack.depth()), depth);
        }

        prop_assert_eq!(i32::from(stack.max()), expected);
    }

    /// Every allocated label is defined exactly once, numbered from zero.
    #[test]
    fn prop_labels_are_never_reused(statements in prop::collection::vec(any::<bool>(), 1..8)) {
        let body: String = statements
            .iter()
            .map(|&is_while| if is_while {
                "while (n < 3) { n += 1; }"
            } else {
                "if (n == 1) { n = 2; } else { n = 3; }"
            })
            .collect();
        let source = format!(
            "class A {{ public static void main(String[] args) {{ int n = 0; {} }} }}",
            body
        );
        let output = yava::compile(&source).unwrap();

        let mut labels: Vec<u32> = output
            .lines()
            .filter_map(|line| line.split(':').next())
            .filter_map(|head| head.strip_prefix('L'))
            .filter_map(|number| number.parse().ok())
            .collect();
        labels.sort_unstable();
        let expected: Vec<u32> = (0..labels.len() as u32).collect();
        prop_assert_eq!(labels, expected);
    }
}

// ============================================================================
// Scope Properties
// ============================================================================

proptest! {
    /// One declaration per nested block never conflicts.
    #[test]
    fn prop_nested_declarations_do_not_conflict(depth in 1usize..8) {
        let body = format!("{}{}", "{ int x = 1; ".repeat(depth), "}".repeat(depth));
        let source = format!("class A {{ void f() {{ {} }} }}", body);
        prop_assert!(yava::compile(&source).is_ok());
    }

    /// A repeated declaration in one block is reported exactly once.
    #[test]
    fn prop_duplicate_declaration_reported_once(depth in 0usize..6) {
        let body = format!(
            "{}int x = 1; int x = 2;{}",
            "{ ".repeat(depth),
            " }".repeat(depth)
        );
        let source = format!("class A {{ void f() {{ {} }} }}", body);
        let errors = yava::compile(&source).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].code, ErrorCode::VariableAlreadyDeclared);
    }
}
