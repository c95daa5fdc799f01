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

//! Tests for compound assignment operators.
//!
//! Tests cover:
//! - Parser: every compound operator is recognized
//! - Code Generator: locals, fields of `this`, fields of other objects and
//!   array elements

use test_case::test_case;
use yava::ast::{AssignOp, StatementKind, TypeDecl};
use yava::{lexer, parser, ErrorCode};

// ============================================================================
// Helper Functions
// ============================================================================

fn in_main(body: &str) -> String {
    format!(
        "class Main {{ public static void main(String[] args) {{ {} }} }}",
        body
    )
}

/// The operator of the first assignment statement in `main`.
fn parse_assign_op(body: &str) -> AssignOp {
    let tokens = lexer::tokenize(&in_main(body)).unwrap();
    let program = parser::parse(&tokens).unwrap();
    let TypeDecl::Class(class) = &program.declarations[0] else {
        panic!("expected class");
    };
    let main = class.main.as_ref().expect("expected main");

    main.body
        .statements
        .iter()
        .find_map(|stmt| match &stmt.kind {
            StatementKind::Assignment(assign) => Some(assign.op),
            _ => None,
        })
        .expect("expected assignment statement")
}

/// The instructions of `main`.
fn main_code(body: &str) -> Vec<String> {
    let output = yava::compile(&in_main(body)).unwrap();
    output
        .lines()
        .skip_while(|line| !line.starts_with(".method public static main"))
        .skip(2)
        .take_while(|line| *line != ".end code")
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Parser Tests
// ============================================================================

#[test_case("x = 1;", AssignOp::Assign; "assign")]
#[test_case("x += 1;", AssignOp::AddAssign; "add")]
#[test_case("x -= 1;", AssignOp::SubAssign; "sub")]
#[test_case("x *= 1;", AssignOp::MulAssign; "mul")]
#[test_case("x /= 1;", AssignOp::DivAssign; "div")]
#[test_case("x %= 1;", AssignOp::RemAssign; "rem")]
fn test_parse_assign_op(statement: &str, expected: AssignOp) {
    assert_eq!(parse_assign_op(&format!("int x = 0; {}", statement)), expected);
}

// ============================================================================
// Local Variables
// ============================================================================

#[test_case("+=", "iadd"; "add")]
#[test_case("-=", "isub"; "sub")]
#[test_case("*=", "imul"; "mul")]
#[test_case("/=", "idiv"; "div")]
#[test_case("%=", "irem"; "rem")]
fn test_local_compound(op: &str, instruction: &str) {
    assert_eq!(
        main_code(&format!("int x = 9; x {} 7;", op)),
        vec!["bipush 9", "istore_1", "iload_1", "bipush 7", instruction, "istore_1", "return"]
    );
}

#[test]
fn test_compound_with_expression_value() {
    assert_eq!(
        main_code("int x = 1; int y = 2; x -= y * 3;"),
        vec![
            "iconst_1",
            "istore_1",
            "iconst_2",
            "istore_2",
            "iload_1",
            "iload_2",
            "iconst_3",
            "imul",
            "isub",
            "istore_1",
            "return",
        ]
    );
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_field_of_this() {
    let output = yava::compile("class A { int n; void f() { this.n *= 2; } }").unwrap();
    assert!(output.contains(
        ".method public f : ()V\n\
         .code stack 3 locals 1\n\
         aload_0\n\
         dup\n\
         getfield Field A n I\n\
         iconst_2\n\
         imul\n\
         putfield Field A n I\n\
         return\n"
    ));
}

#[test]
fn test_field_of_other_object() {
    let output = yava::compile(
        "class P { int n; }
         class A { void f(P p) { p.n %= 4; } }",
    )
    .unwrap();
    assert!(output.contains(
        ".method public f : (LP;)V\n\
         .code stack 3 locals 2\n\
         aload_1\n\
         dup\n\
         getfield Field P n I\n\
         iconst_4\n\
         irem\n\
         putfield Field P n I\n\
         return\n"
    ));
}

#[test]
fn test_plain_field_assignment_has_no_read() {
    let output = yava::compile("class P { int n; void f(P p) { p.n = 4; } }").unwrap();
    assert!(output.contains("aload_1\niconst_4\nputfield Field P n I\nreturn\n"));
}

// ============================================================================
// Array Elements
// ============================================================================

#[test]
fn test_int_array_element() {
    assert_eq!(
        main_code("int[] xs = new int[2]; xs[1] /= 2;"),
        vec![
            "iconst_2",
            "newarray int",
            "astore_1",
            "aload_1",
            "iconst_1",
            "dup2",
            "iaload",
            "iconst_2",
            "idiv",
            "iastore",
            "return",
        ]
    );
}

#[test]
fn test_char_array_element() {
    assert_eq!(
        main_code("char[] cs = new char[2]; cs[0] += 1;"),
        vec![
            "iconst_2",
            "newarray char",
            "astore_1",
            "aload_1",
            "iconst_0",
            "dup2",
            "caload",
            "iconst_1",
            "iadd",
            "castore",
            "return",
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_string_compound_is_unsupported() {
    let errors = yava::compile(&in_main("String s = \"a\"; s += \"b\";")).unwrap_err();
    assert_eq!(errors[0].code, ErrorCode::UnsupportedOperation);
}

#[test]
fn test_compound_on_call_is_invalid_target() {
    let errors = yava::compile("class A { int f() { return 1; } void g() { f() += 1; } }")
        .unwrap_err();
    assert_eq!(errors[0].code, ErrorCode::InvalidAssignmentTarget);
}
