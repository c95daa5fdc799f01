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

//! Negative/Error tests for the Yava compiler.
//!
//! These tests verify that the compiler rejects invalid programs with the
//! right error code.

use yava::{compile, lexer, ErrorCode};
use test_case::test_case;

/// Compile and return the codes of every reported error.
fn error_codes(source: &str) -> Vec<ErrorCode> {
    compile(source)
        .expect_err("expected compilation to fail")
        .into_iter()
        .map(|e| e.code)
        .collect()
}

/// Wrap statements into the body of `main`.
fn in_main(body: &str) -> String {
    format!(
        "class Main {{ public static void main(String[] args) {{ {} }} }}",
        body
    )
}

// ============================================================================
// Lexer Error Tests
// ============================================================================

#[test_case("int # x;", ErrorCode::InvalidCharacter; "hash")]
#[test_case("int ` x;", ErrorCode::InvalidCharacter; "backtick")]
#[test_case("x /* never closed", ErrorCode::UnterminatedComment; "comment")]
#[test_case("\"abc\n\"", ErrorCode::UnterminatedString; "newline_in_string")]
#[test_case("\"abc", ErrorCode::UnterminatedString; "eof_in_string")]
#[test_case(r#""\q""#, ErrorCode::InvalidEscapeSequence; "invalid_escape")]
#[test_case("''", ErrorCode::EmptyCharLiteral; "empty_char")]
#[test_case("'ab'", ErrorCode::UnterminatedCharLiteral; "long_char")]
#[test_case("a\rb", ErrorCode::InvalidLineTerminator; "bare_cr")]
#[test_case("\\u12G4", ErrorCode::InvalidUnicodeEscape; "short_unicode_escape")]
#[test_case("0x", ErrorCode::InvalidNumberLiteral; "empty_hex")]
#[test_case("12abc", ErrorCode::InvalidNumberLiteral; "letter_after_digits")]
#[test_case("1_", ErrorCode::InvalidNumberLiteral; "trailing_separator")]
fn test_lexer_errors(source: &str, expected: ErrorCode) {
    let error = lexer::tokenize(source).unwrap_err();
    assert_eq!(error.code, expected);
}

// ============================================================================
// Parser Error Tests
// ============================================================================

#[test_case("int x;", ErrorCode::UnexpectedToken; "top_level_statement")]
#[test_case("class { }", ErrorCode::ExpectedIdentifier; "missing_class_name")]
#[test_case("class A {", ErrorCode::UnexpectedEndOfFile; "unclosed_class")]
#[test_case("class A { static void main(int a) {} }", ErrorCode::InvalidMainSignature; "main_params")]
#[test_case("class A { static int main(String[] a) {} }", ErrorCode::InvalidMainSignature; "main_return")]
#[test_case(
    "class A { static void main(String[] a) {} static void main(String[] b) {} }",
    ErrorCode::DuplicateMainMethod;
    "duplicate_main"
)]
fn test_declaration_errors(source: &str, expected: ErrorCode) {
    assert_eq!(error_codes(source), vec![expected]);
}

#[test_case("x;", ErrorCode::ExpectedStatement; "bare_value")]
#[test_case("1 + 2;", ErrorCode::ExpectedStatement; "bare_expression")]
#[test_case("int x = ;", ErrorCode::ExpectedExpression; "missing_initializer")]
#[test_case("f() = 1;", ErrorCode::InvalidAssignmentTarget; "assign_to_call")]
#[test_case("this = null;", ErrorCode::InvalidAssignmentTarget; "assign_to_this")]
#[test_case("int x = 2147483648;", ErrorCode::IntegerOutOfRange; "int_overflow")]
#[test_case("int x = 10L;", ErrorCode::UnsupportedLiteral; "long_literal")]
#[test_case("int x = 1.5;", ErrorCode::UnsupportedLiteral; "float_literal")]
#[test_case("switch (1) { case y: }", ErrorCode::InvalidCaseLabel; "case_identifier")]
#[test_case("break;", ErrorCode::BreakOutsideLoop; "break_outside")]
#[test_case("continue;", ErrorCode::ContinueOutsideLoop; "continue_outside")]
#[test_case("switch (1) { case 1: continue; }", ErrorCode::ContinueOutsideLoop; "continue_in_switch")]
fn test_statement_errors(body: &str, expected: ErrorCode) {
    assert_eq!(error_codes(&in_main(body)), vec![expected]);
}

// ============================================================================
// Type Analysis Error Tests
// ============================================================================

#[test_case("class A {} interface A {}", ErrorCode::TypeAlreadyDeclared; "duplicate_type")]
#[test_case("class String {}", ErrorCode::TypeAlreadyDeclared; "builtin_type")]
#[test_case("class A extends Missing {}", ErrorCode::UndefinedType; "missing_superclass")]
#[test_case("interface I {} class A extends I {}", ErrorCode::ExtendsNonClass; "extends_interface")]
#[test_case("class B {} class A implements B {}", ErrorCode::ImplementsNonInterface; "implements_class")]
#[test_case("class A extends int {}", ErrorCode::ExtendsNonClass; "extends_primitive")]
#[test_case("class A implements boolean {}", ErrorCode::ImplementsNonInterface; "implements_primitive")]
#[test_case("class A extends A {}", ErrorCode::CyclicInheritance; "self_extends")]
#[test_case("interface I { void f(); } class A implements I {}", ErrorCode::MissingInterfaceMethod; "missing_method")]
#[test_case("class A { int x; char x; }", ErrorCode::PropertyAlreadyDeclared; "duplicate_property")]
#[test_case("class A { void f() {} void f() {} }", ErrorCode::MethodAlreadyDeclared; "duplicate_method")]
#[test_case("class A { int f; void f() {} }", ErrorCode::MethodNameIsProperty; "method_named_like_property")]
#[test_case("class A { Missing f() {} }", ErrorCode::UndefinedType; "missing_return_type")]
fn test_type_errors(source: &str, expected: ErrorCode) {
    assert_eq!(error_codes(source), vec![expected]);
}

// ============================================================================
// Name Analysis Error Tests
// ============================================================================

#[test_case("int x; int x;", ErrorCode::VariableAlreadyDeclared; "duplicate_local")]
#[test_case("x = 1;", ErrorCode::UndefinedVariable; "undefined_variable")]
#[test_case("int y = x; int x;", ErrorCode::UndefinedVariable; "use_before_declaration")]
#[test_case("Missing m;", ErrorCode::UndefinedType; "undefined_local_type")]
#[test_case("Object o = new Missing();", ErrorCode::UndefinedType; "undefined_created_type")]
#[test_case("this.toString();", ErrorCode::ThisInStaticContext; "this_in_main")]
fn test_name_errors_in_main(body: &str, expected: ErrorCode) {
    let codes = error_codes(&in_main(body));
    assert!(codes.contains(&expected), "{:?}", codes);
}

#[test]
fn test_duplicate_parameter() {
    assert_eq!(
        error_codes("class A { void f(int a, int a) {} }"),
        vec![ErrorCode::ParameterAlreadyDeclared]
    );
}

#[test]
fn test_undefined_unqualified_method() {
    assert_eq!(
        error_codes("class A { void f() { g(); } }"),
        vec![ErrorCode::UndefinedMethod]
    );
}

#[test]
fn test_instance_members_in_main() {
    assert_eq!(
        error_codes(
            "class A { int x; void f() {}
               public static void main(String[] args) { x = 1; f(); } }"
        ),
        vec![ErrorCode::ThisInStaticContext, ErrorCode::ThisInStaticContext]
    );
}

#[test]
fn test_all_name_errors_are_collected() {
    let codes = error_codes(&in_main("a = 1; b = 2; int c; int c;"));
    assert_eq!(
        codes,
        vec![
            ErrorCode::UndefinedVariable,
            ErrorCode::UndefinedVariable,
            ErrorCode::VariableAlreadyDeclared,
        ]
    );
}

// ============================================================================
// Code Generation Error Tests
// ============================================================================

#[test_case("int x = 1 + \"a\";", ErrorCode::UnsupportedOperation; "add_string")]
#[test_case("if (1) {}", ErrorCode::UnsupportedOperation; "int_condition")]
#[test_case("String s = \"a\"; switch (s) { }", ErrorCode::UnsupportedOperation; "string_selector")]
#[test_case("boolean b = \"a\" < \"b\";", ErrorCode::UnsupportedOperation; "ordered_strings")]
#[test_case("System.out.flush();", ErrorCode::UnsupportedOperation; "unknown_print_method")]
#[test_case("Main m = new Main(); m.missing();", ErrorCode::UnresolvedSymbol; "missing_method")]
#[test_case("Main m = new Main(); int v = m.missing;", ErrorCode::UnresolvedSymbol; "missing_field")]
#[test_case("Main m = new Main(1);", ErrorCode::UnresolvedSymbol; "missing_constructor")]
fn test_codegen_errors(body: &str, expected: ErrorCode) {
    assert_eq!(error_codes(&in_main(body)), vec![expected]);
}
