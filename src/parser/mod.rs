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

//! Parser module for the Yava compiler.
//!
//! This module parses a token stream into an Abstract Syntax Tree (AST).
//! It is a recursive descent parser with one token of lookahead plus an
//! explicit peek further ahead, used only to tell declarations from
//! statements. There is no error recovery: the first error aborts parsing.
//!
//! # Module Structure
//!
//! - `control_flow` - if, while, for and switch (ControlFlowParser trait)
//! - `declarations` - Classes, interfaces and members (DeclarationParser trait)
//! - `expressions` - Expressions and access chains (ExpressionParser trait)
//! - `helpers` - Token stream navigation and error handling (ParserHelpers trait)
//! - `statements` - Blocks and simple statements (StatementParser trait)
//! - `types` - Type references (TypeParser trait)

// Submodules
pub mod control_flow;
pub mod declarations;
pub mod expressions;
pub mod helpers;
pub mod statements;
pub mod types;

// Internal imports from submodules
use declarations::DeclarationParser;
use helpers::ParserHelpers;

use crate::ast::Program;
use crate::error::CompileError;
use crate::lexer::Token;

/// The parser state.
pub struct Parser<'a> {
    /// The token stream to parse.
    pub(crate) tokens: &'a [Token],
    /// Current position in the token stream.
    pub(crate) position: usize,
    /// Next node id to hand out.
    pub(crate) id_counter: u32,
    /// Number of enclosing loops.
    pub(crate) loop_depth: usize,
    /// Number of enclosing loops and switches.
    pub(crate) breakable_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given token stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            id_counter: 0,
            loop_depth: 0,
            breakable_depth: 0,
        }
    }

    // ========================================
    // Program Parsing
    // ========================================

    /// Parse the complete program.
    pub fn parse(&mut self) -> Result<Program, CompileError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.declarations.push(self.parse_type_declaration()?);
        }

        Ok(program)
    }
}

/// Parse a token stream into a program AST.
pub fn parse(tokens: &[Token]) -> Result<Program, CompileError> {
    let mut parser = Parser::new(tokens);
    parser.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{pretty_print, MethodKind, TypeDecl};
    use crate::error::{ErrorCode, Position};
    use crate::lexer::tokenize;

    /// Helper to parse source code directly.
    fn parse_source(source: &str) -> Result<Program, CompileError> {
        let tokens = tokenize(source)?;
        parse(&tokens)
    }

    fn error_code(source: &str) -> ErrorCode {
        parse_source(source).unwrap_err().code
    }

    // ========================================
    // Parser Creation Tests
    // ========================================

    #[test]
    fn test_parser_creation() {
        let tokens = vec![];
        let parser = Parser::new(&tokens);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_empty_program() {
        let program = parse_source("").unwrap();
        assert!(program.declarations.is_empty());
        assert_eq!(pretty_print(&program), "(#program :declarations [\n\t\n])");
    }

    // ========================================
    // Classes
    // ========================================

    #[test]
    fn test_class_with_members() {
        let program = parse_source(
            "public class Point extends Shape implements Movable {
                int x = 1;
                private String name;
                Point(int x) { this.x = x; }
                public int getX() { return x; }
                void move(int dx, int dy) {}
                public static void main(String[] args) {}
            }",
        )
        .unwrap();

        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        assert_eq!(class.name, "Point");
        assert_eq!(class.extends.as_deref(), Some("Shape"));
        assert_eq!(class.implements.as_deref(), Some("Movable"));
        assert_eq!(class.properties.len(), 2);
        assert_eq!(class.constructors.len(), 1);
        assert_eq!(class.constructors[0].signature.kind, MethodKind::Constructor);
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.methods[1].signature.signature(), "move(int, int)");
        assert!(class.main.is_some());
    }

    #[test]
    fn test_class_pretty_print() {
        let program = parse_source("class A { int x; void f() {} }").unwrap();
        assert_eq!(
            pretty_print(&program.declarations[0]),
            "(#class A\n\t:props [(#property-decl public x :type int)] \
             \n\t:methods [(#method-decl (#method-signature public f :type void :param []) \
             (#stmt-block))] \n\t:constructor [])"
        );
    }

    #[test]
    fn test_interface() {
        let program =
            parse_source("interface Shape { int area(); void scale(int factor); }").unwrap();
        assert_eq!(
            pretty_print(&program.declarations[0]),
            "(#interface Shape \n\t:methods [(#method-signature public area :type int :param []), \
             (#method-signature public scale :type void :param [int])])"
        );
    }

    #[test]
    fn test_positions() {
        let program = parse_source("class A {\n  int x;\n}").unwrap();
        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        assert_eq!(class.position, Position::new(1, 0));
        assert_eq!(class.properties[0].declaration.position, Position::new(2, 2));
    }

    #[test]
    fn test_node_ids_are_unique() {
        let program = parse_source(
            "class A { void f() { { } for (;;) { } } }
             interface I { void g(); }",
        )
        .unwrap();
        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        let TypeDecl::Interface(interface) = &program.declarations[1] else {
            panic!("expected interface");
        };
        let method = &class.methods[0];
        let ids = [
            class.id,
            method.signature.id,
            method.body.id,
            interface.id,
            interface.methods[0].id,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // ========================================
    // Errors
    // ========================================

    #[test]
    fn test_top_level_errors() {
        assert_eq!(error_code("int x;"), ErrorCode::UnexpectedToken);
        assert_eq!(error_code("class { }"), ErrorCode::ExpectedIdentifier);
        assert_eq!(error_code("class A {"), ErrorCode::UnexpectedEndOfFile);
    }

    #[test]
    fn test_main_errors() {
        assert_eq!(
            error_code("class A { static int main(String[] a) {} }"),
            ErrorCode::InvalidMainSignature
        );
        assert_eq!(
            error_code("class A { static void run(String[] a) {} }"),
            ErrorCode::InvalidMainSignature
        );
        assert_eq!(
            error_code("class A { private static void main(String[] a) {} }"),
            ErrorCode::InvalidMainSignature
        );
        assert_eq!(
            error_code("class A { static void main(int a) {} }"),
            ErrorCode::InvalidMainSignature
        );
        assert_eq!(
            error_code(
                "class A { static void main(String[] a) {} static void main(String[] b) {} }"
            ),
            ErrorCode::DuplicateMainMethod
        );
    }

    #[test]
    fn test_void_property() {
        assert_eq!(error_code("class A { void x; }"), ErrorCode::UnexpectedToken);
    }

    #[test]
    fn test_lexer_errors_pass_through() {
        assert_eq!(error_code("class A { # }"), ErrorCode::InvalidCharacter);
    }
}
