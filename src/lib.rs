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

//! Yava Compiler Library
//!
//! This library compiles a small Java-like language into Krakatau assembly
//! text for the JVM.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tokenization of source code
//! - [`parser`] - Parsing tokens into an AST
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`analyzer`] - Type and name analysis
//! - [`codegen`] - Krakatau assembly generation
//! - [`output`] - Writing assembly files
//! - [`runner`] - The external assembler and file watching
//!
//! # Example
//!
//! ```no_run
//! use yava::{analyzer, codegen, lexer, output, parser};
//! use std::path::Path;
//!
//! fn compile(source: &str, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = lexer::tokenize(source)?;
//!     let ast = parser::parse(&tokens)?;
//!     let analysis = analyzer::analyze(&ast).map_err(|errors| errors[0].clone())?;
//!     let text = codegen::generate(&ast, &analysis)?;
//!     output::write_assembly(&text, dir, "Main")?;
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod runner;

// Re-export commonly used types
pub use ast::Program;
pub use error::{format_error, CompileError, ErrorCode, Position, Result, SourceLocation};
pub use lexer::Token;

/// The version of the Yava compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "Yava";

/// Compile source code to Krakatau assembly text.
///
/// Lexical, syntax and code generation errors abort at the first error and
/// come back as a single diagnostic. Semantic analysis reports every error
/// of the failing pass.
///
/// # Example
///
/// ```no_run
/// let source = r#"
/// class Hello {
///     public static void main(String[] args) {
///         System.out.println("Hello, World!");
///     }
/// }
/// "#;
///
/// match yava::compile(source) {
///     Ok(text) => print!("{}", text),
///     Err(errors) => eprintln!("{} error(s)", errors.len()),
/// }
/// ```
pub fn compile(source: &str) -> std::result::Result<String, Vec<CompileError>> {
    let tokens = lexer::tokenize(source).map_err(|e| vec![e])?;
    let ast = parser::parse(&tokens).map_err(|e| vec![e])?;
    let analysis = analyzer::analyze(&ast)?;
    codegen::generate(&ast, &analysis).map_err(|e| vec![e])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "Yava");
    }

    #[test]
    fn test_compile_hello() {
        let text = compile(
            "class Hello { public static void main(String[] args) { System.out.println(\"hi\"); } }",
        )
        .unwrap();
        assert!(text.starts_with(".version 49 0\n.class public Hello\n"));
        assert!(text.ends_with(".end class\n"));
    }

    #[test]
    fn test_compile_reports_every_semantic_error() {
        let errors = compile("class A { Foo x; Bar y; }").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.code == ErrorCode::UndefinedType));
    }

    #[test]
    fn test_compile_syntax_error() {
        let errors = compile("class A {").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnexpectedEndOfFile);
    }
}
