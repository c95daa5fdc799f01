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

//! Error types for the Yava compiler.
//!
//! This module defines all error types used throughout the compiler,
//! including lexical, syntax, semantic and code generation errors.

use std::fmt;
use thiserror::Error;

/// Number of columns a tab character advances.
pub const TAB_WIDTH: usize = 4;

/// A position in the source code.
///
/// Lines start at 1, columns start at 0. A tab advances the column by
/// [`TAB_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a file.
    pub fn start() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Error codes for the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexical errors (E001-E020)
    InvalidCharacter,
    InvalidUnicodeEscape,
    InvalidLineTerminator,
    UnterminatedComment,
    UnterminatedString,
    UnterminatedCharLiteral,
    InvalidEscapeSequence,
    EmptyCharLiteral,
    InvalidNumberLiteral,

    // Syntax errors (E100-E145)
    UnexpectedToken,
    UnexpectedEndOfFile,
    ExpectedExpression,
    ExpectedStatement,
    ExpectedIdentifier,
    ExpectedType,
    InvalidAssignmentTarget,
    InvalidMainSignature,
    DuplicateMainMethod,
    IntegerOutOfRange,
    UnsupportedLiteral,
    InvalidCaseLabel,
    BreakOutsideLoop,
    ContinueOutsideLoop,

    // Semantic errors (E200-E225)
    UndefinedType,
    TypeAlreadyDeclared,
    ExtendsNonClass,
    ImplementsNonInterface,
    CyclicInheritance,
    MissingInterfaceMethod,
    PropertyAlreadyDeclared,
    MethodAlreadyDeclared,
    MethodNameIsProperty,
    ParameterAlreadyDeclared,
    VariableAlreadyDeclared,
    UndefinedVariable,
    UndefinedMethod,
    ThisInStaticContext,
    TooManyLocals,

    // Code generation errors (E300-E301)
    UnresolvedSymbol,
    UnsupportedOperation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            // Lexical errors
            ErrorCode::InvalidCharacter => "E001",
            ErrorCode::InvalidUnicodeEscape => "E002",
            ErrorCode::InvalidLineTerminator => "E003",
            ErrorCode::UnterminatedComment => "E004",
            ErrorCode::UnterminatedString => "E010",
            ErrorCode::UnterminatedCharLiteral => "E011",
            ErrorCode::InvalidEscapeSequence => "E012",
            ErrorCode::EmptyCharLiteral => "E013",
            ErrorCode::InvalidNumberLiteral => "E020",

            // Syntax errors
            ErrorCode::UnexpectedToken => "E100",
            ErrorCode::UnexpectedEndOfFile => "E101",
            ErrorCode::ExpectedExpression => "E103",
            ErrorCode::ExpectedStatement => "E104",
            ErrorCode::ExpectedIdentifier => "E105",
            ErrorCode::ExpectedType => "E106",
            ErrorCode::InvalidAssignmentTarget => "E109",
            ErrorCode::InvalidMainSignature => "E110",
            ErrorCode::DuplicateMainMethod => "E111",
            ErrorCode::IntegerOutOfRange => "E120",
            ErrorCode::UnsupportedLiteral => "E121",
            ErrorCode::InvalidCaseLabel => "E122",
            ErrorCode::BreakOutsideLoop => "E144",
            ErrorCode::ContinueOutsideLoop => "E145",

            // Semantic errors
            ErrorCode::UndefinedType => "E200",
            ErrorCode::TypeAlreadyDeclared => "E201",
            ErrorCode::ExtendsNonClass => "E202",
            ErrorCode::ImplementsNonInterface => "E203",
            ErrorCode::CyclicInheritance => "E204",
            ErrorCode::MissingInterfaceMethod => "E205",
            ErrorCode::PropertyAlreadyDeclared => "E210",
            ErrorCode::MethodAlreadyDeclared => "E211",
            ErrorCode::MethodNameIsProperty => "E212",
            ErrorCode::ParameterAlreadyDeclared => "E220",
            ErrorCode::VariableAlreadyDeclared => "E221",
            ErrorCode::UndefinedVariable => "E222",
            ErrorCode::UndefinedMethod => "E223",
            ErrorCode::ThisInStaticContext => "E224",
            ErrorCode::TooManyLocals => "E225",

            // Code generation errors
            ErrorCode::UnresolvedSymbol => "E300",
            ErrorCode::UnsupportedOperation => "E301",
        }
    }

    /// Check if this code belongs to the lexical or syntax phase.
    pub fn is_fatal(&self) -> bool {
        self.code() < "E200"
    }
}

/// A compiler error with source location.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source position where the error occurred.
    pub position: Position,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, position: Position) -> Self {
        Self {
            code,
            message: message.into(),
            position,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with the content of the referenced line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed, tabs expanded).
    pub column: usize,
    /// The content of the line with tabs expanded.
    pub line_content: String,
}

impl SourceLocation {
    /// Look up the line a position points to.
    pub fn from_position(source: &str, position: Position) -> Self {
        let line_content = source
            .lines()
            .nth(position.line.saturating_sub(1))
            .unwrap_or("")
            .trim_end_matches('\r')
            .replace('\t', &" ".repeat(TAB_WIDTH));

        Self {
            line: position.line,
            column: position.column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_position(source, error.position);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    // Error header
    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));

    // Location, printed 1-based like every other tool
    output.push_str(&format!(
        "  --> {}:{}:{}\n",
        filename,
        loc.line,
        loc.column + 1
    ));

    // Source context
    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    // Point at the column
    output.push_str(&format!(
        "{:>width$} | {:>start$}^\n",
        "",
        "",
        width = line_num_width,
        start = loc.column
    ));

    // Hint if available
    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}

/// A collection of compile errors gathered by one pass.
#[derive(Debug, Default)]
pub struct Errors {
    errors: Vec<CompileError>,
}

impl Errors {
    /// Create a new empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: CompileError) {
        self.errors.push(error);
    }

    /// Record an error built from its parts.
    pub fn report(&mut self, code: ErrorCode, message: impl Into<String>, position: Position) {
        self.push(CompileError::new(code, message, position));
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get an iterator over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &CompileError> {
        self.errors.iter()
    }

    /// Convert into a vector of errors.
    pub fn into_vec(self) -> Vec<CompileError> {
        self.errors
    }
}

impl IntoIterator for Errors {
    type Item = CompileError;
    type IntoIter = std::vec::IntoIter<CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
