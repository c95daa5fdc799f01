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

//! Lexer module for the Yava compiler.
//!
//! This module tokenizes Yava source code into a stream of tokens.
//! It handles:
//! - Unicode escapes and line terminators (see [`source`])
//! - Keywords and identifiers
//! - Number literals (decimal, octal, hex with `0x`, binary with `0b`)
//! - String and character literals
//! - Operators and separators
//! - Comments (`// ...` and `/* ... */`)
//!
//! All lexical errors are fatal: the first one aborts tokenization.

mod helpers;
mod identifiers;
mod numbers;
mod operators;
pub mod source;
mod strings;
mod tokens;

pub use tokens::{Token, TokenKind, KEYWORDS};

use crate::error::{CompileError, ErrorCode, Position};
use helpers::LexerHelpers;
use identifiers::{is_identifier_start, IdentifierScanner};
use numbers::NumberScanner;
use operators::OperatorScanner;
use source::SourceChar;
use strings::StringScanner;

/// The lexer state for tokenizing source code.
pub struct Lexer {
    /// The decoded character stream.
    chars: Vec<SourceChar>,
    /// Index of the current character.
    index: usize,
    /// Position behind the last decoded character.
    end: Position,
    /// Decoding error, reported once the characters before it are consumed.
    pending: Option<CompileError>,
}

impl Lexer {
    /// Create a new lexer for the given source code.
    pub fn new(source: &str) -> Self {
        let decoded = source::decode(source);
        Self {
            chars: decoded.chars,
            index: 0,
            end: decoded.end,
            pending: decoded.error,
        }
    }

    /// Get the next token from the source.
    ///
    /// Returns `Ok(None)` at the end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, CompileError> {
        match self.scan_token() {
            Ok(Some(token)) => Ok(Some(token)),
            Ok(None) => match self.pending.take() {
                Some(error) => Err(error),
                None => Ok(None),
            },
            // running into a truncated stream is reported as the decoding error
            Err(error) if self.is_at_end() => Err(self.pending.take().unwrap_or(error)),
            Err(error) => Err(error),
        }
    }

    /// Scan one token after skipping whitespace and comments.
    fn scan_token(&mut self) -> Result<Option<Token>, CompileError> {
        self.skip_whitespace_and_comments()?;

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        if is_identifier_start(c) {
            return Ok(Some(self.scan_identifier()));
        }

        if c.is_ascii_digit() || (c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit()))
        {
            return self.scan_number().map(Some);
        }

        match c {
            '"' => self.scan_string().map(Some),
            '\'' => self.scan_char().map(Some),
            _ => {
                let position = self.position();
                match self.scan_operator() {
                    Some(token) => Ok(Some(token)),
                    None => {
                        self.advance();
                        Err(self.error_at(
                            ErrorCode::InvalidCharacter,
                            format!("Unexpected character '{}'", c.escape_default()),
                            position,
                        ))
                    }
                }
            }
        }
    }

    /// Skip whitespace, line comments and block comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), CompileError> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(' ' | '\t' | '\n' | '\r' | '\u{c}'), _) => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.advance() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.position();
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(self
                                    .error_at(
                                        ErrorCode::UnterminatedComment,
                                        "Unterminated block comment",
                                        start,
                                    )
                                    .with_hint("Close the comment with '*/'"));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }
}

/// Tokenize the entire source code into a vector of tokens.
///
/// There is no end-of-file token; the vector simply ends.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}
