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

//! String and character literal scanning for the lexer.
//!
//! This module handles scanning of:
//! - String literals (double-quoted)
//! - Character literals (single-quoted)
//! - Escape sequences (`\b \t \n \f \r \" \' \\` and octal escapes)

use super::helpers::LexerHelpers;
use super::tokens::TokenKind;
use super::Lexer;
use super::Token;
use crate::error::{CompileError, ErrorCode};

/// Trait for string and character scanning operations.
pub trait StringScanner {
    /// Scan a string literal. The current character is the opening `"`.
    fn scan_string(&mut self) -> Result<Token, CompileError>;

    /// Scan a character literal. The current character is the opening `'`.
    fn scan_char(&mut self) -> Result<Token, CompileError>;

    /// Scan an escape sequence. The current character is the backslash.
    fn scan_escape(&mut self) -> Result<char, CompileError>;
}

impl StringScanner for Lexer {
    fn scan_string(&mut self) -> Result<Token, CompileError> {
        let start = self.position();
        self.advance();

        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(CompileError::new(
                        ErrorCode::UnterminatedString,
                        "Unterminated string literal",
                        start,
                    )
                    .with_hint("Close the string with '\"' on the same line"));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => value.push(self.scan_escape()?),
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::new(TokenKind::StringLiteral, value, start))
    }

    fn scan_char(&mut self) -> Result<Token, CompileError> {
        let start = self.position();
        self.advance();

        let unterminated = || {
            CompileError::new(
                ErrorCode::UnterminatedCharLiteral,
                "Unterminated character literal",
                start,
            )
        };

        let value = match self.peek() {
            None | Some('\n') => return Err(unterminated()),
            Some('\'') => {
                return Err(CompileError::new(
                    ErrorCode::EmptyCharLiteral,
                    "Empty character literal",
                    start,
                ));
            }
            Some('\\') => self.scan_escape()?,
            Some(c) => {
                self.advance();
                c
            }
        };

        if !self.match_char('\'') {
            return Err(unterminated().with_hint("A character literal holds exactly one character"));
        }

        Ok(Token::new(TokenKind::CharLiteral, value.to_string(), start))
    }

    fn scan_escape(&mut self) -> Result<char, CompileError> {
        let position = self.position();
        self.advance();

        let escaped = match self.peek() {
            Some('b') => '\u{8}',
            Some('t') => '\t',
            Some('n') => '\n',
            Some('f') => '\u{c}',
            Some('r') => '\r',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some(first @ '0'..='7') => {
                // up to three digits when the first one is 0-3, otherwise two
                let max_len = if first <= '3' { 3 } else { 2 };
                let mut value = 0u32;
                let mut len = 0;
                while len < max_len {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            self.advance();
                            len += 1;
                        }
                        None => break,
                    }
                }
                return char::from_u32(value).ok_or_else(|| {
                    CompileError::new(
                        ErrorCode::InvalidEscapeSequence,
                        "Invalid octal escape",
                        position,
                    )
                });
            }
            other => {
                let shown = other.map(|c| c.to_string()).unwrap_or_default();
                return Err(CompileError::new(
                    ErrorCode::InvalidEscapeSequence,
                    format!("Invalid escape sequence '\\{}'", shown),
                    position,
                )
                .with_hint("Valid escapes are \\b \\t \\n \\f \\r \\\" \\' \\\\ and octal escapes"));
            }
        };

        self.advance();
        Ok(escaped)
    }
}
