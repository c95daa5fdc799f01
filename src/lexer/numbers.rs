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

//! Number scanning for the lexer.
//!
//! This module handles scanning of number literals including:
//! - Decimal, octal (leading `0`), hexadecimal (`0x`) and binary (`0b`) integers
//! - `_` digit separators and the `L` suffix
//! - Decimal floating-point numbers with fraction, exponent and `f`/`d` suffix
//!
//! The token text is the literal exactly as written. Converting it to a value
//! is left to the parser.

use super::helpers::LexerHelpers;
use super::identifiers::is_identifier_part;
use super::tokens::TokenKind;
use super::Lexer;
use super::Token;
use crate::error::{CompileError, ErrorCode, Position};

/// Trait for number scanning operations.
pub trait NumberScanner {
    /// Scan a number literal starting at a digit or at a `.` followed by a digit.
    fn scan_number(&mut self) -> Result<Token, CompileError>;

    /// Scan digits of the given radix, allowing `_` separators.
    fn scan_digits(&mut self, radix: u32, text: &mut String) -> usize;

    /// Scan an exponent (`e`/`E`, optional sign, digits).
    fn scan_exponent(&mut self, text: &mut String, start: Position) -> Result<(), CompileError>;
}

fn invalid_number(text: &str, position: Position) -> CompileError {
    CompileError::new(
        ErrorCode::InvalidNumberLiteral,
        format!("Invalid number literal '{}'", text),
        position,
    )
}

/// Check that `_` only appears between digits.
fn separators_ok(digits: &str) -> bool {
    !digits.starts_with('_') && !digits.ends_with('_')
}

impl NumberScanner for Lexer {
    fn scan_number(&mut self) -> Result<Token, CompileError> {
        let start = self.position();
        let mut text = String::new();
        let mut kind = TokenKind::IntegerLiteral;

        let prefix = match (self.peek(), self.peek_next()) {
            (Some('0'), Some(p @ ('x' | 'X' | 'b' | 'B'))) => Some(p),
            _ => None,
        };

        if let Some(p) = prefix {
            text.push('0');
            text.push(p);
            self.advance();
            self.advance();

            let radix = if p.eq_ignore_ascii_case(&'x') { 16 } else { 2 };
            let mut digits = String::new();
            let count = self.scan_digits(radix, &mut digits);
            text.push_str(&digits);
            if count == 0 || !separators_ok(&digits) {
                return Err(invalid_number(&text, start));
            }
        } else {
            let mut digits = String::new();
            self.scan_digits(10, &mut digits);
            text.push_str(&digits);
            if !separators_ok(&digits) && !digits.is_empty() {
                return Err(invalid_number(&text, start));
            }

            if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                text.push('.');
                let mut fraction = String::new();
                self.scan_digits(10, &mut fraction);
                text.push_str(&fraction);
                if !separators_ok(&fraction) {
                    return Err(invalid_number(&text, start));
                }
                kind = TokenKind::FloatingPointLiteral;
            }

            if matches!(self.peek(), Some('e' | 'E')) {
                self.scan_exponent(&mut text, start)?;
                kind = TokenKind::FloatingPointLiteral;
            }

            if let Some(suffix @ ('f' | 'F' | 'd' | 'D')) = self.peek() {
                self.advance();
                text.push(suffix);
                kind = TokenKind::FloatingPointLiteral;
            }

            if kind == TokenKind::IntegerLiteral
                && digits.len() > 1
                && digits.starts_with('0')
                && digits.chars().any(|c| c == '8' || c == '9')
            {
                return Err(invalid_number(&text, start)
                    .with_hint("Octal literals may only contain the digits 0 to 7"));
            }
        }

        if kind == TokenKind::IntegerLiteral {
            if let Some(suffix @ ('l' | 'L')) = self.peek() {
                self.advance();
                text.push(suffix);
            }
        }

        if let Some(c) = self.peek() {
            if is_identifier_part(c) {
                text.push(c);
                return Err(invalid_number(&text, start)
                    .with_hint("Separate the number from the following name"));
            }
        }

        Ok(Token::new(kind, text, start))
    }

    fn scan_digits(&mut self, radix: u32, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                count += 1;
            } else if c != '_' {
                break;
            }
            text.push(c);
            self.advance();
        }
        count
    }

    fn scan_exponent(&mut self, text: &mut String, start: Position) -> Result<(), CompileError> {
        if let Some(e) = self.advance() {
            text.push(e);
        }
        if let Some(sign @ ('+' | '-')) = self.peek() {
            self.advance();
            text.push(sign);
        }

        let mut digits = String::new();
        let count = self.scan_digits(10, &mut digits);
        text.push_str(&digits);
        if count == 0 || !separators_ok(&digits) {
            return Err(invalid_number(text, start)
                .with_hint("An exponent needs at least one digit"));
        }
        Ok(())
    }
}
