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

//! Identifier and keyword scanning for the lexer.
//!
//! This module handles scanning of:
//! - Identifiers (type, variable and member names)
//! - Keywords (reserved words)
//! - The `true`, `false` and `null` literals

use super::helpers::LexerHelpers;
use super::Lexer;
use super::Token;

/// Check if a character may start an identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Check if a character may continue an identifier.
pub fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Trait for identifier scanning operations.
pub trait IdentifierScanner {
    /// Scan an identifier, keyword, boolean or null literal.
    fn scan_identifier(&mut self) -> Token;
}

impl IdentifierScanner for Lexer {
    fn scan_identifier(&mut self) -> Token {
        let position = self.position();
        let mut word = String::new();

        while let Some(c) = self.peek() {
            if !is_identifier_part(c) {
                break;
            }
            word.push(c);
            self.advance();
        }

        Token::from_word(word, position)
    }
}
