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

//! Operator and separator scanning for the lexer.
//!
//! The longest spelling in [`TokenKind::SYMBOLS`] that matches the input wins,
//! so `>>>=` is one token and `a>=b` never lexes as `>` followed by `=`.

use super::helpers::LexerHelpers;
use super::tokens::TokenKind;
use super::Lexer;
use super::Token;

/// Trait for operator scanning operations.
pub trait OperatorScanner {
    /// Scan an operator or separator.
    ///
    /// Returns `None` if the current character does not start one.
    fn scan_operator(&mut self) -> Option<Token>;
}

impl OperatorScanner for Lexer {
    fn scan_operator(&mut self) -> Option<Token> {
        let position = self.position();

        let (text, kind) = TokenKind::SYMBOLS.iter().find(|(text, _)| {
            text.chars()
                .enumerate()
                .all(|(offset, c)| self.peek_at(offset) == Some(c))
        })?;

        for _ in 0..text.chars().count() {
            self.advance();
        }

        Some(Token::symbol(*kind, position))
    }
}
