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

//! Lexer helper methods for character navigation.
//!
//! This module provides utility methods for the lexer including:
//! - Character stream navigation (peek, peek_next, advance)
//! - Position tracking
//! - Error construction at the current position

use super::Lexer;
use crate::error::{CompileError, ErrorCode, Position};

/// Trait for lexer helper operations.
pub trait LexerHelpers {
    /// Get the position of the current character (or the end of input).
    fn position(&self) -> Position;

    /// Check if we've reached the end of the decoded characters.
    fn is_at_end(&self) -> bool;

    /// Peek at the current character without advancing.
    fn peek(&self) -> Option<char>;

    /// Peek at the next character without advancing.
    fn peek_next(&self) -> Option<char>;

    /// Peek `offset` characters ahead of the current one.
    fn peek_at(&self, offset: usize) -> Option<char>;

    /// Advance to the next character and return it.
    fn advance(&mut self) -> Option<char>;

    /// Advance if the current character equals `expected`.
    fn match_char(&mut self, expected: char) -> bool;

    /// Create an error at the given position.
    fn error_at(&self, code: ErrorCode, message: impl Into<String>, position: Position)
        -> CompileError;
}

impl LexerHelpers for Lexer {
    fn position(&self) -> Position {
        self.chars
            .get(self.index)
            .map(|c| c.position)
            .unwrap_or(self.end)
    }

    fn is_at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|c| c.ch)
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.index + 1).map(|c| c.ch)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).map(|c| c.ch)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn error_at(
        &self,
        code: ErrorCode,
        message: impl Into<String>,
        position: Position,
    ) -> CompileError {
        CompileError::new(code, message, position)
    }
}
