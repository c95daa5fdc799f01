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

//! Parser helper methods for token stream navigation and error handling.
//!
//! This module provides utility methods for the parser including:
//! - Token stream navigation (peek, peek_ahead, advance, check)
//! - Token matching and expectation
//! - Error creation and node id allocation

use super::Parser;
use crate::ast::NodeId;
use crate::error::{CompileError, ErrorCode, Position};
use crate::lexer::{Token, TokenKind};

/// Trait for parser helper operations.
pub trait ParserHelpers<'a> {
    /// Check if we've reached the end of the token stream.
    fn is_at_end(&self) -> bool;

    /// Peek at the current token without advancing.
    fn peek(&self) -> Option<&Token>;

    /// Peek at a token ahead by n positions.
    fn peek_ahead(&self, n: usize) -> Option<&Token>;

    /// Position of the current token, or of the last one at the end.
    fn current_position(&self) -> Position;

    /// Advance to the next token and return the current one.
    fn advance(&mut self) -> Option<Token>;

    /// Check if the current token has the given kind.
    fn check(&self, kind: TokenKind) -> bool;

    /// Check if the token n positions ahead has the given kind.
    fn check_ahead(&self, n: usize, kind: TokenKind) -> bool;

    /// Check if the current token is the given keyword.
    fn check_keyword(&self, keyword: &str) -> bool;

    /// Consume the current token if it has the given kind.
    fn match_token(&mut self, kind: TokenKind) -> bool;

    /// Consume the current token if it is the given keyword.
    fn match_keyword(&mut self, keyword: &str) -> bool;

    /// Expect a token of the given kind, or return an error.
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, CompileError>;

    /// Expect the given keyword, or return an error.
    fn expect_keyword(&mut self, keyword: &str, message: &str) -> Result<Token, CompileError>;

    /// Expect an identifier and return its name and position.
    fn expect_identifier(&mut self, message: &str) -> Result<(String, Position), CompileError>;

    /// Create an error at the current position.
    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError;

    /// Create an "expected X, found Y" error for the current token.
    ///
    /// At the end of input the code becomes [`ErrorCode::UnexpectedEndOfFile`].
    fn unexpected(&self, code: ErrorCode, message: &str) -> CompileError;

    /// Allocate a fresh node id.
    fn next_id(&mut self) -> NodeId;
}

impl<'a> ParserHelpers<'a> for Parser<'a> {
    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    fn current_position(&self) -> Position {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.position)
            .unwrap_or_default()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position)?.clone();
        self.position += 1;
        Some(token)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_ahead(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_ahead(n).is_some_and(|t| t.kind == kind)
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, CompileError> {
        if self.check(kind) {
            self.advance()
                .ok_or_else(|| self.unexpected(ErrorCode::UnexpectedToken, message))
        } else {
            Err(self.unexpected(ErrorCode::UnexpectedToken, message))
        }
    }

    fn expect_keyword(&mut self, keyword: &str, message: &str) -> Result<Token, CompileError> {
        if self.check_keyword(keyword) {
            self.advance()
                .ok_or_else(|| self.unexpected(ErrorCode::UnexpectedToken, message))
        } else {
            Err(self.unexpected(ErrorCode::UnexpectedToken, message))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<(String, Position), CompileError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let result = (token.text.clone(), token.position);
                self.position += 1;
                Ok(result)
            }
            _ => Err(self.unexpected(ErrorCode::ExpectedIdentifier, message)),
        }
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> CompileError {
        CompileError::new(code, message, self.current_position())
    }

    fn unexpected(&self, code: ErrorCode, message: &str) -> CompileError {
        match self.peek() {
            Some(token) => self.error(code, format!("{}, found {}", message, token)),
            None => self.error(
                ErrorCode::UnexpectedEndOfFile,
                format!("{}, found end of file", message),
            ),
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.id_counter);
        self.id_counter += 1;
        id
    }
}
