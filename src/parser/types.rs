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

//! Type parsing for the parser.
//!
//! This module handles parsing of type references:
//! - Primitive types (`int`, `char`, `boolean`)
//! - Named types (`String`, classes, interfaces)
//! - One-dimensional array types (`int[]`)

use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::NamedType;
use crate::error::{CompileError, ErrorCode};
use crate::lexer::TokenKind;

/// Keywords that name a primitive type.
pub const PRIMITIVE_TYPES: &[&str] = &["int", "char", "boolean"];

/// Trait for type parsing operations.
pub trait TypeParser<'a> {
    /// Parse a type reference.
    fn parse_type(&mut self) -> Result<NamedType, CompileError>;

    /// Parse a bare type name (identifier or primitive keyword) without `[]`.
    fn parse_type_name(&mut self, message: &str) -> Result<String, CompileError>;

    /// Parse a return type, which may also be `void`.
    fn parse_return_type(&mut self) -> Result<NamedType, CompileError>;

    /// Check if the current token starts a local variable declaration.
    ///
    /// `Type name` and `Type[] name` are declarations, while `name...`
    /// and `name[index]` start an access chain.
    fn at_declaration_start(&self) -> bool;
}

impl<'a> TypeParser<'a> for Parser<'a> {
    fn parse_type(&mut self) -> Result<NamedType, CompileError> {
        let name = self.parse_type_name("Expected type")?;

        let is_array = if self.match_token(TokenKind::LeftBracket) {
            self.expect(TokenKind::RightBracket, "Expected ']' in array type")?;
            true
        } else {
            false
        };

        Ok(NamedType::new(name, is_array))
    }

    fn parse_type_name(&mut self, message: &str) -> Result<String, CompileError> {
        let name = match self.peek() {
            Some(token)
                if token.kind == TokenKind::Identifier
                    || (token.kind == TokenKind::Keyword
                        && PRIMITIVE_TYPES.contains(&token.text.as_str())) =>
            {
                token.text.clone()
            }
            _ => return Err(self.unexpected(ErrorCode::ExpectedType, message)),
        };
        self.advance();
        Ok(name)
    }

    fn parse_return_type(&mut self) -> Result<NamedType, CompileError> {
        if self.match_keyword("void") {
            Ok(NamedType::void())
        } else {
            self.parse_type()
        }
    }

    fn at_declaration_start(&self) -> bool {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Keyword => {
                PRIMITIVE_TYPES.contains(&token.text.as_str())
            }
            Some(token) if token.kind == TokenKind::Identifier => {
                self.check_ahead(1, TokenKind::Identifier)
                    || (self.check_ahead(1, TokenKind::LeftBracket)
                        && self.check_ahead(2, TokenKind::RightBracket))
            }
            _ => false,
        }
    }
}
