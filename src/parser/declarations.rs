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

//! Declaration parsing for the parser.
//!
//! This module handles parsing of:
//! - Top-level class and interface declarations
//! - Properties, methods and constructors
//! - The `public static void main(String[] args)` entry point

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::types::TypeParser;
use super::Parser;
use crate::ast::{
    AccessModifier, ClassDecl, InterfaceDecl, MethodDecl, MethodKind, MethodSignature, NamedType,
    Parameter, PropertyDecl, TypeDecl, VariableDeclaration,
};
use crate::error::{CompileError, ErrorCode, Position};
use crate::lexer::TokenKind;

const MAIN_HINT: &str = "The entry point must be declared as 'public static void main(String[] args)'";

/// Extension trait for declaration parsing.
pub trait DeclarationParser {
    /// Parse `[public] class ...` or `[public] interface ...`.
    fn parse_type_declaration(&mut self) -> Result<TypeDecl, CompileError>;

    /// Parse a class after the `class` keyword.
    fn parse_class(&mut self, position: Position) -> Result<ClassDecl, CompileError>;

    /// Parse an interface after the `interface` keyword.
    fn parse_interface(&mut self, position: Position) -> Result<InterfaceDecl, CompileError>;

    /// Parse one class member and add it to the class.
    fn parse_member(&mut self, class: &mut ClassDecl) -> Result<(), CompileError>;

    /// Parse an optional access modifier.
    fn parse_access_modifier(&mut self) -> Option<AccessModifier>;

    /// Parse the static main method after the `static` keyword.
    fn parse_main(
        &mut self,
        access: Option<AccessModifier>,
        position: Position,
    ) -> Result<MethodDecl, CompileError>;

    /// Parse a parenthesized parameter list.
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, CompileError>;
}

impl<'a> DeclarationParser for Parser<'a> {
    fn parse_type_declaration(&mut self) -> Result<TypeDecl, CompileError> {
        let position = self.current_position();
        self.match_keyword("public");

        if self.match_keyword("class") {
            Ok(TypeDecl::Class(self.parse_class(position)?))
        } else if self.match_keyword("interface") {
            Ok(TypeDecl::Interface(self.parse_interface(position)?))
        } else {
            Err(self.unexpected(
                ErrorCode::UnexpectedToken,
                "Expected 'class' or 'interface'",
            ))
        }
    }

    fn parse_class(&mut self, position: Position) -> Result<ClassDecl, CompileError> {
        let id = self.next_id();
        let (name, _) = self.expect_identifier("Expected class name")?;

        let extends = if self.match_keyword("extends") {
            Some(self.parse_type_name("Expected superclass name")?)
        } else {
            None
        };
        let implements = if self.match_keyword("implements") {
            Some(self.parse_type_name("Expected interface name")?)
        } else {
            None
        };

        self.expect(TokenKind::LeftBrace, "Expected '{' after class header")?;

        let mut class = ClassDecl {
            id,
            name,
            extends,
            implements,
            properties: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            main: None,
            position,
        };

        while !self.match_token(TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected(ErrorCode::UnexpectedToken, "Expected '}'"));
            }
            self.parse_member(&mut class)?;
        }

        Ok(class)
    }

    fn parse_interface(&mut self, position: Position) -> Result<InterfaceDecl, CompileError> {
        let id = self.next_id();
        let (name, _) = self.expect_identifier("Expected interface name")?;
        self.expect(TokenKind::LeftBrace, "Expected '{' after interface name")?;

        let mut methods = Vec::new();
        while !self.match_token(TokenKind::RightBrace) {
            let member_position = self.current_position();
            let access = self.parse_access_modifier().unwrap_or_default();
            let return_type = self.parse_return_type()?;
            let (method_name, _) = self.expect_identifier("Expected method name")?;
            let sig_id = self.next_id();
            let params = self.parse_parameters()?;
            self.expect(TokenKind::Semicolon, "Expected ';' after interface method")?;

            methods.push(MethodSignature {
                id: sig_id,
                kind: MethodKind::Method,
                access,
                return_type,
                name: method_name,
                params,
                position: member_position,
            });
        }

        Ok(InterfaceDecl {
            id,
            name,
            methods,
            position,
        })
    }

    fn parse_member(&mut self, class: &mut ClassDecl) -> Result<(), CompileError> {
        let position = self.current_position();
        let access = self.parse_access_modifier();

        if self.match_keyword("static") {
            let main = self.parse_main(access, position)?;
            if class.main.is_some() {
                return Err(CompileError::new(
                    ErrorCode::DuplicateMainMethod,
                    format!("Class '{}' declares more than one main method", class.name),
                    position,
                ));
            }
            class.main = Some(main);
            return Ok(());
        }

        let access = access.unwrap_or_default();

        // constructor: ClassName(
        let is_constructor = self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Identifier && t.text == class.name)
            && self.check_ahead(1, TokenKind::LeftParen);
        if is_constructor {
            self.advance();
            let id = self.next_id();
            let params = self.parse_parameters()?;
            let body = self.parse_block()?;
            class.constructors.push(MethodDecl {
                signature: MethodSignature {
                    id,
                    kind: MethodKind::Constructor,
                    access,
                    return_type: NamedType::void(),
                    name: class.name.clone(),
                    params,
                    position,
                },
                body,
            });
            return Ok(());
        }

        let ty = self.parse_return_type()?;
        let (name, _) = self.expect_identifier("Expected member name")?;

        if self.check(TokenKind::LeftParen) {
            let id = self.next_id();
            let params = self.parse_parameters()?;
            let body = self.parse_block()?;
            class.methods.push(MethodDecl {
                signature: MethodSignature {
                    id,
                    kind: MethodKind::Method,
                    access,
                    return_type: ty,
                    name,
                    params,
                    position,
                },
                body,
            });
            return Ok(());
        }

        if ty.is_void() {
            return Err(self.unexpected(
                ErrorCode::UnexpectedToken,
                "Expected '(' after method name",
            ));
        }

        let value = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after property declaration")?;

        class.properties.push(PropertyDecl {
            access,
            declaration: VariableDeclaration {
                ty,
                name,
                value,
                position,
            },
        });
        Ok(())
    }

    fn parse_access_modifier(&mut self) -> Option<AccessModifier> {
        let access = self
            .peek()
            .filter(|t| t.kind == TokenKind::Keyword)
            .and_then(|t| AccessModifier::from_keyword(&t.text))?;
        self.advance();
        Some(access)
    }

    fn parse_main(
        &mut self,
        access: Option<AccessModifier>,
        position: Position,
    ) -> Result<MethodDecl, CompileError> {
        let invalid = |message: &str, at: Position| {
            CompileError::new(ErrorCode::InvalidMainSignature, message, at).with_hint(MAIN_HINT)
        };

        if access.is_some_and(|a| a != AccessModifier::Public) {
            return Err(invalid("The main method must be public", position));
        }
        if !self.match_keyword("void") {
            return Err(invalid(
                "The main method must return void",
                self.current_position(),
            ));
        }

        let name_position = self.current_position();
        match self.expect_identifier("Expected 'main'") {
            Ok((name, _)) if name == "main" => {}
            _ => return Err(invalid("Only 'main' may be declared static", name_position)),
        }

        let id = self.next_id();
        let params_position = self.current_position();
        let params = self.parse_parameters()?;
        let valid_params = params.len() == 1 && params[0].ty == NamedType::new("String", true);
        if !valid_params {
            return Err(invalid(
                "The main method must take a single String[] parameter",
                params_position,
            ));
        }

        let body = self.parse_block()?;
        Ok(MethodDecl {
            signature: MethodSignature {
                id,
                kind: MethodKind::Main,
                access: AccessModifier::Public,
                return_type: NamedType::void(),
                name: "main".to_string(),
                params,
                position,
            },
            body,
        })
    }

    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, CompileError> {
        self.expect(TokenKind::LeftParen, "Expected '(' before parameters")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let position = self.current_position();
                let ty = self.parse_type()?;
                let (name, _) = self.expect_identifier("Expected parameter name")?;
                params.push(Parameter { ty, name, position });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen, "Expected ')' after parameters")?;
        Ok(params)
    }
}
