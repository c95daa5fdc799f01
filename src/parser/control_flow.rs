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

//! Control flow statement parsing.
//!
//! This module handles parsing of:
//! - if/else-if/else statements
//! - while loops
//! - for loops
//! - switch statements with case and default labels

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::statements::StatementParser;
use super::types::TypeParser;
use super::Parser;
use crate::ast::{
    CaseStatement, Expr, ForInit, ForStatement, IfStatement, Statement, StatementKind,
    StatementList, SwitchStatement, WhileStatement,
};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::TokenKind;

/// Extension trait for control flow parsing.
pub trait ControlFlowParser {
    /// Parse an if statement. `else if` recurses into this method.
    fn parse_if(&mut self) -> Result<Statement, CompileError>;

    /// Parse a while loop.
    fn parse_while(&mut self) -> Result<Statement, CompileError>;

    /// Parse a for loop.
    fn parse_for(&mut self) -> Result<Statement, CompileError>;

    /// Parse a switch statement.
    fn parse_switch(&mut self) -> Result<Statement, CompileError>;

    /// Parse a case label (integer, character or boolean literal).
    fn parse_case_label(&mut self) -> Result<Expr, CompileError>;

    /// Parse statements up to the next `case`, `default` or `}`.
    fn parse_case_body(&mut self) -> Result<StatementList, CompileError>;

    /// Parse a statement nested in a loop body.
    fn parse_loop_body(&mut self) -> Result<Statement, CompileError>;

    /// Parse a parenthesized condition.
    fn parse_condition(&mut self, keyword: &str) -> Result<Expr, CompileError>;
}

impl<'a> ControlFlowParser for Parser<'a> {
    fn parse_if(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();
        self.expect_keyword("if", "Expected 'if'")?;

        let condition = self.parse_condition("if")?;
        let body = Box::new(self.parse_statement()?);

        let else_branch = if self.match_keyword("else") {
            if self.check_keyword("if") {
                Some(Box::new(self.parse_if()?))
            } else {
                Some(Box::new(self.parse_statement()?))
            }
        } else {
            None
        };

        Ok(Statement::new(
            StatementKind::If(IfStatement {
                condition,
                body,
                else_branch,
            }),
            position,
        ))
    }

    fn parse_while(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();
        self.expect_keyword("while", "Expected 'while'")?;

        let condition = self.parse_condition("while")?;
        let body = Box::new(self.parse_loop_body()?);

        Ok(Statement::new(
            StatementKind::While(WhileStatement { condition, body }),
            position,
        ))
    }

    fn parse_for(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();
        self.expect_keyword("for", "Expected 'for'")?;
        self.expect(TokenKind::LeftParen, "Expected '(' after 'for'")?;
        let id = self.next_id();

        let init = if self.check(TokenKind::Semicolon) {
            None
        } else if self.at_declaration_start() {
            Some(ForInit::Declaration(self.parse_variable_declaration()?))
        } else {
            let target = self.parse_named_value()?;
            Some(ForInit::Assignment(self.parse_assignment_rest(target)?))
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after for initializer")?;

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after for condition")?;

        let update = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.expect(TokenKind::RightParen, "Expected ')' after for clauses")?;

        let body = Box::new(self.parse_loop_body()?);

        Ok(Statement::new(
            StatementKind::For(ForStatement {
                id,
                init,
                condition,
                update,
                body,
            }),
            position,
        ))
    }

    fn parse_switch(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();
        self.expect_keyword("switch", "Expected 'switch'")?;
        let id = self.next_id();

        let selector = self.parse_condition("switch")?;
        self.expect(TokenKind::LeftBrace, "Expected '{' after switch selector")?;

        self.breakable_depth += 1;
        let mut cases = Vec::new();
        let mut default = None;

        while !self.match_token(TokenKind::RightBrace) {
            let label_position = self.current_position();
            if self.match_keyword("case") {
                let value = self.parse_case_label()?;
                self.expect(TokenKind::Colon, "Expected ':' after case label")?;
                let body = self.parse_case_body()?;
                cases.push(CaseStatement {
                    value,
                    body,
                    position: label_position,
                });
            } else if self.check_keyword("default") {
                if default.is_some() {
                    return Err(self.error(ErrorCode::UnexpectedToken, "Duplicate 'default' label"));
                }
                self.advance();
                self.expect(TokenKind::Colon, "Expected ':' after 'default'")?;
                default = Some(self.parse_case_body()?);
            } else {
                return Err(self.unexpected(
                    ErrorCode::UnexpectedToken,
                    "Expected 'case', 'default' or '}'",
                ));
            }
        }
        self.breakable_depth -= 1;

        Ok(Statement::new(
            StatementKind::Switch(SwitchStatement {
                id,
                selector,
                cases,
                default,
            }),
            position,
        ))
    }

    fn parse_case_label(&mut self) -> Result<Expr, CompileError> {
        let position = self.current_position();
        let is_literal = match self.peek().map(|t| t.kind) {
            Some(TokenKind::IntegerLiteral | TokenKind::CharLiteral | TokenKind::BooleanLiteral) => {
                true
            }
            Some(TokenKind::Minus) => self.check_ahead(1, TokenKind::IntegerLiteral),
            _ => false,
        };

        if !is_literal {
            return Err(self
                .unexpected(ErrorCode::InvalidCaseLabel, "Expected case label")
                .with_hint("Case labels must be integer, character or boolean literals"));
        }

        let label = self.parse_primary_expression()?;
        Ok(Expr::new(label.kind, position))
    }

    fn parse_case_body(&mut self) -> Result<StatementList, CompileError> {
        let position = self.current_position();
        let id = self.next_id();

        let mut statements = Vec::new();
        while !self.check_keyword("case")
            && !self.check_keyword("default")
            && !self.check(TokenKind::RightBrace)
        {
            if self.is_at_end() {
                return Err(self.unexpected(ErrorCode::UnexpectedToken, "Expected '}'"));
            }
            statements.push(self.parse_statement()?);
        }

        Ok(StatementList::new(id, statements, position))
    }

    fn parse_loop_body(&mut self) -> Result<Statement, CompileError> {
        self.loop_depth += 1;
        self.breakable_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        self.breakable_depth -= 1;
        body
    }

    fn parse_condition(&mut self, keyword: &str) -> Result<Expr, CompileError> {
        self.expect(
            TokenKind::LeftParen,
            &format!("Expected '(' after '{}'", keyword),
        )?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "Expected ')' after condition")?;
        Ok(condition)
    }
}
