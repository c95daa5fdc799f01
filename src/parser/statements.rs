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

//! Statement parsing for the parser.
//!
//! This module provides statement parsing functionality:
//! - Blocks
//! - Variable declarations
//! - Assignments and call statements
//! - `return`, `break` and `continue`

use super::control_flow::ControlFlowParser;
use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::types::TypeParser;
use super::Parser;
use crate::ast::{
    Access, AssignOp, AssignmentStatement, JumpKind, JumpStatement, NamedValue, Statement,
    StatementKind, StatementList, VariableDeclaration,
};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::TokenKind;

/// Extension trait for statement parsing.
pub trait StatementParser {
    /// Parse a `{ ... }` block.
    fn parse_block(&mut self) -> Result<StatementList, CompileError>;

    /// Parse a single statement.
    fn parse_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse `Type name [= value]` without the trailing `;`.
    fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, CompileError>;

    /// Parse an assignment or call statement without the trailing `;`.
    fn parse_simple_statement(&mut self) -> Result<Statement, CompileError>;

    /// Parse the rest of an assignment after its target chain.
    fn parse_assignment_rest(
        &mut self,
        target: NamedValue,
    ) -> Result<AssignmentStatement, CompileError>;

    /// Parse `return [value];`, `break;` or `continue;`.
    fn parse_jump_statement(&mut self) -> Result<Statement, CompileError>;
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::Assign => Some(AssignOp::Assign),
        TokenKind::PlusAssign => Some(AssignOp::AddAssign),
        TokenKind::MinusAssign => Some(AssignOp::SubAssign),
        TokenKind::StarAssign => Some(AssignOp::MulAssign),
        TokenKind::SlashAssign => Some(AssignOp::DivAssign),
        TokenKind::PercentAssign => Some(AssignOp::RemAssign),
        _ => None,
    }
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_block(&mut self) -> Result<StatementList, CompileError> {
        let position = self.current_position();
        self.expect(TokenKind::LeftBrace, "Expected '{'")?;
        let id = self.next_id();

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.unexpected(ErrorCode::UnexpectedToken, "Expected '}'"));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();

        Ok(StatementList::new(id, statements, position))
    }

    fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();

        let Some((kind, text)) = self.peek().map(|t| (t.kind, t.text.clone())) else {
            return Err(self.unexpected(ErrorCode::ExpectedStatement, "Expected statement"));
        };

        if kind == TokenKind::LeftBrace {
            let block = self.parse_block()?;
            return Ok(Statement::new(StatementKind::Block(block), position));
        }

        if kind == TokenKind::Keyword {
            match text.as_str() {
                "if" => return self.parse_if(),
                "while" => return self.parse_while(),
                "for" => return self.parse_for(),
                "switch" => return self.parse_switch(),
                "return" | "break" | "continue" => return self.parse_jump_statement(),
                _ => {}
            }
        }

        if self.at_declaration_start() {
            let decl = self.parse_variable_declaration()?;
            self.expect(TokenKind::Semicolon, "Expected ';' after variable declaration")?;
            return Ok(Statement::new(StatementKind::VarDecl(decl), position));
        }

        if self.check(TokenKind::Identifier) || self.check_keyword("this") {
            let statement = self.parse_simple_statement()?;
            self.expect(TokenKind::Semicolon, "Expected ';' after statement")?;
            return Ok(statement);
        }

        Err(self.unexpected(ErrorCode::ExpectedStatement, "Expected statement"))
    }

    fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, CompileError> {
        let position = self.current_position();
        let ty = self.parse_type()?;
        let (name, _) = self.expect_identifier("Expected variable name")?;

        let value = if self.match_token(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(VariableDeclaration {
            ty,
            name,
            value,
            position,
        })
    }

    fn parse_simple_statement(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();
        let chain = self.parse_named_value()?;

        if self.peek().and_then(|t| assign_op(t.kind)).is_some() {
            let assignment = self.parse_assignment_rest(chain)?;
            return Ok(Statement::new(
                StatementKind::Assignment(assignment),
                position,
            ));
        }

        if chain.is_call() {
            return Ok(Statement::new(StatementKind::MethodCall(chain), position));
        }

        Err(self
            .unexpected(
                ErrorCode::ExpectedStatement,
                "Expected assignment or method call",
            )
            .with_hint("A value on its own is not a statement"))
    }

    fn parse_assignment_rest(
        &mut self,
        target: NamedValue,
    ) -> Result<AssignmentStatement, CompileError> {
        let position = self.current_position();
        let op = self
            .peek()
            .and_then(|t| assign_op(t.kind))
            .ok_or_else(|| self.unexpected(ErrorCode::UnexpectedToken, "Expected '='"))?;

        match target.tail().access {
            Access::Field(_) | Access::ArrayIndex(_) => {}
            Access::This | Access::MethodCall { .. } => {
                return Err(CompileError::new(
                    ErrorCode::InvalidAssignmentTarget,
                    "Invalid assignment target",
                    position,
                )
                .with_hint("Only variables, fields and array elements can be assigned"));
            }
        }
        self.advance();

        let value = self.parse_expression()?;
        Ok(AssignmentStatement { op, target, value })
    }

    fn parse_jump_statement(&mut self) -> Result<Statement, CompileError> {
        let position = self.current_position();

        let kind = if self.match_keyword("return") {
            JumpKind::Return
        } else if self.match_keyword("break") {
            if self.breakable_depth == 0 {
                return Err(CompileError::new(
                    ErrorCode::BreakOutsideLoop,
                    "'break' outside of a loop or switch",
                    position,
                ));
            }
            JumpKind::Break
        } else if self.match_keyword("continue") {
            if self.loop_depth == 0 {
                return Err(CompileError::new(
                    ErrorCode::ContinueOutsideLoop,
                    "'continue' outside of a loop",
                    position,
                ));
            }
            JumpKind::Continue
        } else {
            return Err(self.unexpected(ErrorCode::ExpectedStatement, "Expected statement"));
        };

        let value = if kind == JumpKind::Return && !self.check(TokenKind::Semicolon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "Expected ';'")?;

        Ok(Statement::new(
            StatementKind::Jump(JumpStatement { kind, value }),
            position,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::pretty_print;
    use crate::lexer::tokenize;

    fn parse_stmt(source: &str) -> Result<Statement, CompileError> {
        let tokens = tokenize(source).unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_statement()
    }

    fn printed(source: &str) -> String {
        pretty_print(&parse_stmt(source).unwrap())
    }

    #[test]
    fn test_declarations() {
        assert_eq!(printed("int x;"), "(#var-decl x :type int)");
        assert_eq!(
            printed("Point[] ps = null;"),
            "(#var-decl ps :type Point[] (#null))"
        );
        assert_eq!(
            printed("String s = \"a\";"),
            "(#var-decl s :type String (#string \"a\"))"
        );
    }

    #[test]
    fn test_assignments() {
        assert_eq!(
            printed("x = 1;"),
            "(#assignment = :left (#field x) :right (#num 1))"
        );
        assert_eq!(
            printed("xs[0] *= 2;"),
            "(#assignment *= :left (#field xs (#array :at (#num 0))) :right (#num 2))"
        );
        assert_eq!(
            printed("this.x = y;"),
            "(#assignment = :left (#this (#field x)) :right (#field y))"
        );
    }

    #[test]
    fn test_call_statement() {
        assert_eq!(
            printed("p.move(1);"),
            "(#method-call-stmt (#field p (#method-call move :args [(#num 1)])))"
        );
    }

    #[test]
    fn test_return() {
        assert_eq!(printed("return;"), "(#return)");
        assert_eq!(printed("return x;"), "(#return (#field x))");
    }

    #[test]
    fn test_block() {
        assert_eq!(
            printed("{ int a; a = 1; }"),
            "(#stmt-block (#var-decl a :type int), (#assignment = :left (#field a) :right (#num 1)))"
        );
    }

    #[test]
    fn test_invalid_statements() {
        assert_eq!(
            parse_stmt("x;").unwrap_err().code,
            ErrorCode::ExpectedStatement
        );
        assert_eq!(
            parse_stmt("f() = 1;").unwrap_err().code,
            ErrorCode::InvalidAssignmentTarget
        );
        assert_eq!(
            parse_stmt("this = 1;").unwrap_err().code,
            ErrorCode::InvalidAssignmentTarget
        );
        assert_eq!(
            parse_stmt("1 + 2;").unwrap_err().code,
            ErrorCode::ExpectedStatement
        );
        assert_eq!(
            parse_stmt("int x").unwrap_err().code,
            ErrorCode::UnexpectedEndOfFile
        );
    }

    #[test]
    fn test_jump_outside_loop() {
        assert_eq!(
            parse_stmt("break;").unwrap_err().code,
            ErrorCode::BreakOutsideLoop
        );
        assert_eq!(
            parse_stmt("continue;").unwrap_err().code,
            ErrorCode::ContinueOutsideLoop
        );
    }
}
