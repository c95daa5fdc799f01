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

//! Expression parsing for the parser.
//!
//! This module provides expression parsing functionality:
//! - Binary operators by precedence level (`||`, `&&`, relational, additive,
//!   multiplicative)
//! - Primary expressions (literals, grouping, `new`)
//! - Access chains (`this.a.b()[i]`)
//!
//! Relational operators do not chain: `a < b < c` is a syntax error.

use super::helpers::ParserHelpers;
use super::types::TypeParser;
use super::Parser;
use crate::ast::{Access, BinaryOp, Expr, ExprKind, NamedType, NamedValue};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::TokenKind;

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// Parse an expression.
    fn parse_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an 'or' expression.
    fn parse_or_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an 'and' expression.
    fn parse_and_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a relational or equality expression (at most one operator).
    fn parse_relational_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an additive expression.
    fn parse_additive_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a multiplicative expression.
    fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse a primary expression.
    fn parse_primary_expression(&mut self) -> Result<Expr, CompileError>;

    /// Parse an integer literal, optionally negated.
    fn parse_integer_literal(&mut self, negative: bool) -> Result<Expr, CompileError>;

    /// Parse `new Name(args)` or `new Type[length]`.
    fn parse_creation(&mut self) -> Result<Expr, CompileError>;

    /// Parse an access chain starting at `this` or an identifier.
    fn parse_named_value(&mut self) -> Result<NamedValue, CompileError>;

    /// Parse the optional `.` or `[` successor of a chain step.
    fn parse_chain_successor(&mut self) -> Result<Option<NamedValue>, CompileError>;

    /// Parse a parenthesized, comma separated argument list.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, CompileError>;
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let position = left.position;
    Expr::new(
        ExprKind::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        position,
    )
}

fn relational_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Less => Some(BinaryOp::Less),
        TokenKind::Greater => Some(BinaryOp::Greater),
        TokenKind::LessEqual => Some(BinaryOp::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOp::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOp::Equal),
        TokenKind::NotEqual => Some(BinaryOp::NotEqual),
        _ => None,
    }
}

/// Convert the text of an integer literal to its value.
///
/// Decimal literals must fit into a signed 32-bit integer (2147483648 only
/// when negated). Hexadecimal, octal and binary literals may use all 32 bits.
pub fn integer_value(text: &str, negative: bool) -> Result<i32, (ErrorCode, String)> {
    if text.ends_with(['l', 'L']) {
        return Err((
            ErrorCode::UnsupportedLiteral,
            format!("Long literal '{}' is not supported", text),
        ));
    }

    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex.to_string())
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin.to_string())
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, lower[1..].to_string())
    } else {
        (10, lower)
    };

    let out_of_range = || {
        (
            ErrorCode::IntegerOutOfRange,
            format!("Integer literal '{}' is out of range", text),
        )
    };
    let value = u64::from_str_radix(&body, radix).map_err(|_| out_of_range())?;

    if radix == 10 {
        let limit = if negative { 1u64 << 31 } else { (1u64 << 31) - 1 };
        if value > limit {
            return Err(out_of_range());
        }
        let signed = value as i64;
        Ok((if negative { -signed } else { signed }) as i32)
    } else {
        if value > u64::from(u32::MAX) {
            return Err(out_of_range());
        }
        let bits = value as u32 as i32;
        Ok(if negative { bits.wrapping_neg() } else { bits })
    }
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expression(&mut self) -> Result<Expr, CompileError> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_and_expression()?;

        while self.match_token(TokenKind::OrOr) {
            let right = self.parse_and_expression()?;
            left = binary(BinaryOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_relational_expression()?;

        while self.match_token(TokenKind::AndAnd) {
            let right = self.parse_relational_expression()?;
            left = binary(BinaryOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_relational_expression(&mut self) -> Result<Expr, CompileError> {
        let left = self.parse_additive_expression()?;

        let Some(op) = self.peek().and_then(|t| relational_op(t.kind)) else {
            return Ok(left);
        };
        self.advance();

        let right = self.parse_additive_expression()?;
        Ok(binary(op, left, right))
    }

    fn parse_additive_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = if self.match_token(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.match_token(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_multiplicative_expression()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_primary_expression()?;

        loop {
            let op = if self.match_token(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.match_token(TokenKind::Slash) {
                BinaryOp::Div
            } else if self.match_token(TokenKind::Percent) {
                BinaryOp::Rem
            } else {
                break;
            };
            let right = self.parse_primary_expression()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_primary_expression(&mut self) -> Result<Expr, CompileError> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.unexpected(ErrorCode::ExpectedExpression, "Expected expression"));
        };
        let position = token.position;

        let kind = match token.kind {
            TokenKind::IntegerLiteral => return self.parse_integer_literal(false),
            TokenKind::Minus if self.check_ahead(1, TokenKind::IntegerLiteral) => {
                self.advance();
                let mut expr = self.parse_integer_literal(true)?;
                expr.position = position;
                return Ok(expr);
            }
            TokenKind::FloatingPointLiteral => {
                return Err(self
                    .error(
                        ErrorCode::UnsupportedLiteral,
                        format!("Floating-point literal '{}' is not supported", token.text),
                    )
                    .with_hint("Only int, char, boolean and String values are supported"));
            }
            TokenKind::CharLiteral => {
                self.advance();
                ExprKind::Char(token.text.chars().next().unwrap_or_default())
            }
            TokenKind::StringLiteral => {
                self.advance();
                ExprKind::Str(token.text)
            }
            TokenKind::BooleanLiteral => {
                self.advance();
                ExprKind::Boolean(token.text == "true")
            }
            TokenKind::NullLiteral => {
                self.advance();
                ExprKind::Null
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
                return Ok(expr);
            }
            TokenKind::Keyword if token.text == "new" => return self.parse_creation(),
            TokenKind::Identifier => ExprKind::Named(self.parse_named_value()?),
            TokenKind::Keyword if token.text == "this" => {
                ExprKind::Named(self.parse_named_value()?)
            }
            _ => {
                return Err(self.unexpected(ErrorCode::ExpectedExpression, "Expected expression"))
            }
        };

        Ok(Expr::new(kind, position))
    }

    fn parse_integer_literal(&mut self, negative: bool) -> Result<Expr, CompileError> {
        let token = self.expect(TokenKind::IntegerLiteral, "Expected integer literal")?;
        let value = integer_value(&token.text, negative)
            .map_err(|(code, message)| CompileError::new(code, message, token.position))?;
        Ok(Expr::new(ExprKind::Num(value), token.position))
    }

    fn parse_creation(&mut self) -> Result<Expr, CompileError> {
        let position = self.current_position();
        self.expect_keyword("new", "Expected 'new'")?;

        let element = self.parse_type_name("Expected type after 'new'")?;
        if self.check(TokenKind::LeftBracket) && self.check_ahead(1, TokenKind::RightBracket) {
            return Err(self
                .error(
                    ErrorCode::UnexpectedToken,
                    "Array creation needs a length, e.g. new int[10]",
                )
                .with_hint("Write new Type[length]"));
        }

        if self.match_token(TokenKind::LeftBracket) {
            let length = self.parse_expression()?;
            self.expect(TokenKind::RightBracket, "Expected ']' after array length")?;
            return Ok(Expr::new(
                ExprKind::ArrayCreation {
                    element: NamedType::simple(element),
                    length: Box::new(length),
                },
                position,
            ));
        }

        if !self.check(TokenKind::LeftParen) {
            return Err(self.unexpected(
                ErrorCode::UnexpectedToken,
                "Expected '(' or '[' after type in 'new' expression",
            ));
        }
        let args = self.parse_arguments()?;
        Ok(Expr::new(
            ExprKind::ObjectCreation {
                class_name: element,
                args,
            },
            position,
        ))
    }

    fn parse_named_value(&mut self) -> Result<NamedValue, CompileError> {
        let position = self.current_position();

        let access = if self.match_keyword("this") {
            Access::This
        } else {
            let (name, _) = self.expect_identifier("Expected name")?;
            if self.check(TokenKind::LeftParen) {
                let args = self.parse_arguments()?;
                Access::MethodCall { name, args }
            } else {
                Access::Field(name)
            }
        };

        let mut step = NamedValue::new(access, position);
        step.next = self.parse_chain_successor()?.map(Box::new);
        Ok(step)
    }

    fn parse_chain_successor(&mut self) -> Result<Option<NamedValue>, CompileError> {
        let position = self.current_position();

        let access = if self.match_token(TokenKind::Dot) {
            let (name, _) = self.expect_identifier("Expected member name after '.'")?;
            if self.check(TokenKind::LeftParen) {
                let args = self.parse_arguments()?;
                Access::MethodCall { name, args }
            } else {
                Access::Field(name)
            }
        } else if self.match_token(TokenKind::LeftBracket) {
            let index = self.parse_expression()?;
            self.expect(TokenKind::RightBracket, "Expected ']' after index")?;
            Access::ArrayIndex(Box::new(index))
        } else {
            return Ok(None);
        };

        let mut step = NamedValue::new(access, position);
        step.next = self.parse_chain_successor()?.map(Box::new);
        Ok(Some(step))
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, CompileError> {
        self.expect(TokenKind::LeftParen, "Expected '('")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RightParen, "Expected ')' after arguments")?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::pretty_print;
    use crate::lexer::tokenize;

    fn parse_expr(source: &str) -> Result<Expr, CompileError> {
        let tokens = tokenize(source).unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_expression()
    }

    fn printed(source: &str) -> String {
        pretty_print(&parse_expr(source).unwrap())
    }

    // ========================================
    // Literals
    // ========================================

    #[test]
    fn test_literals() {
        assert_eq!(printed("42"), "(#num 42)");
        assert_eq!(printed("-7"), "(#num -7)");
        assert_eq!(printed("'c'"), "(#char 'c')");
        assert_eq!(printed("true"), "(#boolean true)");
        assert_eq!(printed("\"x\""), "(#string \"x\")");
        assert_eq!(printed("null"), "(#null)");
    }

    #[test]
    fn test_integer_values() {
        assert_eq!(integer_value("2147483647", false), Ok(i32::MAX));
        assert_eq!(integer_value("2147483648", true), Ok(i32::MIN));
        assert!(integer_value("2147483648", false).is_err());
        assert_eq!(integer_value("0xFFFFFFFF", false), Ok(-1));
        assert_eq!(integer_value("0b101", false), Ok(5));
        assert_eq!(integer_value("017", false), Ok(15));
        assert_eq!(integer_value("1_000", false), Ok(1000));
        assert!(integer_value("0x1_0000_0000", false).is_err());
    }

    #[test]
    fn test_literal_errors() {
        assert_eq!(
            parse_expr("2147483648").unwrap_err().code,
            ErrorCode::IntegerOutOfRange
        );
        assert_eq!(
            parse_expr("10L").unwrap_err().code,
            ErrorCode::UnsupportedLiteral
        );
        assert_eq!(
            parse_expr("1.5").unwrap_err().code,
            ErrorCode::UnsupportedLiteral
        );
    }

    // ========================================
    // Operators
    // ========================================

    #[test]
    fn test_precedence() {
        assert_eq!(
            printed("1 + 2 * 3"),
            "(#binop + :left (#num 1) :right (#binop * :left (#num 2) :right (#num 3)))"
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            printed("a - b - c"),
            "(#binop - :left (#binop - :left (#field a) :right (#field b)) :right (#field c))"
        );
    }

    #[test]
    fn test_logical_over_relational() {
        assert_eq!(
            printed("a < 1 || b == c && true"),
            "(#binop || :left (#binop < :left (#field a) :right (#num 1)) \
             :right (#binop && :left (#binop == :left (#field b) :right (#field c)) \
             :right (#boolean true)))"
        );
    }

    #[test]
    fn test_relational_does_not_chain() {
        let tokens = tokenize("a < b < c").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_expression().unwrap();
        assert!(parser.check(TokenKind::Less));
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(
            printed("(1 + 2) * 3"),
            "(#binop * :left (#binop + :left (#num 1) :right (#num 2)) :right (#num 3))"
        );
    }

    // ========================================
    // Chains and creation
    // ========================================

    #[test]
    fn test_chains() {
        assert_eq!(
            printed("this.page[1]"),
            "(#this (#field page (#array :at (#num 1))))"
        );
        assert_eq!(
            printed("a.b(1, 2).c"),
            "(#field a (#method-call b :args [(#num 1), (#num 2)] (#field c)))"
        );
    }

    #[test]
    fn test_creation() {
        assert_eq!(
            printed("new Point(1, 2)"),
            "(#object-creation Point :args [(#num 1), (#num 2)])"
        );
        assert_eq!(
            printed("new int[n]"),
            "(#array-creation int :length (#field n))"
        );
        assert_eq!(
            printed("new Point[3]"),
            "(#array-creation Point :length (#num 3))"
        );
        assert_eq!(
            parse_expr("new int[]").unwrap_err().code,
            ErrorCode::UnexpectedToken
        );
    }

    #[test]
    fn test_missing_expression() {
        assert_eq!(
            parse_expr(")").unwrap_err().code,
            ErrorCode::ExpectedExpression
        );
        assert_eq!(
            parse_expr("1 +").unwrap_err().code,
            ErrorCode::UnexpectedEndOfFile
        );
    }
}
