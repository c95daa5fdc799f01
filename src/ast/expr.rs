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

//! Expression AST nodes for the Yava compiler.
//!
//! Member accesses form a [`NamedValue`] chain: `a.b().c[0]` is a field
//! step `a`, followed by a call step `b()`, a field step `c` and an index step.

use super::{pretty_list, pretty_print, Node, NamedType};
use crate::error::Position;

/// An expression in the Yava language.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// Where the expression starts.
    pub position: Position,
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Check if this expression is a constant literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Num(_)
                | ExprKind::Char(_)
                | ExprKind::Boolean(_)
                | ExprKind::Str(_)
                | ExprKind::Null
        )
    }
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// An integer literal.
    Num(i32),

    /// A character literal.
    Char(char),

    /// A boolean literal.
    Boolean(bool),

    /// A string literal.
    Str(String),

    /// `null`.
    Null,

    /// A binary operation.
    BinOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// An access chain (variable, field, call, index, `this`).
    Named(NamedValue),

    /// `new Name(args)`.
    ObjectCreation { class_name: String, args: Vec<Expr> },

    /// `new Type[length]`.
    ArrayCreation { element: NamedType, length: Box<Expr> },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    /// The operator as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Check if this is a relational or equality operator.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Less
                | BinaryOp::Greater
                | BinaryOp::LessEqual
                | BinaryOp::GreaterEqual
                | BinaryOp::Equal
                | BinaryOp::NotEqual
        )
    }

    /// Check if this is `&&` or `||`.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Check if this is an arithmetic operator.
    pub fn is_arithmetic(&self) -> bool {
        !self.is_comparison() && !self.is_logical()
    }
}

/// One step of an access chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    /// `this`
    This,
    /// A variable or field name.
    Field(String),
    /// A method call.
    MethodCall { name: String, args: Vec<Expr> },
    /// `[index]` applied to the previous step.
    ArrayIndex(Box<Expr>),
}

/// A singly linked access chain such as `this.items[i].name()`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    /// This step.
    pub access: Access,
    /// The next step, if any.
    pub next: Option<Box<NamedValue>>,
    /// Where this step starts.
    pub position: Position,
}

impl NamedValue {
    /// Create a chain step without successor.
    pub fn new(access: Access, position: Position) -> Self {
        Self {
            access,
            next: None,
            position,
        }
    }

    /// Create a chain step with a successor.
    pub fn with_next(mut self, next: NamedValue) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    /// The next access step.
    pub fn next(&self) -> Option<&NamedValue> {
        self.next.as_deref()
    }

    /// The last step of the chain.
    pub fn tail(&self) -> &NamedValue {
        let mut current = self;
        while let Some(next) = current.next() {
            current = next;
        }
        current
    }

    /// Check if the chain denotes a call (its last step is a method call).
    pub fn is_call(&self) -> bool {
        matches!(self.tail().access, Access::MethodCall { .. })
    }

    /// Iterate over all steps from head to tail.
    pub fn steps(&self) -> impl Iterator<Item = &NamedValue> {
        std::iter::successors(Some(self), |step| step.next())
    }
}

impl Node for Expr {
    fn node_content(&self) -> (&'static str, String) {
        match &self.kind {
            ExprKind::Num(value) => ("num", value.to_string()),
            ExprKind::Char(c) => ("char", format!("'{}'", c.escape_default())),
            ExprKind::Boolean(value) => ("boolean", value.to_string()),
            ExprKind::Str(value) => ("string", format!("\"{}\"", value.escape_default())),
            ExprKind::Null => ("null", String::new()),
            ExprKind::BinOp { op, left, right } => (
                "binop",
                format!(
                    "{} :left {} :right {}",
                    op.symbol(),
                    pretty_print(left.as_ref()),
                    pretty_print(right.as_ref())
                ),
            ),
            ExprKind::Named(named) => named.node_content(),
            ExprKind::ObjectCreation { class_name, args } => (
                "object-creation",
                format!("{} :args {}", class_name, pretty_list(args)),
            ),
            ExprKind::ArrayCreation { element, length } => (
                "array-creation",
                format!("{} :length {}", element.name, pretty_print(length.as_ref())),
            ),
        }
    }

    fn child_node(&self) -> Option<&dyn Node> {
        match &self.kind {
            ExprKind::Named(named) => named.child_node(),
            _ => None,
        }
    }
}

impl Node for NamedValue {
    fn node_content(&self) -> (&'static str, String) {
        match &self.access {
            Access::This => ("this", String::new()),
            Access::Field(name) => ("field", name.clone()),
            Access::MethodCall { name, args } => {
                ("method-call", format!("{} :args {}", name, pretty_list(args)))
            }
            Access::ArrayIndex(index) => ("array", format!(":at {}", pretty_print(index.as_ref()))),
        }
    }

    fn child_node(&self) -> Option<&dyn Node> {
        self.next().map(|next| next as &dyn Node)
    }
}
