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

//! Statement AST nodes for the Yava compiler.

use super::{pretty_list, pretty_print, Expr, NamedType, NamedValue, Node, NodeId};
use crate::error::Position;

/// A `{ ... }` block. Opens a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementList {
    /// Scope attachment id.
    pub id: NodeId,
    /// The statements in this block.
    pub statements: Vec<Statement>,
    /// Position of the opening brace.
    pub position: Position,
}

impl StatementList {
    /// Create a new block.
    pub fn new(id: NodeId, statements: Vec<Statement>, position: Position) -> Self {
        Self {
            id,
            statements,
            position,
        }
    }

    /// Check if this block is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A statement in the Yava language.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// Where the statement starts.
    pub position: Position,
}

impl Statement {
    /// Create a new statement.
    pub fn new(kind: StatementKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// The kind of statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// A nested block.
    Block(StatementList),
    /// `if (...) ... [else ...]`
    If(IfStatement),
    /// `while (...) ...`
    While(WhileStatement),
    /// `for (...; ...; ...) ...`
    For(ForStatement),
    /// `switch (...) { case ...: ... }`
    Switch(SwitchStatement),
    /// `return`, `break` or `continue`.
    Jump(JumpStatement),
    /// `target op value;`
    Assignment(AssignmentStatement),
    /// `Type name [= value];`
    VarDecl(VariableDeclaration),
    /// A call chain used as a statement.
    MethodCall(NamedValue),
}

/// An if statement. An `else if` is an `If` statement in `else_branch`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition.
    pub condition: Expr,
    /// Statement executed when the condition holds.
    pub body: Box<Statement>,
    /// Optional else branch.
    pub else_branch: Option<Box<Statement>>,
}

/// A while loop.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// The loop condition.
    pub condition: Expr,
    /// The loop body.
    pub body: Box<Statement>,
}

/// Initializer of a for loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// `for (int i = 0; ...)`, opens a scope for the loop.
    Declaration(VariableDeclaration),
    /// `for (i = 0; ...)`
    Assignment(AssignmentStatement),
}

/// A for loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// Scope attachment id.
    pub id: NodeId,
    /// Optional initializer.
    pub init: Option<ForInit>,
    /// Optional condition, absent means `true`.
    pub condition: Option<Expr>,
    /// Optional update, an assignment or a call.
    pub update: Option<Box<Statement>>,
    /// The loop body.
    pub body: Box<Statement>,
}

/// A `case` label with its statements.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStatement {
    /// The label, always an integer, character or boolean literal.
    pub value: Expr,
    /// Statements up to the next label. Opens a scope.
    pub body: StatementList,
    /// Position of the `case` keyword.
    pub position: Position,
}

/// A switch statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// Id used to reserve the selector slot.
    pub id: NodeId,
    /// The selector.
    pub selector: Expr,
    /// Case labels in source order.
    pub cases: Vec<CaseStatement>,
    /// Statements of the `default` label.
    pub default: Option<StatementList>,
}

/// Kind of a jump statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// `return`
    Return,
    /// `break`
    Break,
    /// `continue`
    Continue,
}

/// A `return`, `break` or `continue`.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpStatement {
    /// The jump kind.
    pub kind: JumpKind,
    /// Returned value (only for `return`).
    pub value: Option<Expr>,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
}

impl AssignOp {
    /// The operator as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::RemAssign => "%=",
        }
    }

    /// The arithmetic operator of a compound assignment.
    pub fn binary_op(&self) -> Option<super::BinaryOp> {
        use super::BinaryOp;
        match self {
            AssignOp::Assign => None,
            AssignOp::AddAssign => Some(BinaryOp::Add),
            AssignOp::SubAssign => Some(BinaryOp::Sub),
            AssignOp::MulAssign => Some(BinaryOp::Mul),
            AssignOp::DivAssign => Some(BinaryOp::Div),
            AssignOp::RemAssign => Some(BinaryOp::Rem),
        }
    }
}

/// An assignment to a variable, field or array element.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    /// The assignment operator.
    pub op: AssignOp,
    /// The assigned chain; its tail is a field or index step.
    pub target: NamedValue,
    /// The assigned value.
    pub value: Expr,
}

/// A local variable or property declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// The declared type.
    pub ty: NamedType,
    /// The variable name.
    pub name: String,
    /// Optional initializer.
    pub value: Option<Expr>,
    /// Position of the type.
    pub position: Position,
}

impl Node for StatementList {
    fn node_content(&self) -> (&'static str, String) {
        let items: Vec<String> = self
            .statements
            .iter()
            .map(|s| pretty_print(s))
            .collect();
        ("stmt-block", items.join(", "))
    }
}

impl Node for Statement {
    fn node_content(&self) -> (&'static str, String) {
        match &self.kind {
            StatementKind::Block(block) => block.node_content(),
            StatementKind::If(stmt) => {
                let mut content = format!(
                    "{} :body {}",
                    pretty_print(&stmt.condition),
                    pretty_print(stmt.body.as_ref())
                );
                if stmt.else_branch.is_some() {
                    content.push_str(" :else");
                }
                ("if", content)
            }
            StatementKind::While(stmt) => (
                "while",
                format!(
                    "{} :body {}",
                    pretty_print(&stmt.condition),
                    pretty_print(stmt.body.as_ref())
                ),
            ),
            StatementKind::For(stmt) => {
                let mut parts = Vec::new();
                match &stmt.init {
                    Some(ForInit::Declaration(decl)) => {
                        parts.push(format!(":init {}", pretty_print(decl)))
                    }
                    Some(ForInit::Assignment(assign)) => {
                        parts.push(format!(":init {}", assignment_text(assign)))
                    }
                    None => {}
                }
                if let Some(condition) = &stmt.condition {
                    parts.push(format!(":condition {}", pretty_print(condition)));
                }
                if let Some(update) = &stmt.update {
                    parts.push(format!(":update {}", pretty_print(update.as_ref())));
                }
                parts.push(":body".to_string());
                ("for", parts.join(" "))
            }
            StatementKind::Switch(stmt) => {
                let mut content = format!(
                    "{} :case {}",
                    pretty_print(&stmt.selector),
                    pretty_list(&stmt.cases)
                );
                if let Some(default) = &stmt.default {
                    let items: Vec<String> =
                        default.statements.iter().map(|s| pretty_print(s)).collect();
                    content.push_str(&format!(" :default [{}]", items.join(", ")));
                }
                ("switch", content)
            }
            StatementKind::Jump(jump) => match jump.kind {
                JumpKind::Return => ("return", String::new()),
                JumpKind::Break => ("break", String::new()),
                JumpKind::Continue => ("continue", String::new()),
            },
            StatementKind::Assignment(assign) => ("assignment", assignment_text(assign)),
            StatementKind::VarDecl(decl) => decl.node_content(),
            StatementKind::MethodCall(_) => ("method-call-stmt", String::new()),
        }
    }

    fn child_node(&self) -> Option<&dyn Node> {
        match &self.kind {
            StatementKind::If(stmt) => stmt.else_branch.as_deref().map(|s| s as &dyn Node),
            StatementKind::For(stmt) => Some(stmt.body.as_ref() as &dyn Node),
            StatementKind::Jump(jump) => jump.value.as_ref().map(|v| v as &dyn Node),
            StatementKind::VarDecl(decl) => decl.child_node(),
            StatementKind::MethodCall(chain) => Some(chain as &dyn Node),
            _ => None,
        }
    }
}

fn assignment_text(assign: &AssignmentStatement) -> String {
    format!(
        "{} :left {} :right {}",
        assign.op.symbol(),
        pretty_print(&assign.target),
        pretty_print(&assign.value)
    )
}

impl Node for CaseStatement {
    fn node_content(&self) -> (&'static str, String) {
        let items: Vec<String> = self
            .body
            .statements
            .iter()
            .map(|s| pretty_print(s))
            .collect();
        (
            "case",
            format!("{} :do [{}]", pretty_print(&self.value), items.join(", ")),
        )
    }
}

impl Node for VariableDeclaration {
    fn node_content(&self) -> (&'static str, String) {
        ("var-decl", format!("{} :type {}", self.name, self.ty))
    }

    fn child_node(&self) -> Option<&dyn Node> {
        self.value.as_ref().map(|v| v as &dyn Node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Access, ExprKind};

    fn pos() -> Position {
        Position::start()
    }

    fn boolean(value: bool) -> Expr {
        Expr::new(ExprKind::Boolean(value), pos())
    }

    fn block(id: u32) -> Statement {
        Statement::new(
            StatementKind::Block(StatementList::new(NodeId(id), vec![], pos())),
            pos(),
        )
    }

    #[test]
    fn test_if_else_pretty_print() {
        let stmt = Statement::new(
            StatementKind::If(IfStatement {
                condition: boolean(true),
                body: Box::new(block(1)),
                else_branch: Some(Box::new(block(2))),
            }),
            pos(),
        );
        assert_eq!(
            pretty_print(&stmt),
            "(#if (#boolean true) :body (#stmt-block) :else (#stmt-block))"
        );
    }

    #[test]
    fn test_var_decl_pretty_print() {
        let decl = VariableDeclaration {
            ty: NamedType::new("int", true),
            name: "xs".into(),
            value: None,
            position: pos(),
        };
        assert_eq!(pretty_print(&decl), "(#var-decl xs :type int[])");
    }

    #[test]
    fn test_assignment_pretty_print() {
        let stmt = Statement::new(
            StatementKind::Assignment(AssignmentStatement {
                op: AssignOp::AddAssign,
                target: NamedValue::new(Access::Field("x".into()), pos()),
                value: Expr::new(ExprKind::Num(2), pos()),
            }),
            pos(),
        );
        assert_eq!(
            pretty_print(&stmt),
            "(#assignment += :left (#field x) :right (#num 2))"
        );
    }

    #[test]
    fn test_compound_operator() {
        assert_eq!(AssignOp::Assign.binary_op(), None);
        assert_eq!(
            AssignOp::RemAssign.binary_op(),
            Some(crate::ast::BinaryOp::Rem)
        );
    }
}
