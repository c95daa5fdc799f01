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

//! Control flow generation.
//!
//! Conditions leave 0 or 1 on the stack and are tested with `ifne`. Labels
//! are numbered per program, in allocation order.

use super::assignments::AssignmentGenerator;
use super::constants::ConstantEmitter;
use super::emit::EmitHelpers;
use super::expressions::ExpressionGenerator;
use super::labels::{LabelManager, LoopContext};
use super::variables::{Local, VariableManager};
use super::{unresolved, unsupported, CodeGenerator};
use crate::analyzer::DataType;
use crate::ast::{
    ExprKind, ForInit, ForStatement, IfStatement, JumpKind, JumpStatement, StatementKind,
    SwitchStatement, WhileStatement,
};
use crate::error::{CompileError, Position};

/// Extension trait for control flow generation.
pub trait ControlFlowGenerator {
    /// Generate an if statement. `join` is the label an enclosing if chain
    /// continues at; the outermost if places it.
    fn gen_if(&mut self, stmt: &IfStatement, join: Option<u32>) -> Result<(), CompileError>;

    /// Generate a while loop.
    fn gen_while(&mut self, stmt: &WhileStatement) -> Result<(), CompileError>;

    /// Generate a for loop.
    fn gen_for(&mut self, stmt: &ForStatement) -> Result<(), CompileError>;

    /// Generate a switch as a chain of comparisons against a stored selector.
    fn gen_switch(&mut self, stmt: &SwitchStatement, position: Position)
        -> Result<(), CompileError>;

    /// Generate `return`, `break` or `continue`.
    ///
    /// The return instruction follows the tracked type of the value:
    /// `ireturn` for int, char and boolean, `areturn` for references. The
    /// shape of the expression plays no part, so `return s;` with a String
    /// local is an `areturn`.
    fn gen_jump(&mut self, stmt: &JumpStatement, position: Position) -> Result<(), CompileError>;

    /// Emit a `goto`.
    fn gen_goto(&mut self, label: u32);
}

impl<'a> ControlFlowGenerator for CodeGenerator<'a> {
    fn gen_if(&mut self, stmt: &IfStatement, join: Option<u32>) -> Result<(), CompileError> {
        let true_label = self.new_label();
        let false_label = self.new_label();
        let end = join.unwrap_or(false_label);
        let next = if stmt.else_branch.is_some() {
            self.new_label()
        } else {
            end
        };

        self.gen_condition(&stmt.condition)?;
        self.emit(format!("ifne L{}", true_label), 1, 0);
        self.gen_goto(next);
        self.place_label(true_label);
        self.gen_statement(&stmt.body)?;
        self.gen_goto(end);

        if let Some(else_branch) = &stmt.else_branch {
            self.place_label(next);
            match &else_branch.kind {
                StatementKind::If(nested) => self.gen_if(nested, Some(end))?,
                _ => {
                    self.gen_statement(else_branch)?;
                    self.gen_goto(end);
                }
            }
        }

        if join.is_none() {
            self.place_label(end);
        }
        Ok(())
    }

    fn gen_while(&mut self, stmt: &WhileStatement) -> Result<(), CompileError> {
        let top = self.new_label();
        let body = self.new_label();
        let bottom = self.new_label();

        self.place_label(top);
        self.gen_condition(&stmt.condition)?;
        self.emit(format!("ifne L{}", body), 1, 0);
        self.gen_goto(bottom);

        self.place_label(body);
        self.enter_loop(LoopContext {
            continue_label: Some(top),
            break_label: bottom,
        });
        self.gen_statement(&stmt.body)?;
        self.exit_loop();
        self.gen_goto(top);

        self.place_label(bottom);
        Ok(())
    }

    fn gen_for(&mut self, stmt: &ForStatement) -> Result<(), CompileError> {
        let saved = self.enter_node_scope(stmt.id);

        match &stmt.init {
            Some(ForInit::Declaration(decl)) => self.gen_var_decl(decl)?,
            Some(ForInit::Assignment(assignment)) => self.gen_assignment(assignment)?,
            None => {}
        }

        let top = self.new_label();
        let body = self.new_label();
        let step = self.new_label();
        let bottom = self.new_label();

        self.place_label(top);
        if let Some(condition) = &stmt.condition {
            self.gen_condition(condition)?;
            self.emit(format!("ifne L{}", body), 1, 0);
            self.gen_goto(bottom);
        }

        self.place_label(body);
        self.enter_loop(LoopContext {
            continue_label: Some(step),
            break_label: bottom,
        });
        self.gen_statement(&stmt.body)?;
        self.exit_loop();

        self.place_label(step);
        if let Some(update) = &stmt.update {
            self.gen_statement(update)?;
        }
        self.gen_goto(top);

        self.place_label(bottom);
        self.scope = saved;
        Ok(())
    }

    fn gen_switch(
        &mut self,
        stmt: &SwitchStatement,
        position: Position,
    ) -> Result<(), CompileError> {
        let slot = self
            .scopes
            .reserved_slot(stmt.id)
            .ok_or_else(|| unresolved("Switch statement has no selector slot", position))?;

        let selector_ty = self.gen_expression(&stmt.selector)?;
        if !selector_ty.is_integer_kind() {
            return Err(unsupported(
                format!(
                    "Switch selector must be int, char or boolean, found '{}'",
                    selector_ty
                ),
                stmt.selector.position,
            ));
        }
        let selector = Local {
            slot,
            ty: DataType::int(),
        };
        self.store_local(&selector);

        let case_labels: Vec<u32> = stmt.cases.iter().map(|_| self.new_label()).collect();
        let default_label = stmt.default.as_ref().map(|_| self.new_label());
        let end = self.new_label();

        for (case, label) in stmt.cases.iter().zip(&case_labels) {
            self.load_local(&selector);
            match &case.value.kind {
                ExprKind::Num(value) => self.push_int(*value),
                ExprKind::Char(c) => self.push_int(*c as i32),
                ExprKind::Boolean(value) => self.push_bool(*value),
                _ => {
                    return Err(unsupported(
                        "Case labels must be integer, character or boolean literals",
                        case.position,
                    ))
                }
            }
            self.emit(format!("if_icmpeq L{}", label), 2, 0);
        }
        self.gen_goto(default_label.unwrap_or(end));

        // cases fall through into each other, `break` leaves through `end`
        self.enter_loop(LoopContext {
            continue_label: None,
            break_label: end,
        });
        for (case, label) in stmt.cases.iter().zip(&case_labels) {
            self.place_label(*label);
            self.gen_block(&case.body)?;
        }
        if let (Some(body), Some(label)) = (&stmt.default, default_label) {
            self.place_label(label);
            self.gen_block(body)?;
        }
        self.exit_loop();

        self.place_label(end);
        Ok(())
    }

    fn gen_jump(&mut self, stmt: &JumpStatement, position: Position) -> Result<(), CompileError> {
        match stmt.kind {
            JumpKind::Return => match &stmt.value {
                Some(value) => {
                    let ty = self.gen_expression(value)?;
                    let instruction = if ty.is_integer_kind() {
                        "ireturn"
                    } else {
                        "areturn"
                    };
                    self.emit(instruction, 1, 0);
                }
                None => self.emit("return", 0, 0),
            },
            JumpKind::Break => {
                let label = self
                    .break_label()
                    .ok_or_else(|| unsupported("'break' outside of a loop or switch", position))?;
                self.gen_goto(label);
            }
            JumpKind::Continue => {
                let label = self
                    .continue_label()
                    .ok_or_else(|| unsupported("'continue' outside of a loop", position))?;
                self.gen_goto(label);
            }
        }
        Ok(())
    }

    fn gen_goto(&mut self, label: u32) {
        self.emit(format!("goto L{}", label), 0, 0);
    }
}
