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

//! Assignment and variable declaration generation.
//!
//! The target chain is lowered up to its last step, which leaves the
//! object or array to store into on the stack. Compound assignments
//! duplicate that receiver to load the old value first.

use super::constants::ConstantEmitter;
use super::emit::EmitHelpers;
use super::expressions::{arithmetic_instruction, ExpressionGenerator, Receiver};
use super::types::{array_prefix, descriptor};
use super::variables::VariableManager;
use super::{unresolved, unsupported, CodeGenerator};
use crate::analyzer::DataType;
use crate::ast::{Access, AssignmentStatement, BinaryOp, Expr, VariableDeclaration};
use crate::error::{CompileError, Position};

/// Extension trait for assignments.
pub trait AssignmentGenerator {
    /// Generate a local variable declaration, storing its value or the default.
    fn gen_var_decl(&mut self, decl: &VariableDeclaration) -> Result<(), CompileError>;

    /// Generate an assignment to a local, field or array element.
    fn gen_assignment(&mut self, stmt: &AssignmentStatement) -> Result<(), CompileError>;

    /// Store into a field of the object on the stack.
    fn gen_field_store(
        &mut self,
        owner: &str,
        name: &str,
        ty: &DataType,
        stmt: &AssignmentStatement,
    ) -> Result<(), CompileError>;

    /// Lower the assigned value. For compound assignments the old value is
    /// already on the stack and gets combined with it.
    fn gen_assigned_value(
        &mut self,
        value: &Expr,
        op: Option<BinaryOp>,
        target: &DataType,
        position: Position,
    ) -> Result<(), CompileError>;
}

impl<'a> AssignmentGenerator for CodeGenerator<'a> {
    fn gen_var_decl(&mut self, decl: &VariableDeclaration) -> Result<(), CompileError> {
        let local = self.lookup_local(&decl.name).ok_or_else(|| {
            unresolved(format!("Undefined variable '{}'", decl.name), decl.position)
        })?;

        match &decl.value {
            Some(value) => self.gen_assigned_value(value, None, &local.ty, decl.position)?,
            None => self.push_default(&local.ty),
        }
        self.store_local(&local);
        Ok(())
    }

    fn gen_assignment(&mut self, stmt: &AssignmentStatement) -> Result<(), CompileError> {
        let steps: Vec<_> = stmt.target.steps().collect();
        let Some((last, prefix)) = steps.split_last() else {
            return Err(unsupported("Invalid assignment target", stmt.target.position));
        };
        let position = last.position;
        let op = stmt.op.binary_op();

        let mut receiver = Receiver::Head;
        for step in prefix {
            receiver = self.gen_step(step, receiver)?;
        }

        match (&last.access, receiver) {
            (Access::Field(name), Receiver::Head) => {
                if let Some(local) = self.lookup_local(name) {
                    if op.is_some() {
                        self.load_local(&local);
                    }
                    self.gen_assigned_value(&stmt.value, op, &local.ty, position)?;
                    self.store_local(&local);
                    return Ok(());
                }

                let class = self.class_name.clone();
                let (owner, ty) = self.resolve_property(&class, name, position)?;
                self.emit("aload_0", 0, 1);
                self.gen_field_store(&owner, name, &ty, stmt)
            }
            (Access::Field(name), Receiver::Value(object))
                if !object.is_array && object.is_reference() =>
            {
                let (owner, ty) = self.resolve_property(&object.name, name, position)?;
                self.gen_field_store(&owner, name, &ty, stmt)
            }
            (Access::ArrayIndex(index), Receiver::Value(array)) if array.is_array => {
                self.gen_index(index)?;
                let element = array.element();
                let prefix = array_prefix(&element);
                if op.is_some() {
                    self.emit("dup2", 2, 4);
                    self.emit(format!("{}aload", prefix), 2, 1);
                }
                self.gen_assigned_value(&stmt.value, op, &element, position)?;
                self.emit(format!("{}astore", prefix), 3, 0);
                Ok(())
            }
            _ => Err(unsupported("Invalid assignment target", position)),
        }
    }

    fn gen_field_store(
        &mut self,
        owner: &str,
        name: &str,
        ty: &DataType,
        stmt: &AssignmentStatement,
    ) -> Result<(), CompileError> {
        let field = format!("Field {} {} {}", owner, name, descriptor(ty));
        let op = stmt.op.binary_op();

        if op.is_some() {
            self.emit("dup", 1, 2);
            self.emit(format!("getfield {}", field), 1, 1);
        }
        self.gen_assigned_value(&stmt.value, op, ty, stmt.target.position)?;
        self.emit(format!("putfield {}", field), 2, 0);
        Ok(())
    }

    fn gen_assigned_value(
        &mut self,
        value: &Expr,
        op: Option<BinaryOp>,
        target: &DataType,
        position: Position,
    ) -> Result<(), CompileError> {
        let value_ty = self.gen_expression(value)?;

        if let Some(op) = op {
            let instruction = arithmetic_instruction(op)
                .filter(|_| target.is_integer_kind() && value_ty.is_integer_kind())
                .ok_or_else(|| {
                    unsupported(
                        format!(
                            "Operator '{}=' cannot be applied to '{}' and '{}'",
                            op.symbol(),
                            target,
                            value_ty
                        ),
                        position,
                    )
                })?;
            self.emit(instruction, 2, 1);
        }
        Ok(())
    }
}
