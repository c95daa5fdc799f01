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

//! Expression lowering for code generation.
//!
//! Every lowering returns the static type of the value it leaves on the
//! stack. Access chains are lowered step by step; each step consumes what
//! the previous one left behind.

use super::constants::ConstantEmitter;
use super::emit::EmitHelpers;
use super::functions::{call_cells, MethodCallGenerator};
use super::labels::LabelManager;
use super::types::{array_prefix, class_name, descriptor, method_descriptor, newarray_type};
use super::variables::VariableManager;
use super::{unresolved, unsupported, CodeGenerator};
use crate::analyzer::expressions::SYSTEM_ROOT;
use crate::analyzer::symbol::signature_of;
use crate::analyzer::DataType;
use crate::ast::{Access, BinaryOp, Expr, ExprKind, NamedType, NamedValue};
use crate::error::{CompileError, Position};

/// What the previous step of an access chain left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// Start of a chain. Nothing is on the stack.
    Head,
    /// The `System` root. Nothing is on the stack.
    System,
    /// `System.out` is on the stack.
    PrintStream,
    /// A value of the given type is on the stack.
    Value(DataType),
}

/// The instruction of an arithmetic operator.
pub fn arithmetic_instruction(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Add => Some("iadd"),
        BinaryOp::Sub => Some("isub"),
        BinaryOp::Mul => Some("imul"),
        BinaryOp::Div => Some("idiv"),
        BinaryOp::Rem => Some("irem"),
        _ => None,
    }
}

/// The condition suffix of a comparison operator (`lt` in `if_icmplt`).
fn comparison_suffix(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Less => Some("lt"),
        BinaryOp::Greater => Some("gt"),
        BinaryOp::LessEqual => Some("le"),
        BinaryOp::GreaterEqual => Some("ge"),
        BinaryOp::Equal => Some("eq"),
        BinaryOp::NotEqual => Some("ne"),
        _ => None,
    }
}

/// Extension trait for expression lowering.
pub trait ExpressionGenerator {
    /// Lower an expression that must produce a value.
    fn gen_expression(&mut self, expr: &Expr) -> Result<DataType, CompileError>;

    /// Lower a boolean condition.
    fn gen_condition(&mut self, expr: &Expr) -> Result<(), CompileError>;

    /// Lower an arithmetic operator.
    fn gen_arithmetic(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        position: Position,
    ) -> Result<DataType, CompileError>;

    /// Lower a comparison to a materialized 0 or 1.
    fn gen_comparison(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        position: Position,
    ) -> Result<DataType, CompileError>;

    /// Lower `&&` or `||` with short-circuit evaluation.
    fn gen_logical(&mut self, op: BinaryOp, left: &Expr, right: &Expr)
        -> Result<DataType, CompileError>;

    /// Lower `new C(args)`.
    fn gen_object_creation(
        &mut self,
        class: &str,
        args: &[Expr],
        position: Position,
    ) -> Result<DataType, CompileError>;

    /// Lower `new T[length]`.
    fn gen_array_creation(
        &mut self,
        element: &NamedType,
        length: &Expr,
        position: Position,
    ) -> Result<DataType, CompileError>;

    /// Lower a whole access chain. Calls of void methods yield `void`.
    fn gen_named_value(&mut self, chain: &NamedValue) -> Result<DataType, CompileError>;

    /// Lower one step of an access chain.
    fn gen_step(&mut self, step: &NamedValue, receiver: Receiver)
        -> Result<Receiver, CompileError>;

    /// Lower a name at the head of a chain: local, property or `System`.
    fn gen_name(&mut self, name: &str, position: Position) -> Result<Receiver, CompileError>;

    /// Find a property, returning its declaring class and type.
    fn resolve_property(
        &self,
        class: &str,
        name: &str,
        position: Position,
    ) -> Result<(String, DataType), CompileError>;

    /// Lower an array index and check that it is an integer.
    fn gen_index(&mut self, index: &Expr) -> Result<(), CompileError>;
}

impl<'a> ExpressionGenerator for CodeGenerator<'a> {
    fn gen_expression(&mut self, expr: &Expr) -> Result<DataType, CompileError> {
        match &expr.kind {
            ExprKind::Num(value) => {
                self.push_int(*value);
                Ok(DataType::int())
            }
            ExprKind::Char(c) => {
                self.push_int(*c as i32);
                Ok(DataType::char())
            }
            ExprKind::Boolean(value) => {
                self.push_bool(*value);
                Ok(DataType::boolean())
            }
            ExprKind::Str(value) => {
                self.push_string(value);
                Ok(DataType::string())
            }
            ExprKind::Null => {
                self.push_null();
                Ok(DataType::null())
            }
            ExprKind::BinOp { op, left, right } => {
                if op.is_logical() {
                    self.gen_logical(*op, left, right)
                } else if op.is_comparison() {
                    self.gen_comparison(*op, left, right, expr.position)
                } else {
                    self.gen_arithmetic(*op, left, right, expr.position)
                }
            }
            ExprKind::Named(chain) => {
                let ty = self.gen_named_value(chain)?;
                if ty.is_void() {
                    return Err(unsupported(
                        "A method returning void cannot be used as a value",
                        expr.position,
                    ));
                }
                Ok(ty)
            }
            ExprKind::ObjectCreation { class_name, args } => {
                self.gen_object_creation(class_name, args, expr.position)
            }
            ExprKind::ArrayCreation { element, length } => {
                self.gen_array_creation(element, length, expr.position)
            }
        }
    }

    fn gen_condition(&mut self, expr: &Expr) -> Result<(), CompileError> {
        let ty = self.gen_expression(expr)?;
        if ty != DataType::boolean() {
            return Err(unsupported(
                format!("Condition must be boolean, found '{}'", ty),
                expr.position,
            ));
        }
        Ok(())
    }

    fn gen_arithmetic(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        position: Position,
    ) -> Result<DataType, CompileError> {
        let left_ty = self.gen_expression(left)?;
        let right_ty = self.gen_expression(right)?;

        let instruction = arithmetic_instruction(op)
            .filter(|_| left_ty.is_integer_kind() && right_ty.is_integer_kind())
            .ok_or_else(|| {
                unsupported(
                    format!(
                        "Operator '{}' cannot be applied to '{}' and '{}'",
                        op.symbol(),
                        left_ty,
                        right_ty
                    ),
                    position,
                )
            })?;

        self.emit(instruction, 2, 1);
        Ok(DataType::int())
    }

    fn gen_comparison(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        position: Position,
    ) -> Result<DataType, CompileError> {
        let left_ty = self.gen_expression(left)?;
        let right_ty = self.gen_expression(right)?;

        let suffix = comparison_suffix(op).unwrap_or("eq");
        let instruction = if left_ty.is_integer_kind() && right_ty.is_integer_kind() {
            format!("if_icmp{}", suffix)
        } else if left_ty.is_reference()
            && right_ty.is_reference()
            && matches!(op, BinaryOp::Equal | BinaryOp::NotEqual)
        {
            format!("if_acmp{}", suffix)
        } else {
            return Err(unsupported(
                format!(
                    "Operator '{}' cannot be applied to '{}' and '{}'",
                    op.symbol(),
                    left_ty,
                    right_ty
                ),
                position,
            ));
        };

        let true_label = self.new_label();
        let end_label = self.new_label();
        self.emit(format!("{} L{}", instruction, true_label), 2, 0);
        self.push_int(0);
        self.emit(format!("goto L{}", end_label), 0, 0);
        // the two pushes are alternatives
        self.stack.pop(1);
        self.place_label(true_label);
        self.push_int(1);
        self.place_label(end_label);

        Ok(DataType::boolean())
    }

    fn gen_logical(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<DataType, CompileError> {
        // `&&` jumps away on the first false operand, `||` on the first true one
        let (branch, short_value) = match op {
            BinaryOp::And => ("ifeq", 0),
            _ => ("ifne", 1),
        };
        let short_label = self.new_label();
        let end_label = self.new_label();

        for operand in [left, right] {
            self.gen_condition(operand)?;
            self.emit(format!("{} L{}", branch, short_label), 1, 0);
        }

        self.push_int(1 - short_value);
        self.emit(format!("goto L{}", end_label), 0, 0);
        self.stack.pop(1);
        self.place_label(short_label);
        self.push_int(short_value);
        self.place_label(end_label);

        Ok(DataType::boolean())
    }

    fn gen_object_creation(
        &mut self,
        class: &str,
        args: &[Expr],
        position: Position,
    ) -> Result<DataType, CompileError> {
        let table = self.table;

        self.emit(format!("new {}", class), 0, 1);
        self.emit("dup", 1, 2);
        let arg_types = self.gen_arguments(args)?;

        let constructor = table
            .resolve_constructor(class, &arg_types)
            .ok_or_else(|| {
                unresolved(
                    format!(
                        "No constructor '{}' in class '{}'",
                        signature_of(class, &arg_types),
                        class
                    ),
                    position,
                )
            })?;

        self.emit(
            format!(
                "invokespecial Method {} <init> {}",
                class,
                method_descriptor(&constructor.params, &DataType::void())
            ),
            call_cells(args, position)?,
            0,
        );

        Ok(DataType::simple(class))
    }

    fn gen_array_creation(
        &mut self,
        element: &NamedType,
        length: &Expr,
        position: Position,
    ) -> Result<DataType, CompileError> {
        let element = DataType::from(element);
        let length_ty = self.gen_expression(length)?;
        if !length_ty.is_integer_kind() {
            return Err(unsupported(
                format!("Array length must be an int, found '{}'", length_ty),
                position,
            ));
        }

        match newarray_type(&element) {
            Some(primitive) => self.emit(format!("newarray {}", primitive), 1, 1),
            None => self.emit(format!("anewarray {}", class_name(&element.name)), 1, 1),
        }

        Ok(element.array_of())
    }

    fn gen_named_value(&mut self, chain: &NamedValue) -> Result<DataType, CompileError> {
        let mut receiver = Receiver::Head;
        for step in chain.steps() {
            receiver = self.gen_step(step, receiver)?;
        }

        match receiver {
            Receiver::Value(ty) => Ok(ty),
            _ => Err(unsupported(
                "'System' and 'System.out' cannot be used as values",
                chain.position,
            )),
        }
    }

    fn gen_step(
        &mut self,
        step: &NamedValue,
        receiver: Receiver,
    ) -> Result<Receiver, CompileError> {
        let position = step.position;

        match (receiver, &step.access) {
            (Receiver::Head, Access::This) => {
                self.emit("aload_0", 0, 1);
                Ok(Receiver::Value(DataType::simple(self.class_name.clone())))
            }
            (Receiver::Head, Access::Field(name)) => self.gen_name(name, position),
            (Receiver::Head, Access::MethodCall { name, args }) => {
                self.emit("aload_0", 0, 1);
                let this = DataType::simple(self.class_name.clone());
                self.gen_call(&this, name, args, position)
            }
            (Receiver::System, Access::Field(name)) if name == "out" => {
                self.emit(
                    "getstatic Field java/lang/System out Ljava/io/PrintStream;",
                    0,
                    1,
                );
                Ok(Receiver::PrintStream)
            }
            (Receiver::PrintStream, Access::MethodCall { name, args }) => {
                self.gen_print(name, args, position)
            }
            (Receiver::Value(ty), Access::Field(name)) if ty.is_array && name == "length" => {
                self.emit("arraylength", 1, 1);
                Ok(Receiver::Value(DataType::int()))
            }
            (Receiver::Value(ty), Access::ArrayIndex(index)) if ty.is_array => {
                self.gen_index(index)?;
                let element = ty.element();
                self.emit(format!("{}aload", array_prefix(&element)), 2, 1);
                Ok(Receiver::Value(element))
            }
            (Receiver::Value(ty), Access::Field(name)) if !ty.is_array && ty.is_reference() => {
                let (owner, field_ty) = self.resolve_property(&ty.name, name, position)?;
                self.emit(
                    format!("getfield Field {} {} {}", owner, name, descriptor(&field_ty)),
                    1,
                    1,
                );
                Ok(Receiver::Value(field_ty))
            }
            (Receiver::Value(ty), Access::MethodCall { name, args })
                if !ty.is_array && ty.is_reference() =>
            {
                self.gen_call(&ty, name, args, position)
            }
            (receiver, access) => {
                let what = match access {
                    Access::This => "'this'".to_string(),
                    Access::Field(name) => format!("field '{}'", name),
                    Access::MethodCall { name, .. } => format!("method '{}'", name),
                    Access::ArrayIndex(_) => "an index".to_string(),
                };
                let on = match receiver {
                    Receiver::Head => "here".to_string(),
                    Receiver::System => "on 'System'".to_string(),
                    Receiver::PrintStream => "on 'System.out'".to_string(),
                    Receiver::Value(ty) => format!("on a value of type '{}'", ty),
                };
                Err(unsupported(format!("Cannot access {} {}", what, on), position))
            }
        }
    }

    fn gen_name(&mut self, name: &str, position: Position) -> Result<Receiver, CompileError> {
        if let Some(local) = self.lookup_local(name) {
            self.load_local(&local);
            return Ok(Receiver::Value(local.ty));
        }

        let table = self.table;
        if let Some((owner, property)) = table.lookup_property(&self.class_name, name) {
            let ty = property.field.ty.clone();
            self.emit("aload_0", 0, 1);
            self.emit(
                format!("getfield Field {} {} {}", owner.name, name, descriptor(&ty)),
                1,
                1,
            );
            return Ok(Receiver::Value(ty));
        }

        if name == SYSTEM_ROOT {
            return Ok(Receiver::System);
        }

        Err(unresolved(format!("Undefined variable '{}'", name), position))
    }

    fn resolve_property(
        &self,
        class: &str,
        name: &str,
        position: Position,
    ) -> Result<(String, DataType), CompileError> {
        self.table
            .lookup_property(class, name)
            .map(|(owner, property)| (owner.name.clone(), property.field.ty.clone()))
            .ok_or_else(|| {
                unresolved(
                    format!("Undefined property '{}' in '{}'", name, class),
                    position,
                )
            })
    }

    fn gen_index(&mut self, index: &Expr) -> Result<(), CompileError> {
        let ty = self.gen_expression(index)?;
        if !ty.is_integer_kind() {
            return Err(unsupported(
                format!("Array index must be an int, found '{}'", ty),
                index.position,
            ));
        }
        Ok(())
    }
}
