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

//! Method call lowering.
//!
//! Calls on classes use `invokevirtual`, calls on interfaces use
//! `invokeinterface`. `System.out.print` and `System.out.println` are the
//! only library methods the language knows about.

use super::emit::EmitHelpers;
use super::expressions::{ExpressionGenerator, Receiver};
use super::types::{method_descriptor, print_descriptor};
use super::{unresolved, unsupported, CodeGenerator};
use crate::analyzer::symbol::signature_of;
use crate::analyzer::DataType;
use crate::ast::Expr;
use crate::error::{CompileError, Position};

const PRINT_STREAM: &str = "java/io/PrintStream";

/// Stack cells an instance call consumes: the arguments plus the receiver.
///
/// `invokeinterface` stores this count in a single unsigned byte.
pub fn call_cells(args: &[Expr], position: Position) -> Result<u16, CompileError> {
    args.len()
        .checked_add(1)
        .and_then(|cells| u8::try_from(cells).ok())
        .map(u16::from)
        .ok_or_else(|| {
            unsupported(
                format!(
                    "A call can pass at most {} arguments, found {}",
                    u8::MAX - 1,
                    args.len()
                ),
                position,
            )
        })
}

/// Extension trait for method calls.
pub trait MethodCallGenerator {
    /// Lower the arguments of a call, returning their types.
    fn gen_arguments(&mut self, args: &[Expr]) -> Result<Vec<DataType>, CompileError>;

    /// Call `name` on a receiver of type `receiver` that is already on the stack.
    fn gen_call(
        &mut self,
        receiver: &DataType,
        name: &str,
        args: &[Expr],
        position: Position,
    ) -> Result<Receiver, CompileError>;

    /// Lower `System.out.print(...)` or `System.out.println(...)`.
    fn gen_print(
        &mut self,
        name: &str,
        args: &[Expr],
        position: Position,
    ) -> Result<Receiver, CompileError>;
}

impl<'a> MethodCallGenerator for CodeGenerator<'a> {
    fn gen_arguments(&mut self, args: &[Expr]) -> Result<Vec<DataType>, CompileError> {
        args.iter().map(|arg| self.gen_expression(arg)).collect()
    }

    fn gen_call(
        &mut self,
        receiver: &DataType,
        name: &str,
        args: &[Expr],
        position: Position,
    ) -> Result<Receiver, CompileError> {
        let table = self.table;
        let arg_types = self.gen_arguments(args)?;

        let (owner, method) = table
            .resolve_method(&receiver.name, name, &arg_types)
            .ok_or_else(|| {
                unresolved(
                    format!(
                        "Undefined method '{}' in '{}'",
                        signature_of(name, &arg_types),
                        receiver
                    ),
                    position,
                )
            })?;

        if method.is_static() {
            return Err(unsupported(
                format!("Cannot call the static method '{}' on an object", name),
                position,
            ));
        }

        let descriptor = method_descriptor(&method.params, &method.return_type);
        let pops = call_cells(args, position)?;
        let pushes = u16::from(!method.return_type.is_void());

        if owner.is_interface() {
            self.emit(
                format!(
                    "invokeinterface InterfaceMethod {} {} {} {}",
                    owner.name,
                    name,
                    descriptor,
                    pops
                ),
                pops,
                pushes,
            );
        } else {
            self.emit(
                format!("invokevirtual Method {} {} {}", owner.name, name, descriptor),
                pops,
                pushes,
            );
        }

        Ok(Receiver::Value(method.return_type.clone()))
    }

    fn gen_print(
        &mut self,
        name: &str,
        args: &[Expr],
        position: Position,
    ) -> Result<Receiver, CompileError> {
        match (name, args) {
            ("println", []) => {
                self.emit(format!("invokevirtual Method {} println ()V", PRINT_STREAM), 1, 0);
            }
            ("print" | "println", [arg]) => {
                let ty = self.gen_expression(arg)?;
                self.emit(
                    format!(
                        "invokevirtual Method {} {} ({})V",
                        PRINT_STREAM,
                        name,
                        print_descriptor(&ty)
                    ),
                    2,
                    0,
                );
            }
            _ => {
                return Err(unsupported(
                    format!("Unsupported method 'System.out.{}'", name),
                    position,
                ))
            }
        }

        Ok(Receiver::Value(DataType::void()))
    }
}
