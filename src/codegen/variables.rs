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

//! Local variable access for code generation.
//!
//! Locals are resolved against the scope the name analyzer attached to the
//! enclosing node. Slots 0 to 3 use the compact `iload_N` family, higher
//! slots the explicit-operand form.

use super::emit::EmitHelpers;
use super::CodeGenerator;
use crate::analyzer::DataType;

/// A resolved local variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Local {
    /// Local variable slot.
    pub slot: u16,
    /// Declared type of the variable.
    pub ty: DataType,
}

/// Direction of a local variable access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOp {
    Load,
    Store,
}

/// The instruction loading or storing a local of the given type.
pub fn local_instruction(op: LocalOp, slot: u16, ty: &DataType) -> String {
    let kind = if ty.is_integer_kind() { "i" } else { "a" };
    let action = match op {
        LocalOp::Load => "load",
        LocalOp::Store => "store",
    };

    if slot <= 3 {
        format!("{}{}_{}", kind, action, slot)
    } else {
        format!("{}{} {}", kind, action, slot)
    }
}

/// Extension trait for local variable access.
pub trait VariableManager {
    /// Resolve a local variable or parameter visible in the current scope.
    fn lookup_local(&self, name: &str) -> Option<Local>;

    /// Push the value of a local.
    fn load_local(&mut self, local: &Local);

    /// Pop the top of the stack into a local.
    fn store_local(&mut self, local: &Local);
}

impl<'a> VariableManager for CodeGenerator<'a> {
    fn lookup_local(&self, name: &str) -> Option<Local> {
        let entry = self.scopes.lookup(self.scope, name)?;
        let slot = entry.slot?;
        let field = entry.field()?;
        Some(Local {
            slot,
            ty: field.ty.clone(),
        })
    }

    fn load_local(&mut self, local: &Local) {
        self.emit(local_instruction(LocalOp::Load, local.slot, &local.ty), 0, 1);
    }

    fn store_local(&mut self, local: &Local) {
        self.emit(local_instruction(LocalOp::Store, local.slot, &local.ty), 1, 0);
    }
}
