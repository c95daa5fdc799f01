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

//! Label management for code generation.
//!
//! Labels are numbered by a single counter per generation run, so label
//! numbers strictly increase and are never reused.

use super::CodeGenerator;

/// Jump targets of an enclosing loop or switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopContext {
    /// Target of `continue`. A switch has none.
    pub continue_label: Option<u32>,
    /// Target of `break`.
    pub break_label: u32,
}

/// Extension trait for label management.
pub trait LabelManager {
    /// Allocate a fresh label number.
    fn new_label(&mut self) -> u32;

    /// Enter a loop or switch body.
    fn enter_loop(&mut self, context: LoopContext);

    /// Leave the innermost loop or switch body.
    fn exit_loop(&mut self);

    /// The target of `break` in the current position.
    fn break_label(&self) -> Option<u32>;

    /// The target of `continue`: the innermost loop, skipping switches.
    fn continue_label(&self) -> Option<u32>;
}

impl<'a> LabelManager for CodeGenerator<'a> {
    fn new_label(&mut self) -> u32 {
        let label = self.label_counter;
        self.label_counter += 1;
        label
    }

    fn enter_loop(&mut self, context: LoopContext) {
        self.loop_stack.push(context);
    }

    fn exit_loop(&mut self) {
        self.loop_stack.pop();
    }

    fn break_label(&self) -> Option<u32> {
        self.loop_stack.last().map(|c| c.break_label)
    }

    fn continue_label(&self) -> Option<u32> {
        self.loop_stack.iter().rev().find_map(|c| c.continue_label)
    }
}
