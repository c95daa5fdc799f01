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

//! Emit helper methods for code generation.
//!
//! This module provides the low-level instruction emission used by every
//! other generator module:
//! - Operand stack accounting with a high-water mark
//! - Label placement (`L<N>:` prefixed to the labelled instruction)
//! - Two-phase method emission: buffer the body, then write the header

use super::CodeGenerator;

/// Operand stack depth tracking for one method body.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperandStack {
    depth: u16,
    max: u16,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `count` cells.
    pub fn push(&mut self, count: u16) {
        self.depth = self.depth.saturating_add(count);
        self.max = self.max.max(self.depth);
    }

    /// Pop `count` cells.
    pub fn pop(&mut self, count: u16) {
        self.depth = self.depth.saturating_sub(count);
    }

    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// The deepest the stack has been since the last reset.
    pub fn max(&self) -> u16 {
        self.max
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Instructions that leave the method.
const RETURN_INSTRUCTIONS: [&str; 3] = ["return", "ireturn", "areturn"];

/// Extension trait for instruction emission.
pub trait EmitHelpers {
    /// Emit an instruction that pops `pops` cells and then pushes `pushes` cells.
    fn emit(&mut self, instruction: impl Into<String>, pops: u16, pushes: u16);

    /// Place a label before the next emitted instruction.
    fn place_label(&mut self, label: u32);

    /// Check if the last emitted instruction leaves the method.
    fn ends_with_return(&self) -> bool;

    /// Append a directive line to the finished output.
    fn directive(&mut self, line: impl Into<String>);

    /// Close the current method: add the implicit `return` if needed and
    /// write header, body and epilogue to the output.
    fn finish_method(&mut self, header: String, locals: u16);
}

impl<'a> EmitHelpers for CodeGenerator<'a> {
    fn emit(&mut self, instruction: impl Into<String>, pops: u16, pushes: u16) {
        let instruction = instruction.into();
        let line = match self.pending_label.take() {
            Some(label) => format!("L{}:\t{}", label, instruction),
            None => instruction,
        };
        self.code.push(line);
        self.stack.pop(pops);
        self.stack.push(pushes);
    }

    fn place_label(&mut self, label: u32) {
        // two labels in a row: the first one stands alone
        if let Some(previous) = self.pending_label.replace(label) {
            self.code.push(format!("L{}:", previous));
        }
    }

    fn ends_with_return(&self) -> bool {
        self.code.last().is_some_and(|line| {
            let instruction = line.rsplit('\t').next().unwrap_or(line);
            RETURN_INSTRUCTIONS.contains(&instruction)
        })
    }

    fn directive(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    fn finish_method(&mut self, header: String, locals: u16) {
        if self.pending_label.is_some() || !self.ends_with_return() {
            self.emit("return", 0, 0);
        }

        self.output.push(header);
        self.output.push(format!(
            ".code stack {} locals {}",
            self.stack.max(),
            locals
        ));
        self.output.append(&mut self.code);
        self.output.push(".end code".to_string());
        self.output.push(".end method".to_string());

        self.stack.reset();
    }
}
