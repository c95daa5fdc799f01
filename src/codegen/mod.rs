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

//! Code generation module for the Yava compiler.
//!
//! This module lowers an analyzed AST to Krakatau assembly text for the JVM.
//! It handles:
//! - Class, interface, field and method directives
//! - Operand stack accounting and method headers
//! - Expressions, access chains and method calls
//! - Control flow with numbered labels
//!
//! Generation assumes the semantic passes finished without errors. Anything
//! it still cannot resolve is reported as an error instead of a panic.
//!
//! # Module Structure
//!
//! - `assignments` - Assignments and variable declarations (AssignmentGenerator trait)
//! - `constants` - Constant encoding (ConstantEmitter trait)
//! - `control_flow` - if, while, for, switch and jumps (ControlFlowGenerator trait)
//! - `declarations` - Classes, interfaces and methods (DeclarationGenerator trait)
//! - `emit` - Instruction emission and stack accounting (EmitHelpers trait)
//! - `expressions` - Operators, creation and access chains (ExpressionGenerator trait)
//! - `functions` - Method calls and printing (MethodCallGenerator trait)
//! - `labels` - Label numbering and loop targets (LabelManager trait)
//! - `types` - JVM descriptors
//! - `variables` - Local variable access (VariableManager trait)

pub mod assignments;
pub mod constants;
pub mod control_flow;
pub mod declarations;
pub mod emit;
pub mod expressions;
pub mod functions;
pub mod labels;
pub mod types;
pub mod variables;

use assignments::AssignmentGenerator;
use control_flow::ControlFlowGenerator;
use declarations::DeclarationGenerator;
use emit::{EmitHelpers, OperandStack};
use expressions::ExpressionGenerator;
use labels::LoopContext;

use crate::analyzer::{Analysis, ScopeArena, ScopeId, TypeTable};
use crate::ast::{NodeId, Program, Statement, StatementKind, StatementList, TypeDecl};
use crate::error::{CompileError, ErrorCode, Position};

/// Class file version written for every type.
pub const CLASS_VERSION: (u16, u16) = (49, 0);

/// The code generator state.
pub struct CodeGenerator<'a> {
    pub(crate) table: &'a TypeTable,
    pub(crate) scopes: &'a ScopeArena,
    /// Finished output lines.
    pub(crate) output: Vec<String>,
    /// Instructions of the method being generated.
    pub(crate) code: Vec<String>,
    /// Label waiting for the next instruction.
    pub(crate) pending_label: Option<u32>,
    pub(crate) stack: OperandStack,
    pub(crate) label_counter: u32,
    pub(crate) loop_stack: Vec<LoopContext>,
    /// Scope used to resolve names.
    pub(crate) scope: ScopeId,
    /// Class being generated.
    pub(crate) class_name: String,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator over the results of semantic analysis.
    pub fn new(table: &'a TypeTable, scopes: &'a ScopeArena) -> Self {
        Self {
            table,
            scopes,
            output: Vec::new(),
            code: Vec::new(),
            pending_label: None,
            stack: OperandStack::new(),
            label_counter: 0,
            loop_stack: Vec::new(),
            scope: ScopeId::ROOT,
            class_name: String::new(),
        }
    }

    /// Generate the assembly text of a whole program.
    pub fn generate(mut self, program: &Program) -> Result<String, CompileError> {
        for (i, decl) in program.declarations.iter().enumerate() {
            if i > 0 {
                self.directive("");
            }
            match decl {
                TypeDecl::Class(class) => self.gen_class(class)?,
                TypeDecl::Interface(interface) => self.gen_interface(interface)?,
            }
        }

        let mut text = self.output.join("\n");
        text.push('\n');
        Ok(text)
    }

    // ========================================
    // Scopes
    // ========================================

    /// Switch to the scope attached to `node`, returning the previous scope.
    pub(crate) fn enter_node_scope(&mut self, node: NodeId) -> ScopeId {
        let saved = self.scope;
        if let Some(scope) = self.scopes.scope_of(node) {
            self.scope = scope;
        }
        saved
    }

    // ========================================
    // Statements
    // ========================================

    pub(crate) fn gen_statements(&mut self, statements: &[Statement]) -> Result<(), CompileError> {
        for stmt in statements {
            self.gen_statement(stmt)?;
        }
        Ok(())
    }

    pub(crate) fn gen_statement(&mut self, stmt: &Statement) -> Result<(), CompileError> {
        match &stmt.kind {
            StatementKind::Block(block) => self.gen_block(block),
            StatementKind::If(if_stmt) => self.gen_if(if_stmt, None),
            StatementKind::While(while_stmt) => self.gen_while(while_stmt),
            StatementKind::For(for_stmt) => self.gen_for(for_stmt),
            StatementKind::Switch(switch) => self.gen_switch(switch, stmt.position),
            StatementKind::Jump(jump) => self.gen_jump(jump, stmt.position),
            StatementKind::Assignment(assignment) => self.gen_assignment(assignment),
            StatementKind::VarDecl(decl) => self.gen_var_decl(decl),
            StatementKind::MethodCall(chain) => {
                let result = self.gen_named_value(chain)?;
                if !result.is_void() {
                    self.emit("pop", 1, 0);
                }
                Ok(())
            }
        }
    }

    /// Generate a statement list in the scope attached to it.
    pub(crate) fn gen_block(&mut self, block: &StatementList) -> Result<(), CompileError> {
        let saved = self.enter_node_scope(block.id);
        let result = self.gen_statements(&block.statements);
        self.scope = saved;
        result
    }
}

/// An error for a construct the generator cannot lower.
pub(crate) fn unsupported(message: impl Into<String>, position: Position) -> CompileError {
    CompileError::new(ErrorCode::UnsupportedOperation, message, position)
}

/// An error for a name the generator cannot resolve.
pub(crate) fn unresolved(message: impl Into<String>, position: Position) -> CompileError {
    CompileError::new(ErrorCode::UnresolvedSymbol, message, position)
}

/// Generate assembly text for an analyzed program.
pub fn generate(program: &Program, analysis: &Analysis) -> Result<String, CompileError> {
    CodeGenerator::new(&analysis.table, &analysis.scopes).generate(program)
}
