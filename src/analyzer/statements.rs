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

//! Statement analysis for the name analyzer.
//!
//! Blocks, case bodies and `for` loops with a declaration open scopes;
//! variable declarations allocate local slots.

use super::expressions::ExpressionAnalyzer;
use super::name_analyzer::NameAnalyzer;
use super::scope::ScopeKind;
use super::symbol::DataType;
use crate::ast::{
    AssignmentStatement, ForInit, ForStatement, Statement, StatementKind, StatementList,
    SwitchStatement, VariableDeclaration,
};
use crate::error::ErrorCode;

/// Extension trait for statement analysis.
pub trait StatementAnalyzer {
    /// Analyze statements in the current scope.
    fn analyze_statements(&mut self, statements: &[Statement]);

    /// Analyze a single statement.
    fn analyze_statement(&mut self, stmt: &Statement);

    /// Analyze a statement list in its own scope.
    fn analyze_block(&mut self, block: &StatementList, kind: ScopeKind);

    /// Analyze a for loop.
    fn analyze_for(&mut self, for_stmt: &ForStatement);

    /// Analyze a switch statement.
    fn analyze_switch(&mut self, switch: &SwitchStatement);

    /// Analyze a variable declaration.
    fn analyze_var_decl(&mut self, decl: &VariableDeclaration);

    /// Analyze an assignment.
    fn analyze_assignment(&mut self, assignment: &AssignmentStatement);
}

impl<'t> StatementAnalyzer for NameAnalyzer<'t> {
    fn analyze_statements(&mut self, statements: &[Statement]) {
        for stmt in statements {
            self.analyze_statement(stmt);
        }
    }

    fn analyze_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Block(block) => self.analyze_block(block, ScopeKind::Block),
            StatementKind::If(if_stmt) => {
                self.analyze_expression(&if_stmt.condition);
                self.analyze_statement(&if_stmt.body);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.analyze_statement(else_branch);
                }
            }
            StatementKind::While(while_stmt) => {
                self.analyze_expression(&while_stmt.condition);
                self.analyze_statement(&while_stmt.body);
            }
            StatementKind::For(for_stmt) => self.analyze_for(for_stmt),
            StatementKind::Switch(switch) => self.analyze_switch(switch),
            StatementKind::Jump(jump) => {
                if let Some(value) = &jump.value {
                    self.analyze_expression(value);
                }
            }
            StatementKind::Assignment(assignment) => self.analyze_assignment(assignment),
            StatementKind::VarDecl(decl) => self.analyze_var_decl(decl),
            StatementKind::MethodCall(chain) => self.analyze_named_value(chain),
        }
    }

    fn analyze_block(&mut self, block: &StatementList, kind: ScopeKind) {
        // a block attached earlier shares its opener's scope
        if let Some(scope) = self.scopes.scope_of(block.id) {
            let saved = self.current;
            self.current = scope;
            self.analyze_statements(&block.statements);
            self.current = saved;
            return;
        }

        self.enter_scope("block", kind, block.id);
        self.analyze_statements(&block.statements);
        self.exit_scope();
    }

    fn analyze_for(&mut self, for_stmt: &ForStatement) {
        let opens_scope = matches!(for_stmt.init, Some(ForInit::Declaration(_)));
        if opens_scope {
            let scope = self.enter_scope("for", ScopeKind::Loop, for_stmt.id);
            if let StatementKind::Block(body) = &for_stmt.body.kind {
                self.scopes.attach(body.id, scope);
            }
        }

        match &for_stmt.init {
            Some(ForInit::Declaration(decl)) => self.analyze_var_decl(decl),
            Some(ForInit::Assignment(assignment)) => self.analyze_assignment(assignment),
            None => {}
        }
        if let Some(condition) = &for_stmt.condition {
            self.analyze_expression(condition);
        }
        if let Some(update) = &for_stmt.update {
            self.analyze_statement(update);
        }
        self.analyze_statement(&for_stmt.body);

        if opens_scope {
            self.exit_scope();
        }
    }

    fn analyze_switch(&mut self, switch: &SwitchStatement) {
        self.analyze_expression(&switch.selector);
        if let Some(slot) = self.allocate_slot(switch.selector.position) {
            self.scopes.reserve_slot(switch.id, slot);
        }

        for case in &switch.cases {
            self.analyze_block(&case.body, ScopeKind::Case);
        }
        if let Some(default) = &switch.default {
            self.analyze_block(default, ScopeKind::Case);
        }
    }

    fn analyze_var_decl(&mut self, decl: &VariableDeclaration) {
        if let Some(value) = &decl.value {
            self.analyze_expression(value);
        }

        let ty = match self.table.resolve(&decl.ty) {
            Ok(ty) => ty,
            Err(e) => {
                self.errors
                    .report(ErrorCode::UndefinedType, e.to_string(), decl.position);
                DataType::from(&decl.ty)
            }
        };

        self.declare_local(
            &decl.name,
            ty,
            decl.position,
            ErrorCode::VariableAlreadyDeclared,
        );
    }

    fn analyze_assignment(&mut self, assignment: &AssignmentStatement) {
        self.analyze_named_value(&assignment.target);
        self.analyze_expression(&assignment.value);
    }
}
