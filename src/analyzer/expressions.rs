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

//! Expression analysis for the name analyzer.
//!
//! Only the head of an access chain is resolved here. Later steps depend on
//! the static type of the head and are resolved during code generation.

use super::name_analyzer::NameAnalyzer;
use super::symbol::Symbol;
use crate::ast::{Access, Expr, ExprKind, NamedValue};
use crate::error::ErrorCode;

/// The built-in root of `System.out.print` and `System.out.println`.
pub const SYSTEM_ROOT: &str = "System";

/// Extension trait for expression analysis.
pub trait ExpressionAnalyzer {
    /// Analyze an expression.
    fn analyze_expression(&mut self, expr: &Expr);

    /// Analyze an access chain: its head and every argument and index.
    fn analyze_named_value(&mut self, chain: &NamedValue);

    /// Resolve the first step of an access chain.
    fn analyze_chain_head(&mut self, head: &NamedValue);

    /// Report a member access that needs `this` inside `main`.
    fn check_instance_context(&mut self, what: &str, head: &NamedValue);
}

impl<'t> ExpressionAnalyzer for NameAnalyzer<'t> {
    fn analyze_expression(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Num(_)
            | ExprKind::Char(_)
            | ExprKind::Boolean(_)
            | ExprKind::Str(_)
            | ExprKind::Null => {}
            ExprKind::BinOp { left, right, .. } => {
                self.analyze_expression(left);
                self.analyze_expression(right);
            }
            ExprKind::Named(chain) => self.analyze_named_value(chain),
            ExprKind::ObjectCreation { class_name, args } => {
                if !self.table.get(class_name).is_some_and(|t| t.is_class()) {
                    self.errors.report(
                        ErrorCode::UndefinedType,
                        format!("Undefined class '{}'", class_name),
                        expr.position,
                    );
                }
                for arg in args {
                    self.analyze_expression(arg);
                }
            }
            ExprKind::ArrayCreation { element, length } => {
                if let Err(e) = self.table.resolve(element) {
                    self.errors
                        .report(ErrorCode::UndefinedType, e.to_string(), expr.position);
                }
                self.analyze_expression(length);
            }
        }
    }

    fn analyze_named_value(&mut self, chain: &NamedValue) {
        self.analyze_chain_head(chain);

        for step in chain.steps() {
            match &step.access {
                Access::MethodCall { args, .. } => {
                    for arg in args {
                        self.analyze_expression(arg);
                    }
                }
                Access::ArrayIndex(index) => self.analyze_expression(index),
                Access::This | Access::Field(_) => {}
            }
        }
    }

    fn analyze_chain_head(&mut self, head: &NamedValue) {
        match &head.access {
            Access::This => self.check_instance_context("'this'", head),
            Access::Field(name) => {
                let symbol = self
                    .scopes
                    .lookup(self.current, name)
                    .map(|entry| (entry.is_local(), entry.symbol.clone()));

                match symbol {
                    Some((true, _)) => {}
                    Some((false, Symbol::Field(_))) => {
                        self.check_instance_context(&format!("property '{}'", name), head)
                    }
                    Some((false, Symbol::Type(_))) => self.errors.report(
                        ErrorCode::UndefinedVariable,
                        format!("'{}' is a type and cannot be used as a value", name),
                        head.position,
                    ),
                    _ if self.table.lookup_property(&self.class_name, name).is_some() => {
                        self.check_instance_context(&format!("property '{}'", name), head)
                    }
                    _ if name == SYSTEM_ROOT => {}
                    _ => self.errors.report(
                        ErrorCode::UndefinedVariable,
                        format!("Undefined variable '{}'", name),
                        head.position,
                    ),
                }
            }
            Access::MethodCall { name, .. } => {
                if self.table.methods_named(&self.class_name, name).is_empty() {
                    self.errors.report(
                        ErrorCode::UndefinedMethod,
                        format!("Undefined method '{}' in class '{}'", name, self.class_name),
                        head.position,
                    );
                } else {
                    self.check_instance_context(&format!("method '{}'", name), head);
                }
            }
            // the parser never starts a chain with an index
            Access::ArrayIndex(_) => {}
        }
    }

    fn check_instance_context(&mut self, what: &str, head: &NamedValue) {
        if self.in_static {
            self.errors.report(
                ErrorCode::ThisInStaticContext,
                format!("Cannot use {} in the static method 'main'", what),
                head.position,
            );
        }
    }
}
