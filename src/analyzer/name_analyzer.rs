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

//! The name analysis pass.
//!
//! Opens a scope per class, interface, method, statement block, case body
//! and `for` loop with a declaration, declares parameters and locals with
//! their slots, and resolves the head of every access chain. Each scope is
//! attached to the node that opened it.

use super::expressions::ExpressionAnalyzer;
use super::scope::{ScopeArena, ScopeId, ScopeKind};
use super::statements::StatementAnalyzer;
use super::symbol::{DataType, FieldSymbol, Symbol};
use super::type_table::TypeTable;
use crate::ast::{ClassDecl, InterfaceDecl, MethodDecl, NodeId, Program, TypeDecl};
use crate::error::{CompileError, ErrorCode, Errors, Position};

/// The result of name analysis.
#[derive(Debug)]
pub struct NameAnalysis {
    pub scopes: ScopeArena,
    pub errors: Vec<CompileError>,
}

impl NameAnalysis {
    /// The scope arena, or every collected error.
    pub fn into_result(self) -> Result<ScopeArena, Vec<CompileError>> {
        if self.errors.is_empty() {
            Ok(self.scopes)
        } else {
            Err(self.errors)
        }
    }
}

/// The name analyzer state.
pub struct NameAnalyzer<'t> {
    pub(crate) table: &'t TypeTable,
    pub(crate) scopes: ScopeArena,
    /// The innermost open scope.
    pub(crate) current: ScopeId,
    pub(crate) errors: Errors,
    /// Next free local slot of the current method.
    pub(crate) next_slot: u16,
    /// Class whose members are being analyzed.
    pub(crate) class_name: String,
    /// Inside the static `main` method.
    pub(crate) in_static: bool,
}

impl<'t> NameAnalyzer<'t> {
    pub fn new(table: &'t TypeTable) -> Self {
        Self {
            table,
            scopes: ScopeArena::new(),
            current: ScopeId::ROOT,
            errors: Errors::new(),
            next_slot: 0,
            class_name: String::new(),
            in_static: false,
        }
    }

    /// Run the pass over a program.
    pub fn analyze(mut self, program: &Program) -> NameAnalysis {
        for decl in &program.declarations {
            let name = decl.name().to_string();
            // duplicates were reported by type analysis
            let _ = self
                .scopes
                .insert(ScopeId::ROOT, name.clone(), Symbol::Type(name), None);
        }

        for decl in &program.declarations {
            match decl {
                TypeDecl::Class(class) => self.analyze_class(class),
                TypeDecl::Interface(interface) => self.analyze_interface(interface),
            }
        }

        NameAnalysis {
            scopes: self.scopes,
            errors: self.errors.into_vec(),
        }
    }

    // ========================================
    // Scopes and Slots
    // ========================================

    /// Open a scope below the current one and attach it to `node`.
    pub(crate) fn enter_scope(
        &mut self,
        name: impl Into<String>,
        kind: ScopeKind,
        node: NodeId,
    ) -> ScopeId {
        let scope = self.scopes.push(name, kind, self.current);
        self.scopes.attach(node, scope);
        self.current = scope;
        scope
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes.get(self.current).parent {
            self.current = parent;
        }
    }

    /// Hand out the next local slot, or report that the method ran out of them.
    pub(crate) fn allocate_slot(&mut self, position: Position) -> Option<u16> {
        let slot = self.next_slot;
        match slot.checked_add(1) {
            Some(next) => {
                self.next_slot = next;
                Some(slot)
            }
            None => {
                self.errors.report(
                    ErrorCode::TooManyLocals,
                    format!("A method can use at most {} local slots", u16::MAX),
                    position,
                );
                None
            }
        }
    }

    /// Declare a parameter or local in the current scope.
    pub(crate) fn declare_local(
        &mut self,
        name: &str,
        ty: DataType,
        position: Position,
        code: ErrorCode,
    ) {
        if self.scopes.lookup_local(self.current, name).is_some() {
            let what = match code {
                ErrorCode::ParameterAlreadyDeclared => "Parameter",
                _ => "Variable",
            };
            self.errors.report(
                code,
                format!("{} '{}' is already declared in this scope", what, name),
                position,
            );
            return;
        }

        let Some(slot) = self.allocate_slot(position) else {
            return;
        };
        let symbol = Symbol::Field(FieldSymbol::new(name, ty));
        let _ = self.scopes.insert(self.current, name, symbol, Some(slot));
    }

    // ========================================
    // Declarations
    // ========================================

    fn analyze_class(&mut self, class: &ClassDecl) {
        let scope = self.enter_scope(class.name.clone(), ScopeKind::Class, class.id);
        self.class_name = class.name.clone();
        self.in_static = false;

        if let Some(symbol) = self.table.get(&class.name) {
            for property in symbol.properties.values() {
                let field = Symbol::Field(property.field.clone());
                let _ = self
                    .scopes
                    .insert(scope, property.field.name.clone(), field, None);
            }
            for method in symbol.methods.values() {
                let _ = self.scopes.insert(
                    scope,
                    method.signature.clone(),
                    Symbol::Method(method.clone()),
                    None,
                );
            }
        }

        for property in &class.properties {
            if let Some(value) = &property.declaration.value {
                self.analyze_expression(value);
            }
        }

        for method in class
            .constructors
            .iter()
            .chain(&class.methods)
            .chain(class.main.iter())
        {
            self.analyze_method(method);
        }

        self.exit_scope();
    }

    fn analyze_interface(&mut self, interface: &InterfaceDecl) {
        self.enter_scope(interface.name.clone(), ScopeKind::Interface, interface.id);

        for signature in &interface.methods {
            self.enter_scope(signature.signature(), ScopeKind::Method, signature.id);
            self.next_slot = 1;
            for param in &signature.params {
                self.declare_local(
                    &param.name,
                    DataType::from(&param.ty),
                    param.position,
                    ErrorCode::ParameterAlreadyDeclared,
                );
            }
            self.scopes.set_locals(signature.id, self.next_slot);
            self.exit_scope();
        }

        self.exit_scope();
    }

    fn analyze_method(&mut self, method: &MethodDecl) {
        let signature = &method.signature;
        let scope = self.enter_scope(signature.signature(), ScopeKind::Method, signature.id);
        // the body shares the method scope with the parameters
        self.scopes.attach(method.body.id, scope);

        self.in_static = signature.is_static();
        // slot 0 holds `this`, or the argument array of `main`
        self.next_slot = if self.in_static { 0 } else { 1 };

        for param in &signature.params {
            self.declare_local(
                &param.name,
                DataType::from(&param.ty),
                param.position,
                ErrorCode::ParameterAlreadyDeclared,
            );
        }

        self.analyze_statements(&method.body.statements);

        self.scopes.set_locals(signature.id, self.next_slot);
        self.in_static = false;
        self.exit_scope();
    }
}

/// Run name analysis over a program whose types were analyzed without errors.
pub fn analyze_names(program: &Program, table: &TypeTable) -> NameAnalysis {
    NameAnalyzer::new(table).analyze(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::type_analyzer::analyze_types;
    use crate::ast::{StatementKind, TypeDecl};
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn analyze_source(source: &str) -> (Program, NameAnalysis) {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        let table = analyze_types(&program).into_result().unwrap();
        let analysis = analyze_names(&program, &table);
        (program, analysis)
    }

    fn error_codes(source: &str) -> Vec<ErrorCode> {
        analyze_source(source)
            .1
            .errors
            .iter()
            .map(|e| e.code)
            .collect()
    }

    fn in_method(body: &str) -> Vec<ErrorCode> {
        error_codes(&format!(
            "class A {{ int prop; void g() {{}} void f(int p) {{ {} }} }}",
            body
        ))
    }

    #[test]
    fn test_slot_exhaustion() {
        let table = TypeTable::new();
        let mut analyzer = NameAnalyzer::new(&table);
        analyzer.next_slot = u16::MAX - 1;

        let position = Position::new(3, 8);
        assert_eq!(analyzer.allocate_slot(position), Some(u16::MAX - 1));
        assert_eq!(analyzer.allocate_slot(position), None);
        assert_eq!(analyzer.next_slot, u16::MAX);

        let errors = analyzer.errors.into_vec();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::TooManyLocals);
        assert_eq!(errors[0].position, position);
    }

    #[test]
    fn test_exhausted_local_is_not_declared() {
        let table = TypeTable::new();
        let mut analyzer = NameAnalyzer::new(&table);
        analyzer.next_slot = u16::MAX;

        analyzer.declare_local(
            "x",
            DataType::int(),
            Position::new(1, 0),
            ErrorCode::VariableAlreadyDeclared,
        );
        assert!(analyzer.scopes.lookup_local(analyzer.current, "x").is_none());
        assert_eq!(analyzer.errors.len(), 1);
    }

    // ========================================
    // Scopes
    // ========================================

    #[test]
    fn test_scopes_are_attached() {
        let (program, analysis) = analyze_source(
            "class A { void f(int a) { int b; { int c; } } }",
        );
        assert!(analysis.errors.is_empty());
        let scopes = analysis.scopes;

        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        let class_scope = scopes.scope_of(class.id).unwrap();
        assert_eq!(scopes.get(class_scope).kind, ScopeKind::Class);

        let method = &class.methods[0];
        let method_scope = scopes.scope_of(method.signature.id).unwrap();
        assert_eq!(scopes.scope_of(method.body.id), Some(method_scope));
        assert_eq!(scopes.get(method_scope).parent, Some(class_scope));

        assert_eq!(scopes.lookup(method_scope, "a").unwrap().slot, Some(1));
        assert_eq!(scopes.lookup(method_scope, "b").unwrap().slot, Some(2));

        let StatementKind::Block(inner) = &method.body.statements[1].kind else {
            panic!("expected block");
        };
        let inner_scope = scopes.scope_of(inner.id).unwrap();
        assert_eq!(scopes.get(inner_scope).level, 3);
        assert_eq!(scopes.lookup(inner_scope, "c").unwrap().slot, Some(3));
        assert_eq!(scopes.locals(method.signature.id), Some(4));
    }

    #[test]
    fn test_main_slots_start_at_zero() {
        let (program, analysis) =
            analyze_source("class A { public static void main(String[] args) { int x; } }");
        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        let main = class.main.as_ref().unwrap();
        let scope = analysis.scopes.scope_of(main.signature.id).unwrap();
        assert_eq!(analysis.scopes.lookup(scope, "args").unwrap().slot, Some(0));
        assert_eq!(analysis.scopes.lookup(scope, "x").unwrap().slot, Some(1));
    }

    #[test]
    fn test_for_declaration_scope() {
        let (program, analysis) = analyze_source(
            "class A { void f() { for (int i = 0; i < 3; i += 1) { int j; } } }",
        );
        assert!(analysis.errors.is_empty());
        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        let StatementKind::For(for_stmt) = &class.methods[0].body.statements[0].kind else {
            panic!("expected for");
        };
        let StatementKind::Block(body) = &for_stmt.body.kind else {
            panic!("expected block");
        };
        let loop_scope = analysis.scopes.scope_of(for_stmt.id).unwrap();
        assert_eq!(analysis.scopes.get(loop_scope).kind, ScopeKind::Loop);
        assert_eq!(analysis.scopes.scope_of(body.id), Some(loop_scope));
    }

    #[test]
    fn test_switch_reserves_slot() {
        let (program, analysis) = analyze_source(
            "class A { void f(int x) { switch (x) { case 1: int y; break; default: int z; } } }",
        );
        assert!(analysis.errors.is_empty());
        let TypeDecl::Class(class) = &program.declarations[0] else {
            panic!("expected class");
        };
        let StatementKind::Switch(switch) = &class.methods[0].body.statements[0].kind else {
            panic!("expected switch");
        };
        assert_eq!(analysis.scopes.reserved_slot(switch.id), Some(2));
        let case_scope = analysis.scopes.scope_of(switch.cases[0].body.id).unwrap();
        assert_eq!(analysis.scopes.get(case_scope).kind, ScopeKind::Case);
    }

    // ========================================
    // Declarations
    // ========================================

    #[test]
    fn test_duplicate_variable_in_same_scope() {
        assert_eq!(
            in_method("int x; int x;"),
            vec![ErrorCode::VariableAlreadyDeclared]
        );
        assert_eq!(
            in_method("int p;"),
            vec![ErrorCode::VariableAlreadyDeclared]
        );
    }

    #[test]
    fn test_same_name_in_nested_scopes() {
        assert!(in_method("int x; { int x; { int x; } }").is_empty());
        assert!(in_method("{ int y; } { int y; }").is_empty());
    }

    #[test]
    fn test_duplicate_parameter() {
        assert_eq!(
            error_codes("class A { void f(int a, char a) {} }"),
            vec![ErrorCode::ParameterAlreadyDeclared]
        );
        assert_eq!(
            error_codes("interface I { void f(int a, int a); }"),
            vec![ErrorCode::ParameterAlreadyDeclared]
        );
    }

    #[test]
    fn test_undefined_local_type() {
        assert_eq!(in_method("Missing m;"), vec![ErrorCode::UndefinedType]);
        assert_eq!(
            in_method("int[] xs = new Missing[3];"),
            vec![ErrorCode::UndefinedType]
        );
        assert_eq!(
            in_method("A a = new Missing();"),
            vec![ErrorCode::UndefinedType]
        );
    }

    // ========================================
    // Access Chains
    // ========================================

    #[test]
    fn test_chain_heads() {
        assert!(in_method("p = prop; g(); this.g(); System.out.println(p);").is_empty());
        assert_eq!(in_method("q = 1;"), vec![ErrorCode::UndefinedVariable]);
        assert_eq!(in_method("h();"), vec![ErrorCode::UndefinedMethod]);
        assert_eq!(in_method("p = A;"), vec![ErrorCode::UndefinedVariable]);
    }

    #[test]
    fn test_variable_used_before_declaration() {
        assert_eq!(
            in_method("int x = y; int y;"),
            vec![ErrorCode::UndefinedVariable]
        );
        assert_eq!(
            in_method("int x = x;"),
            vec![ErrorCode::UndefinedVariable]
        );
    }

    #[test]
    fn test_inherited_members() {
        assert!(error_codes(
            "class Base { int size; void grow() {} }
             class Box extends Base { void f() { size = 1; grow(); } }"
        )
        .is_empty());
    }

    #[test]
    fn test_static_context() {
        let codes = error_codes(
            "class A { int x; void g() {}
                 public static void main(String[] args) { x = 1; g(); this.g(); }
             }",
        );
        assert_eq!(
            codes,
            vec![
                ErrorCode::ThisInStaticContext,
                ErrorCode::ThisInStaticContext,
                ErrorCode::ThisInStaticContext
            ]
        );
        assert!(error_codes(
            "class A { int x; public static void main(String[] args) { A a = new A(); a.x = 1; } }"
        )
        .is_empty());
    }

    #[test]
    fn test_nested_expressions_are_checked() {
        assert_eq!(
            in_method("p = g2(q[0]);"),
            vec![ErrorCode::UndefinedMethod, ErrorCode::UndefinedVariable]
        );
        assert_eq!(
            in_method("if (missing) { }"),
            vec![ErrorCode::UndefinedVariable]
        );
    }
}
