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

//! The type analysis pass.
//!
//! Builds the [`TypeTable`] from the top-level declarations:
//! - type names are registered first, so declaration order does not matter
//! - supertypes are checked for existence, category and cycles
//! - properties, constructors and methods are resolved per type
//! - classes are checked against the interface they implement
//!
//! Errors are collected and the pass always runs to the end.

use super::symbol::{
    DataType, FieldSymbol, MethodSymbol, PropertySymbol, TypeCategory, TypeSymbol,
};
use super::type_table::TypeTable;
use crate::ast::{
    AccessModifier, ClassDecl, InterfaceDecl, MethodKind, MethodSignature, Program, TypeDecl,
};
use crate::error::{CompileError, ErrorCode, Errors, Position};
use std::collections::HashSet;

/// The result of type analysis.
#[derive(Debug)]
pub struct TypeAnalysis {
    pub table: TypeTable,
    pub errors: Vec<CompileError>,
}

impl TypeAnalysis {
    /// The table, or every collected error.
    pub fn into_result(self) -> Result<TypeTable, Vec<CompileError>> {
        if self.errors.is_empty() {
            Ok(self.table)
        } else {
            Err(self.errors)
        }
    }
}

/// The type analyzer state.
pub struct TypeAnalyzer {
    table: TypeTable,
    errors: Errors,
}

impl Default for TypeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeAnalyzer {
    pub fn new() -> Self {
        Self {
            table: TypeTable::new(),
            errors: Errors::new(),
        }
    }

    /// Run the pass over a program.
    pub fn analyze(mut self, program: &Program) -> TypeAnalysis {
        // Duplicates are reported once and their members are skipped.
        let registered: Vec<&TypeDecl> = program
            .declarations
            .iter()
            .filter(|decl| self.register_type(decl))
            .collect();

        for decl in &registered {
            if let TypeDecl::Class(class) = decl {
                self.resolve_supertypes(class);
            }
        }
        self.check_cycles(&registered);

        for decl in &registered {
            if let TypeDecl::Interface(interface) = decl {
                self.register_interface(interface);
            }
        }
        for decl in &registered {
            if let TypeDecl::Class(class) = decl {
                self.register_class_members(class);
                self.check_interface(class);
            }
        }

        TypeAnalysis {
            table: self.table,
            errors: self.errors.into_vec(),
        }
    }

    // ========================================
    // Types
    // ========================================

    fn register_type(&mut self, decl: &TypeDecl) -> bool {
        let category = match decl {
            TypeDecl::Class(_) => TypeCategory::Class,
            TypeDecl::Interface(_) => TypeCategory::Interface,
        };

        match self.table.declare(TypeSymbol::new(decl.name(), category)) {
            Ok(()) => true,
            Err(e) => {
                self.errors
                    .report(ErrorCode::TypeAlreadyDeclared, e.to_string(), decl.position());
                false
            }
        }
    }

    fn resolve_supertypes(&mut self, class: &ClassDecl) {
        let extends = class.extends.as_deref().and_then(|name| {
            self.supertype(name, TypeCategory::Class, class.position)
        });
        let implements = class.implements.as_deref().and_then(|name| {
            self.supertype(name, TypeCategory::Interface, class.position)
        });

        if let Some(symbol) = self.table.get_mut(&class.name) {
            symbol.extends = extends;
            symbol.implements = implements;
        }
    }

    /// Check a supertype reference, returning its name when it is usable.
    fn supertype(
        &mut self,
        name: &str,
        expected: TypeCategory,
        position: Position,
    ) -> Option<String> {
        let category = match self.table.lookup(name) {
            Ok(symbol) => symbol.category,
            Err(e) => {
                self.errors
                    .report(ErrorCode::UndefinedType, e.to_string(), position);
                return None;
            }
        };

        if category == expected {
            return Some(name.to_string());
        }

        match expected {
            TypeCategory::Interface => self.errors.report(
                ErrorCode::ImplementsNonInterface,
                format!("'{}' is not an interface and cannot be implemented", name),
                position,
            ),
            _ => self.errors.report(
                ErrorCode::ExtendsNonClass,
                format!("'{}' is not a class and cannot be extended", name),
                position,
            ),
        }
        None
    }

    fn check_cycles(&mut self, registered: &[&TypeDecl]) {
        let cyclic: Vec<&ClassDecl> = registered
            .iter()
            .filter_map(|decl| match decl {
                TypeDecl::Class(class) => Some(class),
                TypeDecl::Interface(_) => None,
            })
            .filter(|class| self.extends_itself(&class.name))
            .collect();

        for class in &cyclic {
            self.errors.report(
                ErrorCode::CyclicInheritance,
                format!("Cyclic inheritance involving class '{}'", class.name),
                class.position,
            );
        }
        for class in cyclic {
            if let Some(symbol) = self.table.get_mut(&class.name) {
                symbol.extends = None;
            }
        }
    }

    /// Whether following `extends` from `name` leads back to `name`.
    fn extends_itself(&self, name: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.table.get(name).and_then(|t| t.extends.as_deref());

        while let Some(n) = current {
            if n == name {
                return true;
            }
            if !seen.insert(n) {
                return false;
            }
            current = self.table.get(n).and_then(|t| t.extends.as_deref());
        }

        false
    }

    // ========================================
    // Members
    // ========================================

    fn register_interface(&mut self, interface: &InterfaceDecl) {
        for signature in &interface.methods {
            if let Some(method) = self.method_symbol(signature) {
                self.add_method(&interface.name, method, signature.position);
            }
        }
    }

    fn register_class_members(&mut self, class: &ClassDecl) {
        for property in &class.properties {
            let decl = &property.declaration;
            let ty = match self.table.resolve(&decl.ty) {
                Ok(ty) => ty,
                Err(e) => {
                    self.errors
                        .report(ErrorCode::UndefinedType, e.to_string(), decl.position);
                    continue;
                }
            };

            if let Some(symbol) = self.table.get_mut(&class.name) {
                if symbol.properties.contains_key(&decl.name) {
                    self.errors.report(
                        ErrorCode::PropertyAlreadyDeclared,
                        format!(
                            "Property '{}' is already declared in class '{}'",
                            decl.name, class.name
                        ),
                        decl.position,
                    );
                } else {
                    symbol.properties.insert(
                        decl.name.clone(),
                        PropertySymbol {
                            access: property.access,
                            field: FieldSymbol::new(decl.name.clone(), ty),
                        },
                    );
                }
            }
        }

        for constructor in &class.constructors {
            let signature = &constructor.signature;
            if let Some(method) = self.method_symbol(signature) {
                self.add_method(&class.name, method, signature.position);
            }
        }

        for method in class.methods.iter().chain(class.main.iter()) {
            let signature = &method.signature;
            let clashes = self
                .table
                .get(&class.name)
                .is_some_and(|symbol| symbol.properties.contains_key(&signature.name));
            if clashes {
                self.errors.report(
                    ErrorCode::MethodNameIsProperty,
                    format!(
                        "Method '{}' has the same name as a property of class '{}'",
                        signature.name, class.name
                    ),
                    signature.position,
                );
                continue;
            }

            if let Some(symbol) = self.method_symbol(signature) {
                self.add_method(&class.name, symbol, signature.position);
            }
        }

        if let Some(symbol) = self.table.get_mut(&class.name) {
            if !symbol.has_constructor() {
                let constructor = MethodSymbol::new(
                    class.name.clone(),
                    MethodKind::Constructor,
                    AccessModifier::Public,
                    DataType::void(),
                    Vec::new(),
                );
                symbol
                    .methods
                    .insert(constructor.signature.clone(), constructor);
            }
        }
    }

    /// Resolve a signature. Every unresolvable type is reported.
    fn method_symbol(&mut self, signature: &MethodSignature) -> Option<MethodSymbol> {
        let return_type = match self.table.resolve_return(&signature.return_type) {
            Ok(ty) => Some(ty),
            Err(e) => {
                self.errors
                    .report(ErrorCode::UndefinedType, e.to_string(), signature.position);
                None
            }
        };

        let mut params = Vec::with_capacity(signature.params.len());
        for param in &signature.params {
            match self.table.resolve(&param.ty) {
                Ok(ty) => params.push(ty),
                Err(e) => self
                    .errors
                    .report(ErrorCode::UndefinedType, e.to_string(), param.position),
            }
        }

        if params.len() != signature.params.len() {
            return None;
        }

        Some(MethodSymbol::new(
            signature.name.clone(),
            signature.kind,
            signature.access,
            return_type?,
            params,
        ))
    }

    fn add_method(&mut self, owner: &str, method: MethodSymbol, position: Position) {
        let Some(symbol) = self.table.get_mut(owner) else {
            return;
        };

        if symbol.methods.contains_key(&method.signature) {
            self.errors.report(
                ErrorCode::MethodAlreadyDeclared,
                format!(
                    "Method '{}' is already declared in '{}'",
                    method.signature, owner
                ),
                position,
            );
            return;
        }

        symbol.methods.insert(method.signature.clone(), method);
    }

    /// Every signature of the implemented interface must be declared on the class itself.
    fn check_interface(&mut self, class: &ClassDecl) {
        let Some(symbol) = self.table.get(&class.name) else {
            return;
        };
        let Some(interface) = symbol.implements.as_deref().and_then(|i| self.table.get(i)) else {
            return;
        };

        let missing: Vec<String> = interface
            .methods
            .keys()
            .filter(|signature| !symbol.methods.contains_key(*signature))
            .cloned()
            .collect();

        for signature in missing {
            self.errors.push(
                CompileError::new(
                    ErrorCode::MissingInterfaceMethod,
                    format!(
                        "Class '{}' must implement '{}' from interface '{}'",
                        class.name, signature, interface.name
                    ),
                    class.position,
                )
                .with_hint("Interface methods are not inherited from superclasses"),
            );
        }
    }
}

/// Run type analysis over a program.
pub fn analyze_types(program: &Program) -> TypeAnalysis {
    TypeAnalyzer::new().analyze(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn analyze_source(source: &str) -> TypeAnalysis {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        analyze_types(&program)
    }

    fn error_codes(source: &str) -> Vec<ErrorCode> {
        analyze_source(source)
            .errors
            .iter()
            .map(|e| e.code)
            .collect()
    }

    // ========================================
    // Type Registration
    // ========================================

    #[test]
    fn test_valid_program() {
        let analysis = analyze_source(
            "interface Shape { int area(); }
             class Square implements Shape {
                 int side;
                 Square(int side) { this.side = side; }
                 public int area() { return side * side; }
             }",
        );
        assert!(analysis.errors.is_empty(), "{:?}", analysis.errors);

        let table = analysis.table;
        let square = table.lookup("Square").unwrap();
        assert_eq!(square.category, TypeCategory::Class);
        assert_eq!(square.implements.as_deref(), Some("Shape"));
        assert!(square.methods.contains_key("Square(int)"));
        assert!(square.methods.contains_key("area()"));
        assert_eq!(square.properties["side"].field.ty, DataType::int());
    }

    #[test]
    fn test_declaration_order_does_not_matter() {
        assert!(error_codes("class B extends A { A other; } class A { B back; }").is_empty());
    }

    #[test]
    fn test_duplicate_types() {
        assert_eq!(
            error_codes("class A {} interface A {}"),
            vec![ErrorCode::TypeAlreadyDeclared]
        );
        assert_eq!(
            error_codes("class String {}"),
            vec![ErrorCode::TypeAlreadyDeclared]
        );
    }

    #[test]
    fn test_supertype_errors() {
        assert_eq!(
            error_codes("class A extends Missing {}"),
            vec![ErrorCode::UndefinedType]
        );
        assert_eq!(
            error_codes("interface I {} class A extends I {}"),
            vec![ErrorCode::ExtendsNonClass]
        );
        assert_eq!(
            error_codes("class B {} class A implements B {}"),
            vec![ErrorCode::ImplementsNonInterface]
        );
        assert_eq!(
            error_codes("class A extends int {}"),
            vec![ErrorCode::ExtendsNonClass]
        );
        assert_eq!(
            error_codes("class A implements char {}"),
            vec![ErrorCode::ImplementsNonInterface]
        );
    }

    #[test]
    fn test_cyclic_inheritance() {
        assert_eq!(
            error_codes("class A extends B {} class B extends A {} class C extends A {}"),
            vec![ErrorCode::CyclicInheritance, ErrorCode::CyclicInheritance]
        );
        assert_eq!(
            error_codes("class A extends A {}"),
            vec![ErrorCode::CyclicInheritance]
        );
    }

    // ========================================
    // Members
    // ========================================

    #[test]
    fn test_property_errors() {
        assert_eq!(
            error_codes("class A { int x; char x; }"),
            vec![ErrorCode::PropertyAlreadyDeclared]
        );
        assert_eq!(
            error_codes("class A { Missing x; }"),
            vec![ErrorCode::UndefinedType]
        );
    }

    #[test]
    fn test_method_errors() {
        assert_eq!(
            error_codes("class A { void f(int a) {} int f(int b) { return 0; } }"),
            vec![ErrorCode::MethodAlreadyDeclared]
        );
        assert!(error_codes("class A { void f(int a) {} void f(char a) {} }").is_empty());
        assert_eq!(
            error_codes("class A { int f; void f() {} }"),
            vec![ErrorCode::MethodNameIsProperty]
        );
        assert_eq!(
            error_codes("class A { Missing f() {} }"),
            vec![ErrorCode::UndefinedType]
        );
    }

    #[test]
    fn test_each_bad_parameter_is_reported() {
        assert_eq!(
            error_codes("class A { void f(X a, int b, Y c) {} }"),
            vec![ErrorCode::UndefinedType, ErrorCode::UndefinedType]
        );
    }

    #[test]
    fn test_constructors() {
        let analysis = analyze_source("class A { A(int x) {} A(char c) {} } class B {}");
        assert!(analysis.errors.is_empty());

        let a = analysis.table.lookup("A").unwrap();
        assert!(a.methods.contains_key("A(int)"));
        assert!(!a.methods.contains_key("A()"));

        let b = analysis.table.lookup("B").unwrap();
        assert_eq!(b.methods["B()"].kind, MethodKind::Constructor);

        assert_eq!(
            error_codes("class A { A(int x) {} A(int y) {} }"),
            vec![ErrorCode::MethodAlreadyDeclared]
        );
    }

    #[test]
    fn test_main_is_registered() {
        let analysis =
            analyze_source("class App { public static void main(String[] args) {} }");
        let app = analysis.table.lookup("App").unwrap();
        assert!(app.methods["main(String[])"].is_static());
    }

    #[test]
    fn test_missing_interface_methods() {
        let errors = analyze_source(
            "interface I { void f(); int g(int x); }
             class A implements I { void f() {} }",
        )
        .errors;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::MissingInterfaceMethod);
        assert!(errors[0].message.contains("g(int)"));
    }

    #[test]
    fn test_interface_methods_are_not_inherited() {
        assert_eq!(
            error_codes(
                "interface I { void f(); }
                 class Base { void f() {} }
                 class A extends Base implements I {}"
            ),
            vec![ErrorCode::MissingInterfaceMethod]
        );
    }

    #[test]
    fn test_into_result() {
        assert!(analyze_source("class A {}").into_result().is_ok());
        assert_eq!(
            analyze_source("class A {} class A {}")
                .into_result()
                .unwrap_err()
                .len(),
            1
        );
    }
}
