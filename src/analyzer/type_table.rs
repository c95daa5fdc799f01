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

//! The global table of type symbols.
//!
//! The table is built by the type analyzer and read by every later pass.
//! Member lookups climb the superclass chain and stop at the first cycle.

use super::symbol::{
    signature_of, DataType, MethodSymbol, PropertySymbol, TypeCategory, TypeSymbol, BUILTIN_TYPES,
};
use crate::ast::{MethodKind, NamedType};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors reported by type table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeTableError {
    #[error("Undefined type '{0}'")]
    UndefinedType(String),
    #[error("Type '{0}' is already declared")]
    AlreadyDeclared(String),
}

/// Mapping of type name to type symbol.
#[derive(Debug, Clone)]
pub struct TypeTable {
    types: HashMap<String, TypeSymbol>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Create a table holding only the built-in types.
    pub fn new() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|name| (name.to_string(), TypeSymbol::new(*name, TypeCategory::Primitive)))
            .collect();
        Self { types }
    }

    /// Register a new type. Names are unique, built-ins included.
    pub fn declare(&mut self, symbol: TypeSymbol) -> Result<(), TypeTableError> {
        if self.types.contains_key(&symbol.name) {
            return Err(TypeTableError::AlreadyDeclared(symbol.name));
        }
        self.types.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeSymbol> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeSymbol> {
        self.types.get_mut(name)
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Result<&TypeSymbol, TypeTableError> {
        self.types
            .get(name)
            .ok_or_else(|| TypeTableError::UndefinedType(name.to_string()))
    }

    /// Resolve a type reference written in the source. `void` is not a value type.
    pub fn resolve(&self, ty: &NamedType) -> Result<DataType, TypeTableError> {
        if ty.is_void() || ty.name == "null" {
            return Err(TypeTableError::UndefinedType(ty.to_string()));
        }
        self.lookup(&ty.name)?;
        Ok(DataType::from(ty))
    }

    /// Resolve a method return type, which may be `void`.
    pub fn resolve_return(&self, ty: &NamedType) -> Result<DataType, TypeTableError> {
        if ty.is_void() {
            return Ok(DataType::void());
        }
        self.resolve(ty)
    }

    /// The type itself followed by its superclasses, nearest first.
    pub fn ancestors(&self, name: &str) -> Vec<&TypeSymbol> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.types.get(name);

        while let Some(symbol) = current {
            if !seen.insert(symbol.name.as_str()) {
                break;
            }
            chain.push(symbol);
            current = symbol.extends.as_deref().and_then(|s| self.types.get(s));
        }

        chain
    }

    /// Whether the `extends` chain starting at `name` loops back on itself.
    pub fn has_cyclic_extends(&self, name: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(name);

        while let Some(n) = current {
            if !seen.insert(n) {
                return true;
            }
            current = self.types.get(n).and_then(|t| t.extends.as_deref());
        }

        false
    }

    /// Find a property on a class or one of its superclasses.
    pub fn lookup_property(
        &self,
        class: &str,
        name: &str,
    ) -> Option<(&TypeSymbol, &PropertySymbol)> {
        self.ancestors(class)
            .into_iter()
            .find_map(|owner| owner.properties.get(name).map(|p| (owner, p)))
    }

    /// Every method named `name` visible on a type, nearest override first.
    pub fn methods_named(&self, ty: &str, name: &str) -> Vec<(&TypeSymbol, &MethodSymbol)> {
        let mut found: Vec<(&TypeSymbol, &MethodSymbol)> = Vec::new();

        for owner in self.ancestors(ty) {
            for method in owner.methods.values() {
                let overridden = found.iter().any(|(_, m)| m.signature == method.signature);
                if method.name == name && method.kind != MethodKind::Constructor && !overridden {
                    found.push((owner, method));
                }
            }
        }

        found
    }

    /// Resolve a call: exact signature first, then arity and assignability.
    pub fn resolve_method(
        &self,
        ty: &str,
        name: &str,
        args: &[DataType],
    ) -> Option<(&TypeSymbol, &MethodSymbol)> {
        let candidates = self.methods_named(ty, name);
        let exact = signature_of(name, args);

        candidates
            .iter()
            .find(|(_, m)| m.signature == exact)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|(_, m)| self.accepts_arguments(&m.params, args))
            })
            .copied()
    }

    /// Resolve a constructor of a class for the given arguments.
    pub fn resolve_constructor(&self, class: &str, args: &[DataType]) -> Option<&MethodSymbol> {
        let symbol = self.types.get(class)?;
        let constructors = || {
            symbol
                .methods
                .values()
                .filter(|m| m.kind == MethodKind::Constructor)
        };
        let exact = signature_of(class, args);

        constructors()
            .find(|m| m.signature == exact)
            .or_else(|| constructors().find(|m| self.accepts_arguments(&m.params, args)))
    }

    fn accepts_arguments(&self, params: &[DataType], args: &[DataType]) -> bool {
        params.len() == args.len()
            && params
                .iter()
                .zip(args)
                .all(|(param, arg)| self.is_assignable(arg, param))
    }

    /// Whether `sub` is `sup`, extends it, or implements it somewhere up the chain.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        self.ancestors(sub)
            .iter()
            .any(|t| t.name == sup || t.implements.as_deref() == Some(sup))
    }

    /// Whether a value of type `from` may be stored in a location of type `to`.
    pub fn is_assignable(&self, from: &DataType, to: &DataType) -> bool {
        if from == to {
            return true;
        }
        if from.is_null() {
            return to.is_reference();
        }
        if from.is_array || to.is_array {
            return false;
        }
        if from.name == "char" && to.name == "int" {
            return true;
        }
        if from.is_integer_kind() || to.is_integer_kind() {
            return false;
        }
        self.is_subtype(&from.name, &to.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::symbol::FieldSymbol;
    use crate::ast::AccessModifier;

    fn class(name: &str, extends: Option<&str>) -> TypeSymbol {
        let mut symbol = TypeSymbol::new(name, TypeCategory::Class);
        symbol.extends = extends.map(String::from);
        symbol
    }

    fn method(name: &str, params: Vec<DataType>) -> MethodSymbol {
        MethodSymbol::new(
            name,
            MethodKind::Method,
            AccessModifier::Public,
            DataType::void(),
            params,
        )
    }

    fn add_method(table: &mut TypeTable, ty: &str, m: MethodSymbol) {
        table
            .get_mut(ty)
            .unwrap()
            .methods
            .insert(m.signature.clone(), m);
    }

    #[test]
    fn test_builtins_are_seeded() {
        let table = TypeTable::new();
        for name in BUILTIN_TYPES {
            assert_eq!(table.lookup(name).unwrap().category, TypeCategory::Primitive);
        }
        assert_eq!(
            table.lookup("Point").unwrap_err(),
            TypeTableError::UndefinedType("Point".to_string())
        );
    }

    #[test]
    fn test_declare_duplicate() {
        let mut table = TypeTable::new();
        table.declare(class("A", None)).unwrap();
        assert_eq!(
            table.declare(class("A", None)).unwrap_err(),
            TypeTableError::AlreadyDeclared("A".to_string())
        );
        assert!(table.declare(class("int", None)).is_err());
    }

    #[test]
    fn test_resolve_types() {
        let table = TypeTable::new();
        assert_eq!(
            table.resolve(&NamedType::new("int", true)).unwrap(),
            DataType::new("int", true)
        );
        assert!(table.resolve(&NamedType::void()).is_err());
        assert_eq!(table.resolve_return(&NamedType::void()).unwrap(), DataType::void());
        assert!(table.resolve(&NamedType::simple("Missing")).is_err());
    }

    #[test]
    fn test_property_lookup_climbs_superclasses() {
        let mut table = TypeTable::new();
        let mut base = class("Base", None);
        base.properties.insert(
            "x".to_string(),
            PropertySymbol {
                access: AccessModifier::Public,
                field: FieldSymbol::new("x", DataType::int()),
            },
        );
        table.declare(base).unwrap();
        table.declare(class("Derived", Some("Base"))).unwrap();

        let (owner, property) = table.lookup_property("Derived", "x").unwrap();
        assert_eq!(owner.name, "Base");
        assert_eq!(property.field.ty, DataType::int());
        assert!(table.lookup_property("Derived", "y").is_none());
    }

    #[test]
    fn test_cycles_terminate() {
        let mut table = TypeTable::new();
        table.declare(class("A", Some("B"))).unwrap();
        table.declare(class("B", Some("A"))).unwrap();
        table.declare(class("C", Some("A"))).unwrap();

        assert!(table.has_cyclic_extends("A"));
        assert!(table.has_cyclic_extends("C"));
        assert_eq!(table.ancestors("A").len(), 2);
        assert!(table.lookup_property("A", "missing").is_none());
    }

    #[test]
    fn test_resolve_method_overloads() {
        let mut table = TypeTable::new();
        table.declare(class("Base", None)).unwrap();
        table.declare(class("A", Some("Base"))).unwrap();
        add_method(&mut table, "A", method("f", vec![DataType::int()]));
        add_method(&mut table, "A", method("f", vec![DataType::string()]));
        add_method(&mut table, "Base", method("g", vec![DataType::simple("Base")]));

        let (_, m) = table.resolve_method("A", "f", &[DataType::string()]).unwrap();
        assert_eq!(m.signature, "f(String)");

        // char widens to int
        let (_, m) = table.resolve_method("A", "f", &[DataType::char()]).unwrap();
        assert_eq!(m.signature, "f(int)");

        let (owner, m) = table
            .resolve_method("A", "g", &[DataType::simple("A")])
            .unwrap();
        assert_eq!(owner.name, "Base");
        assert_eq!(m.signature, "g(Base)");

        assert!(table.resolve_method("A", "f", &[]).is_none());
        assert!(table.resolve_method("A", "h", &[]).is_none());
    }

    #[test]
    fn test_assignability() {
        let mut table = TypeTable::new();
        table.declare(TypeSymbol::new("Shape", TypeCategory::Interface)).unwrap();
        let mut circle = class("Circle", None);
        circle.implements = Some("Shape".to_string());
        table.declare(circle).unwrap();
        table.declare(class("Small", Some("Circle"))).unwrap();

        assert!(table.is_assignable(&DataType::simple("Small"), &DataType::simple("Shape")));
        assert!(table.is_assignable(&DataType::null(), &DataType::simple("Circle")));
        assert!(table.is_assignable(&DataType::null(), &DataType::new("int", true)));
        assert!(!table.is_assignable(&DataType::null(), &DataType::int()));
        assert!(!table.is_assignable(&DataType::simple("Circle"), &DataType::simple("Small")));
        assert!(!table.is_assignable(&DataType::int(), &DataType::char()));
        assert!(!table.is_assignable(&DataType::new("Small", true), &DataType::new("Circle", true)));
    }
}
