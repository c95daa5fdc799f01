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

//! Symbol definitions shared by the semantic passes.
//!
//! Types live in the [`TypeTable`](super::TypeTable); scoped identifiers
//! (locals, parameters, properties, methods) live in the scope arena.

use crate::ast::{AccessModifier, MethodKind, NamedType};
use std::collections::BTreeMap;
use std::fmt;

/// Names of the built-in types every program can refer to.
pub const BUILTIN_TYPES: [&str; 5] = ["int", "char", "boolean", "String", "null"];

/// The category of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Primitive,
    Class,
    Interface,
}

/// A resolved type reference: a type name plus an array flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    /// Element type name.
    pub name: String,
    /// Whether this is an array of `name`.
    pub is_array: bool,
}

impl DataType {
    /// Create a new type reference.
    pub fn new(name: impl Into<String>, is_array: bool) -> Self {
        Self {
            name: name.into(),
            is_array,
        }
    }

    /// A non-array type reference.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn void() -> Self {
        Self::simple("void")
    }

    pub fn int() -> Self {
        Self::simple("int")
    }

    pub fn char() -> Self {
        Self::simple("char")
    }

    pub fn boolean() -> Self {
        Self::simple("boolean")
    }

    pub fn string() -> Self {
        Self::simple("String")
    }

    pub fn null() -> Self {
        Self::simple("null")
    }

    pub fn is_void(&self) -> bool {
        self.name == "void" && !self.is_array
    }

    pub fn is_null(&self) -> bool {
        self.name == "null" && !self.is_array
    }

    /// Whether values of this type use the integer instruction family.
    pub fn is_integer_kind(&self) -> bool {
        !self.is_array && matches!(self.name.as_str(), "int" | "char" | "boolean")
    }

    /// Whether values of this type are references.
    pub fn is_reference(&self) -> bool {
        !self.is_integer_kind() && !self.is_void()
    }

    /// The element type of an array type.
    pub fn element(&self) -> DataType {
        DataType::simple(self.name.clone())
    }

    /// The array type with this element type.
    pub fn array_of(&self) -> DataType {
        DataType::new(self.name.clone(), true)
    }
}

impl From<&NamedType> for DataType {
    fn from(ty: &NamedType) -> Self {
        DataType::new(ty.name.clone(), ty.is_array)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A named storage location: local variable, parameter or property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: String,
    pub ty: DataType,
}

impl FieldSymbol {
    pub fn new(name: impl Into<String>, ty: DataType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A property of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySymbol {
    pub access: AccessModifier,
    pub field: FieldSymbol,
}

/// A method, constructor or main entry point of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    /// Method name (the class name for constructors).
    pub name: String,
    pub kind: MethodKind,
    pub access: AccessModifier,
    pub return_type: DataType,
    /// Parameter types in declaration order.
    pub params: Vec<DataType>,
    /// Overload key, e.g. `move(int, int)`.
    pub signature: String,
}

impl MethodSymbol {
    /// Create a method symbol and derive its signature key.
    pub fn new(
        name: impl Into<String>,
        kind: MethodKind,
        access: AccessModifier,
        return_type: DataType,
        params: Vec<DataType>,
    ) -> Self {
        let name = name.into();
        let signature = signature_of(&name, &params);
        Self {
            name,
            kind,
            access,
            return_type,
            params,
            signature,
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == MethodKind::Main
    }
}

/// Build the overload key `name(T1, T2)` for a parameter list.
pub fn signature_of(name: &str, params: &[DataType]) -> String {
    let params: Vec<String> = params.iter().map(|p| p.to_string()).collect();
    format!("{}({})", name, params.join(", "))
}

/// A declared or built-in type.
#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub name: String,
    pub category: TypeCategory,
    /// Superclass (classes only).
    pub extends: Option<String>,
    /// Implemented interface (classes only).
    pub implements: Option<String>,
    pub properties: BTreeMap<String, PropertySymbol>,
    /// Methods keyed by signature.
    pub methods: BTreeMap<String, MethodSymbol>,
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            extends: None,
            implements: None,
            properties: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }

    pub fn is_class(&self) -> bool {
        self.category == TypeCategory::Class
    }

    pub fn is_interface(&self) -> bool {
        self.category == TypeCategory::Interface
    }

    /// Whether a constructor is registered for this type.
    pub fn has_constructor(&self) -> bool {
        self.methods
            .values()
            .any(|m| m.kind == MethodKind::Constructor)
    }

    /// Whether a method (not a constructor) with this name is declared here.
    pub fn declares_method_named(&self, name: &str) -> bool {
        self.methods
            .values()
            .any(|m| m.name == name && m.kind == MethodKind::Method)
    }
}

/// An entry of a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A local, parameter or property.
    Field(FieldSymbol),
    /// A method of the enclosing class.
    Method(MethodSymbol),
    /// A type name.
    Type(String),
}
