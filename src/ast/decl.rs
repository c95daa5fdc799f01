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

//! Declaration AST nodes: classes, interfaces, properties and methods.

use super::{pretty_list, pretty_print, AccessModifier, NamedType, Node, NodeId, StatementList};
use super::VariableDeclaration;
use crate::error::Position;

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter type.
    pub ty: NamedType,
    /// The parameter name.
    pub name: String,
    /// Position of the type.
    pub position: Position,
}

/// What a method declaration declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// A regular instance method.
    Method,
    /// A constructor, its name is the class name.
    Constructor,
    /// `public static void main(String[] args)`
    Main,
}

/// The header of a method: access, return type, name and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    /// Scope attachment id.
    pub id: NodeId,
    /// What this signature belongs to.
    pub kind: MethodKind,
    /// Access modifier.
    pub access: AccessModifier,
    /// Return type, `void` for constructors and `main`.
    pub return_type: NamedType,
    /// Method name.
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<Parameter>,
    /// Position of the declaration.
    pub position: Position,
}

impl MethodSignature {
    /// The signature key, e.g. `add(int, String[])`.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, types.join(", "))
    }

    /// Check if the method runs without a receiver.
    pub fn is_static(&self) -> bool {
        self.kind == MethodKind::Main
    }
}

/// A method with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// The method header.
    pub signature: MethodSignature,
    /// The method body. Shares the scope of the signature.
    pub body: StatementList,
}

/// A property (field) declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    /// Access modifier.
    pub access: AccessModifier,
    /// Type, name and optional initializer.
    pub declaration: VariableDeclaration,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Scope attachment id.
    pub id: NodeId,
    /// The class name.
    pub name: String,
    /// Superclass name.
    pub extends: Option<String>,
    /// Implemented interface name.
    pub implements: Option<String>,
    /// Properties in declaration order.
    pub properties: Vec<PropertyDecl>,
    /// Declared constructors.
    pub constructors: Vec<MethodDecl>,
    /// Declared methods.
    pub methods: Vec<MethodDecl>,
    /// The static main method.
    pub main: Option<MethodDecl>,
    /// Position of the name.
    pub position: Position,
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    /// Scope attachment id.
    pub id: NodeId,
    /// The interface name.
    pub name: String,
    /// Declared method signatures.
    pub methods: Vec<MethodSignature>,
    /// Position of the name.
    pub position: Position,
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    /// A class.
    Class(ClassDecl),
    /// An interface.
    Interface(InterfaceDecl),
}

impl TypeDecl {
    /// The declared type name.
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(class) => &class.name,
            TypeDecl::Interface(interface) => &interface.name,
        }
    }

    /// Position of the declared name.
    pub fn position(&self) -> Position {
        match self {
            TypeDecl::Class(class) => class.position,
            TypeDecl::Interface(interface) => interface.position,
        }
    }
}

/// A complete Yava compilation unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level declarations in source order.
    pub declarations: Vec<TypeDecl>,
}

impl Program {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over the declared classes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            TypeDecl::Class(class) => Some(class),
            TypeDecl::Interface(_) => None,
        })
    }
}

impl Node for Parameter {
    fn node_content(&self) -> (&'static str, String) {
        ("param", format!("{} :type {}", self.name, self.ty))
    }
}

impl Node for MethodSignature {
    fn node_content(&self) -> (&'static str, String) {
        let types: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
        let params = format!("[{}]", types.join(", "));
        match self.kind {
            MethodKind::Method => (
                "method-signature",
                format!(
                    "{} {} :type {} :param {}",
                    self.access, self.name, self.return_type, params
                ),
            ),
            MethodKind::Constructor => (
                "constructor",
                format!("{} {} :param {}", self.access, self.name, params),
            ),
            MethodKind::Main => (
                "main-decl",
                self.params
                    .first()
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
            ),
        }
    }
}

impl Node for MethodDecl {
    fn node_content(&self) -> (&'static str, String) {
        match self.signature.kind {
            MethodKind::Method => ("method-decl", pretty_print(&self.signature)),
            _ => self.signature.node_content(),
        }
    }

    fn child_node(&self) -> Option<&dyn Node> {
        Some(&self.body)
    }
}

impl Node for PropertyDecl {
    fn node_content(&self) -> (&'static str, String) {
        (
            "property-decl",
            format!(
                "{} {} :type {}",
                self.access, self.declaration.name, self.declaration.ty
            ),
        )
    }

    fn child_node(&self) -> Option<&dyn Node> {
        self.declaration.child_node()
    }
}

impl Node for ClassDecl {
    fn node_content(&self) -> (&'static str, String) {
        let mut content = self.name.clone();
        if let Some(extends) = &self.extends {
            content.push_str(&format!(" :extend {}", extends));
        }
        if let Some(implements) = &self.implements {
            content.push_str(&format!(" :implement {}", implements));
        }
        content.push_str(&format!(
            "\n\t:props {} \n\t:methods {} \n\t:constructor {}",
            pretty_list(&self.properties),
            pretty_list(&self.methods),
            pretty_list(&self.constructors)
        ));
        if let Some(main) = &self.main {
            content.push_str(&format!("\n\t:main {}", pretty_print(main)));
        }
        ("class", content)
    }
}

impl Node for InterfaceDecl {
    fn node_content(&self) -> (&'static str, String) {
        (
            "interface",
            format!("{} \n\t:methods {}", self.name, pretty_list(&self.methods)),
        )
    }
}

impl Node for TypeDecl {
    fn node_content(&self) -> (&'static str, String) {
        match self {
            TypeDecl::Class(class) => class.node_content(),
            TypeDecl::Interface(interface) => interface.node_content(),
        }
    }
}

impl Node for Program {
    fn node_content(&self) -> (&'static str, String) {
        let items: Vec<String> = self
            .declarations
            .iter()
            .map(|d| pretty_print(d))
            .collect();
        (
            "program",
            format!(":declarations [\n\t{}\n]", items.join(",\n\t")),
        )
    }
}
