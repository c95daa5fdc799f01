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

//! Type references and access modifiers used in declarations.

use std::fmt;

/// A type as written in the source: a name and an optional `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedType {
    /// Element type name (`int`, `String`, a class or interface name, `void`).
    pub name: String,
    /// Whether the type is a one-dimensional array.
    pub is_array: bool,
}

impl NamedType {
    /// Create a new type reference.
    pub fn new(name: impl Into<String>, is_array: bool) -> Self {
        Self {
            name: name.into(),
            is_array,
        }
    }

    /// Create a non-array type reference.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// The `void` return type.
    pub fn void() -> Self {
        Self::simple("void")
    }

    /// Check if this is `void`.
    pub fn is_void(&self) -> bool {
        self.name == "void" && !self.is_array
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}[]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Member access modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessModifier {
    /// `public` (also used when no modifier is written).
    #[default]
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl AccessModifier {
    /// Parse a modifier keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(AccessModifier::Public),
            "protected" => Some(AccessModifier::Protected),
            "private" => Some(AccessModifier::Private),
            _ => None,
        }
    }

    /// The keyword for this modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessModifier::Public => "public",
            AccessModifier::Protected => "protected",
            AccessModifier::Private => "private",
        }
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        assert_eq!(NamedType::simple("int").to_string(), "int");
        assert_eq!(NamedType::new("String", true).to_string(), "String[]");
    }

    #[test]
    fn test_void() {
        assert!(NamedType::void().is_void());
        assert!(!NamedType::new("void", true).is_void());
    }

    #[test]
    fn test_access_modifier() {
        assert_eq!(
            AccessModifier::from_keyword("private"),
            Some(AccessModifier::Private)
        );
        assert_eq!(AccessModifier::from_keyword("static"), None);
        assert_eq!(AccessModifier::default().to_string(), "public");
    }
}
