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

//! Scope management for the semantic analyzer.
//!
//! Scopes live in an arena and refer to their parent by index. The name
//! analyzer attaches every scope it opens to the node that opened it, so
//! the code generator can find the same scope again without replaying the
//! traversal order.

use super::symbol::{FieldSymbol, Symbol};
use crate::ast::NodeId;
use std::collections::HashMap;
use std::fmt;

/// Index of a scope in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

impl ScopeId {
    /// The program-level scope holding type names.
    pub const ROOT: ScopeId = ScopeId(0);
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope {}", self.0)
    }
}

/// What opened a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Program,
    Class,
    Interface,
    Method,
    Block,
    Loop,
    Case,
}

/// A scope entry: the symbol and, for locals, its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub symbol: Symbol,
    /// Local variable slot. `None` for properties, methods and types.
    pub slot: Option<u16>,
}

impl Entry {
    /// The field symbol of a local or property entry.
    pub fn field(&self) -> Option<&FieldSymbol> {
        match &self.symbol {
            Symbol::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.slot.is_some()
    }
}

/// A single scope.
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    /// Nesting depth, 0 for the program scope.
    pub level: usize,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    symbols: HashMap<String, Entry>,
}

impl Scope {
    /// Look up a symbol in this scope only.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Arena of every scope opened during name analysis.
#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
    /// Scope opened by each node.
    by_node: HashMap<NodeId, ScopeId>,
    /// Hidden slot reserved by each switch statement.
    reserved: HashMap<NodeId, u16>,
    /// Number of local slots used by each method, keyed by signature node.
    locals: HashMap<NodeId, u16>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    /// Create an arena holding only the program scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                name: "<program>".to_string(),
                level: 0,
                kind: ScopeKind::Program,
                parent: None,
                symbols: HashMap::new(),
            }],
            by_node: HashMap::new(),
            reserved: HashMap::new(),
            locals: HashMap::new(),
        }
    }

    /// Open a new scope below `parent`.
    pub fn push(&mut self, name: impl Into<String>, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let level = self.scopes[parent.0].level + 1;
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            name: name.into(),
            level,
            kind,
            parent: Some(parent),
            symbols: HashMap::new(),
        });
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// Define a symbol in a scope. Fails with the existing entry on a clash.
    pub fn insert(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        symbol: Symbol,
        slot: Option<u16>,
    ) -> Result<(), Entry> {
        let symbols = &mut self.scopes[scope.0].symbols;
        let name = name.into();
        if let Some(existing) = symbols.get(&name) {
            return Err(existing.clone());
        }
        symbols.insert(name, Entry { symbol, slot });
        Ok(())
    }

    /// Look up a name in a scope only.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&Entry> {
        self.scopes[scope.0].symbols.get(name)
    }

    /// Look up a name, climbing the parent chain. The nearest match wins.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Entry> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(entry) = scope.symbols.get(name) {
                return Some(entry);
            }
            current = scope.parent;
        }
        None
    }

    /// Record the scope opened by a node.
    pub fn attach(&mut self, node: NodeId, scope: ScopeId) {
        self.by_node.insert(node, scope);
    }

    /// The scope opened by a node, if any.
    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.by_node.get(&node).copied()
    }

    pub fn reserve_slot(&mut self, node: NodeId, slot: u16) {
        self.reserved.insert(node, slot);
    }

    /// The hidden slot reserved by a switch statement.
    pub fn reserved_slot(&self, node: NodeId) -> Option<u16> {
        self.reserved.get(&node).copied()
    }

    pub fn set_locals(&mut self, method: NodeId, count: u16) {
        self.locals.insert(method, count);
    }

    /// Number of local slots a method needs.
    pub fn locals(&self, method: NodeId) -> Option<u16> {
        self.locals.get(&method).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::symbol::DataType;

    fn local(name: &str) -> Symbol {
        Symbol::Field(FieldSymbol::new(name, DataType::int()))
    }

    #[test]
    fn test_root_scope() {
        let arena = ScopeArena::new();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(ScopeId::ROOT).kind, ScopeKind::Program);
        assert_eq!(arena.get(ScopeId::ROOT).level, 0);
    }

    #[test]
    fn test_lookup_climbs_parents() {
        let mut arena = ScopeArena::new();
        let class = arena.push("A", ScopeKind::Class, ScopeId::ROOT);
        let method = arena.push("f()", ScopeKind::Method, class);
        let block = arena.push("block", ScopeKind::Block, method);

        arena.insert(class, "x", local("x"), None).unwrap();
        arena.insert(method, "y", local("y"), Some(1)).unwrap();

        assert_eq!(arena.get(block).level, 3);
        assert_eq!(arena.lookup(block, "y").unwrap().slot, Some(1));
        assert!(!arena.lookup(block, "x").unwrap().is_local());
        assert!(arena.lookup_local(block, "y").is_none());
        assert!(arena.lookup(class, "y").is_none());
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut arena = ScopeArena::new();
        let outer = arena.push("outer", ScopeKind::Block, ScopeId::ROOT);
        let inner = arena.push("inner", ScopeKind::Block, outer);
        arena.insert(outer, "v", local("v"), Some(1)).unwrap();
        arena.insert(inner, "v", local("v"), Some(2)).unwrap();

        assert_eq!(arena.lookup(inner, "v").unwrap().slot, Some(2));
        assert_eq!(arena.lookup(outer, "v").unwrap().slot, Some(1));
    }

    #[test]
    fn test_duplicate_insert() {
        let mut arena = ScopeArena::new();
        arena.insert(ScopeId::ROOT, "v", local("v"), Some(1)).unwrap();
        let existing = arena.insert(ScopeId::ROOT, "v", local("v"), Some(2)).unwrap_err();
        assert_eq!(existing.slot, Some(1));
    }

    #[test]
    fn test_node_attachment() {
        let mut arena = ScopeArena::new();
        let scope = arena.push("block", ScopeKind::Block, ScopeId::ROOT);
        arena.attach(NodeId(7), scope);
        arena.reserve_slot(NodeId(8), 3);
        arena.set_locals(NodeId(9), 4);

        assert_eq!(arena.scope_of(NodeId(7)), Some(scope));
        assert_eq!(arena.scope_of(NodeId(1)), None);
        assert_eq!(arena.reserved_slot(NodeId(8)), Some(3));
        assert_eq!(arena.locals(NodeId(9)), Some(4));
    }
}
