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

//! Abstract Syntax Tree (AST) definitions for the Yava compiler.
//!
//! This module defines the data structures that represent a parsed Yava program.
//! Every node can describe itself through [`Node`], which drives the
//! structural pretty printer `(#tag content successor)` used by the tests.

mod decl;
mod expr;
mod stmt;
mod types;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;

use std::fmt;

/// Identifier of a scope-opening node, assigned by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Uniform description of an AST node.
pub trait Node {
    /// The node tag and its short descriptive payload.
    fn node_content(&self) -> (&'static str, String);

    /// The single successor node, if any.
    fn child_node(&self) -> Option<&dyn Node> {
        None
    }
}

/// Render a node and its successors as `(#tag content successor)`.
pub fn pretty_print(node: &dyn Node) -> String {
    let (tag, content) = node.node_content();
    let mut out = format!("(#{}", tag);
    if !content.is_empty() {
        out.push(' ');
        out.push_str(&content);
    }
    if let Some(child) = node.child_node() {
        out.push(' ');
        out.push_str(&pretty_print(child));
    }
    out.push(')');
    out
}

/// Render a list of nodes as `[a, b, c]`.
pub(crate) fn pretty_list<T: Node>(nodes: &[T]) -> String {
    let items: Vec<String> = nodes.iter().map(|n| pretty_print(n)).collect();
    format!("[{}]", items.join(", "))
}
