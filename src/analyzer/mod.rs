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

//! Semantic analyzer module for the Yava compiler.
//!
//! Semantic analysis runs as two passes, each returning its artifact
//! together with every error it found:
//! - type analysis builds the [`TypeTable`]
//! - name analysis builds the [`ScopeArena`] and checks identifiers
//!
//! A pass only runs when the previous one finished without errors.
//!
//! # Module Structure
//!
//! - `expressions` - Access chain resolution (ExpressionAnalyzer trait)
//! - `name_analyzer` - The name analysis pass
//! - `scope` - Scope arena with node attachment and local slots
//! - `statements` - Blocks, loops and declarations (StatementAnalyzer trait)
//! - `symbol` - Type, method, property and field symbols
//! - `type_analyzer` - The type analysis pass
//! - `type_table` - Global type table with member lookup

pub mod expressions;
pub mod name_analyzer;
pub mod scope;
pub mod statements;
pub mod symbol;
pub mod type_analyzer;
pub mod type_table;

pub use name_analyzer::{analyze_names, NameAnalysis, NameAnalyzer};
pub use scope::{Entry, Scope, ScopeArena, ScopeId, ScopeKind};
pub use symbol::{
    DataType, FieldSymbol, MethodSymbol, PropertySymbol, Symbol, TypeCategory, TypeSymbol,
};
pub use type_analyzer::{analyze_types, TypeAnalysis, TypeAnalyzer};
pub use type_table::{TypeTable, TypeTableError};

use crate::ast::Program;
use crate::error::CompileError;

/// The artifacts of a successful semantic analysis.
#[derive(Debug)]
pub struct Analysis {
    pub table: TypeTable,
    pub scopes: ScopeArena,
}

/// Run both semantic passes, stopping after the first one that reports errors.
pub fn analyze(program: &Program) -> Result<Analysis, Vec<CompileError>> {
    let table = analyze_types(program).into_result()?;
    let scopes = analyze_names(program, &table).into_result()?;
    Ok(Analysis { table, scopes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn analyze_source(source: &str) -> Result<Analysis, Vec<CompileError>> {
        let tokens = tokenize(source).unwrap();
        let program = parse(&tokens).unwrap();
        analyze(&program)
    }

    #[test]
    fn test_analyze_valid_program() {
        let analysis = analyze_source(
            "class Counter {
                 int count;
                 void add(int n) { count += n; }
                 public static void main(String[] args) {
                     Counter c = new Counter();
                     c.add(2);
                     System.out.println(c.count);
                 }
             }",
        )
        .unwrap();
        assert!(analysis.table.contains("Counter"));
        assert!(analysis.scopes.len() > 1);
    }

    #[test]
    fn test_type_errors_skip_name_analysis() {
        // the undefined variable is never reported
        let errors = analyze_source("class A {} class A { void f() { x = 1; } }").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::TypeAlreadyDeclared);
    }

    #[test]
    fn test_all_name_errors_are_collected() {
        let errors = analyze_source("class A { void f() { x = 1; y = 2; int z; int z; } }")
            .unwrap_err();
        let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::UndefinedVariable,
                ErrorCode::UndefinedVariable,
                ErrorCode::VariableAlreadyDeclared
            ]
        );
    }
}
