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

//! Constant encoding for code generation.
//!
//! Integer constants use the smallest instruction for their value:
//! `iconst_N` for 0 to 5, `bipush` for 6 to 255 and `ldc` otherwise.

use super::emit::EmitHelpers;
use super::CodeGenerator;
use crate::analyzer::DataType;

/// The instruction pushing an integer constant.
pub fn int_constant(value: i32) -> String {
    match value {
        0..=5 => format!("iconst_{}", value),
        6..=255 => format!("bipush {}", value),
        _ => format!("ldc {}", value),
    }
}

/// Quote a string for an `ldc` operand.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    out.push('"');
    out
}

/// Extension trait for pushing constants.
pub trait ConstantEmitter {
    /// Push an `int` or `char` value.
    fn push_int(&mut self, value: i32);

    /// Push `true` or `false`.
    fn push_bool(&mut self, value: bool);

    /// Push a string constant.
    fn push_string(&mut self, value: &str);

    /// Push `null`.
    fn push_null(&mut self);

    /// Push the default value of a type: zero or `null`.
    fn push_default(&mut self, ty: &DataType);
}

impl<'a> ConstantEmitter for CodeGenerator<'a> {
    fn push_int(&mut self, value: i32) {
        self.emit(int_constant(value), 0, 1);
    }

    fn push_bool(&mut self, value: bool) {
        self.push_int(i32::from(value));
    }

    fn push_string(&mut self, value: &str) {
        self.emit(format!("ldc {}", quote_string(value)), 0, 1);
    }

    fn push_null(&mut self) {
        self.emit("aconst_null", 0, 1);
    }

    fn push_default(&mut self, ty: &DataType) {
        if ty.is_integer_kind() {
            self.push_int(0);
        } else {
            self.push_null();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_constant_boundaries() {
        assert_eq!(int_constant(0), "iconst_0");
        assert_eq!(int_constant(3), "iconst_3");
        assert_eq!(int_constant(5), "iconst_5");
        assert_eq!(int_constant(6), "bipush 6");
        assert_eq!(int_constant(120), "bipush 120");
        assert_eq!(int_constant(255), "bipush 255");
        assert_eq!(int_constant(256), "ldc 256");
        assert_eq!(int_constant(1000000), "ldc 1000000");
        assert_eq!(int_constant(-1), "ldc -1");
        assert_eq!(int_constant(i32::MIN), "ldc -2147483648");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("Hello, World"), "\"Hello, World\"");
        assert_eq!(quote_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(quote_string("line\n\ttab"), "\"line\\n\\ttab\"");
        assert_eq!(quote_string("\u{e9}"), "\"\\u00e9\"");
        assert_eq!(quote_string("\u{1F600}"), "\"\\ud83d\\ude00\"");
    }
}
