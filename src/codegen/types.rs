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

//! JVM descriptors for Yava types.
//!
//! `void` is `V`, `int` is `I`, `boolean` is `Z`, `char` is `C`, `String`
//! is `Ljava/lang/String;` and any other class `X` is `LX;`. Arrays prepend `[`.

use crate::analyzer::DataType;

/// Internal name of `java.lang.Object`.
pub const OBJECT_CLASS: &str = "java/lang/Object";

/// Internal name of `java.lang.String`.
pub const STRING_CLASS: &str = "java/lang/String";

/// The internal class name used by instructions such as `new` and `anewarray`.
pub fn class_name(name: &str) -> &str {
    match name {
        "String" => STRING_CLASS,
        other => other,
    }
}

/// The field descriptor of a type.
pub fn descriptor(ty: &DataType) -> String {
    let element = match ty.name.as_str() {
        "void" => "V".to_string(),
        "int" => "I".to_string(),
        "boolean" => "Z".to_string(),
        "char" => "C".to_string(),
        "String" => format!("L{};", STRING_CLASS),
        other => format!("L{};", other),
    };

    if ty.is_array {
        format!("[{}", element)
    } else {
        element
    }
}

/// The method descriptor `(params)return`.
pub fn method_descriptor(params: &[DataType], return_type: &DataType) -> String {
    let params: String = params.iter().map(descriptor).collect();
    format!("({}){}", params, descriptor(return_type))
}

/// The argument descriptor of `PrintStream.print`/`println` for a value type.
pub fn print_descriptor(ty: &DataType) -> String {
    if ty.is_integer_kind() {
        descriptor(ty)
    } else if ty.name == "String" && !ty.is_array {
        format!("L{};", STRING_CLASS)
    } else {
        format!("L{};", OBJECT_CLASS)
    }
}

/// The element type operand of `newarray` for a primitive element.
pub fn newarray_type(element: &DataType) -> Option<&'static str> {
    match element.name.as_str() {
        "int" => Some("int"),
        "char" => Some("char"),
        "boolean" => Some("boolean"),
        _ => None,
    }
}

/// The prefix of array load/store instructions for an element type.
pub fn array_prefix(element: &DataType) -> &'static str {
    match (element.name.as_str(), element.is_array) {
        ("int", false) => "i",
        ("char", false) => "c",
        ("boolean", false) => "b",
        _ => "a",
    }
}
