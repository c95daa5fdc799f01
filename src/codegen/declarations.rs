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

//! Class, interface and method generation.
//!
//! Every type becomes its own `.class ... .end class` section. Classes get
//! one field per property and one method per constructor and method. A
//! class without constructors gets a public no-argument one.

use super::constants::ConstantEmitter;
use super::emit::EmitHelpers;
use super::expressions::ExpressionGenerator;
use super::types::{descriptor, method_descriptor, OBJECT_CLASS};
use super::{unresolved, CodeGenerator, CLASS_VERSION};
use crate::analyzer::DataType;
use crate::ast::{ClassDecl, InterfaceDecl, MethodDecl, MethodKind, MethodSignature};
use crate::error::CompileError;

/// Header of the entry point.
const MAIN_HEADER: &str = ".method public static main : ([Ljava/lang/String;)V";

/// Extension trait for type and member generation.
pub trait DeclarationGenerator {
    /// Generate a class section.
    fn gen_class(&mut self, class: &ClassDecl) -> Result<(), CompileError>;

    /// Generate an interface section.
    fn gen_interface(&mut self, interface: &InterfaceDecl) -> Result<(), CompileError>;

    /// Generate a constructor, or the default one when `constructor` is `None`.
    fn gen_constructor(
        &mut self,
        class: &ClassDecl,
        super_class: &str,
        constructor: Option<&MethodDecl>,
    ) -> Result<(), CompileError>;

    /// Store the initial value of every property into `this`.
    fn gen_property_initializers(&mut self, class: &ClassDecl) -> Result<(), CompileError>;

    /// Generate a method or the entry point.
    fn gen_method(&mut self, method: &MethodDecl) -> Result<(), CompileError>;

    /// Generate a method body in its own scope and close the method.
    fn gen_method_body(&mut self, method: &MethodDecl, header: String)
        -> Result<(), CompileError>;
}

fn param_types(signature: &MethodSignature) -> Vec<DataType> {
    signature.params.iter().map(|p| DataType::from(&p.ty)).collect()
}

impl<'a> DeclarationGenerator for CodeGenerator<'a> {
    fn gen_class(&mut self, class: &ClassDecl) -> Result<(), CompileError> {
        let table = self.table;
        let symbol = table
            .lookup(&class.name)
            .map_err(|e| unresolved(e.to_string(), class.position))?;

        self.class_name = class.name.clone();
        self.scope = self.scopes.scope_of(class.id).unwrap_or(self.scope);

        let super_class = symbol.extends.as_deref().unwrap_or(OBJECT_CLASS);

        self.directive(format!(".version {} {}", CLASS_VERSION.0, CLASS_VERSION.1));
        self.directive(format!(".class public {}", class.name));
        self.directive(format!(".super {}", super_class));
        if let Some(interface) = &symbol.implements {
            self.directive(format!(".implements {}", interface));
        }

        for property in &class.properties {
            let decl = &property.declaration;
            let ty = DataType::from(&decl.ty);
            self.directive(format!(
                ".field {} {} {}",
                property.access,
                decl.name,
                descriptor(&ty)
            ));
        }

        for constructor in &class.constructors {
            self.gen_constructor(class, super_class, Some(constructor))?;
        }
        for method in &class.methods {
            self.gen_method(method)?;
        }
        if let Some(main) = &class.main {
            self.gen_method(main)?;
        }
        if class.constructors.is_empty() {
            self.gen_constructor(class, super_class, None)?;
        }

        self.directive(".end class");
        Ok(())
    }

    fn gen_interface(&mut self, interface: &InterfaceDecl) -> Result<(), CompileError> {
        self.directive(format!(".version {} {}", CLASS_VERSION.0, CLASS_VERSION.1));
        self.directive(format!(".class interface abstract {}", interface.name));
        self.directive(format!(".super {}", OBJECT_CLASS));

        for signature in &interface.methods {
            let return_type = DataType::from(&signature.return_type);
            self.directive(format!(
                ".method public abstract {} : {}",
                signature.name,
                method_descriptor(&param_types(signature), &return_type)
            ));
            self.directive(".end method");
        }

        self.directive(".end class");
        Ok(())
    }

    fn gen_constructor(
        &mut self,
        class: &ClassDecl,
        super_class: &str,
        constructor: Option<&MethodDecl>,
    ) -> Result<(), CompileError> {
        let header = match constructor {
            Some(c) => format!(
                ".method {} <init> : {}",
                c.signature.access,
                method_descriptor(&param_types(&c.signature), &DataType::void())
            ),
            None => ".method public <init> : ()V".to_string(),
        };

        self.emit("aload_0", 0, 1);
        self.emit(format!("invokespecial Method {} <init> ()V", super_class), 1, 0);
        self.gen_property_initializers(class)?;

        match constructor {
            Some(c) => self.gen_method_body(c, header),
            None => {
                self.finish_method(header, 1);
                Ok(())
            }
        }
    }

    fn gen_property_initializers(&mut self, class: &ClassDecl) -> Result<(), CompileError> {
        for property in &class.properties {
            let decl = &property.declaration;
            let ty = DataType::from(&decl.ty);

            self.emit("aload_0", 0, 1);
            match &decl.value {
                Some(value) => {
                    self.gen_expression(value)?;
                }
                None => self.push_default(&ty),
            }
            self.emit(
                format!(
                    "putfield Field {} {} {}",
                    class.name,
                    decl.name,
                    descriptor(&ty)
                ),
                2,
                0,
            );
        }
        Ok(())
    }

    fn gen_method(&mut self, method: &MethodDecl) -> Result<(), CompileError> {
        let signature = &method.signature;
        let header = if signature.kind == MethodKind::Main {
            MAIN_HEADER.to_string()
        } else {
            let return_type = DataType::from(&signature.return_type);
            format!(
                ".method {} {} : {}",
                signature.access,
                signature.name,
                method_descriptor(&param_types(signature), &return_type)
            )
        };

        self.gen_method_body(method, header)
    }

    fn gen_method_body(
        &mut self,
        method: &MethodDecl,
        header: String,
    ) -> Result<(), CompileError> {
        let saved = self.enter_node_scope(method.signature.id);
        let result = self.gen_block(&method.body);
        self.scope = saved;
        result?;

        let locals = self.scopes.locals(method.signature.id).unwrap_or(1);
        self.finish_method(header, locals);
        Ok(())
    }
}
