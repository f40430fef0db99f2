//! Kotlin code generator

use heck::ToShoutySnakeCase;
use phf::phf_map;

use crate::error::Result;
use crate::generators::{
    banner, enum_constants, fits_i32, lookup, uses_type, Generator, GeneratorConfig, Imports,
    TypeName, TypeTable,
};
use crate::grammar::{first_char_upper, TypeExpr};
use crate::ir::{Class, Enum};

static KOTLIN_TYPES: TypeTable = phf_map! {
    "bool" => "Boolean",
    "int" => "Int",
    "long" => "Long",
    "string" => "String",
    "double" => "Double",
    "float" => "Float",
    "char" => "Char",
    "byte" => "Byte",
    "date" => "Date",
};

#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinGenerator;

impl KotlinGenerator {
    pub fn new() -> Self {
        Self
    }

    fn declaration(&self, config: &GeneratorConfig, imports: &Imports) -> String {
        let mut code = String::new();

        if let Some(package) = config.package() {
            code.push_str(&format!("package {}\n\n", package));
        }

        code.push_str(&banner(config));

        if !imports.is_empty() {
            for import in imports.iter() {
                code.push_str(&format!("import {}\n", import));
            }
            code.push('\n');
        }

        code
    }

    // Kotlin types are all references; no marker needed for declared types.
    fn element_type(&self, name: &str) -> String {
        match lookup(&KOTLIN_TYPES, name) {
            TypeName::Primitive(primitive) => primitive.to_string(),
            TypeName::Reference(reference) => first_char_upper(reference),
        }
    }

    fn field_type(&self, declared_type: &str) -> String {
        match TypeExpr::parse(declared_type) {
            TypeExpr::List(element) => format!("List<{}>", self.element_type(&element)),
            TypeExpr::Map(key, value) => format!(
                "HashMap<{}, {}>",
                self.element_type(&key),
                self.element_type(&value)
            ),
            TypeExpr::Named(name) => self.element_type(name),
        }
    }
}

impl Generator for KotlinGenerator {
    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn type_table(&self) -> &'static TypeTable {
        &KOTLIN_TYPES
    }

    fn generate_class(&self, class: &Class, config: &GeneratorConfig) -> Result<String> {
        let mut imports = Imports::default();
        if uses_type(class, "date") {
            imports.push("java.util.Date");
        }

        let mut code = self.declaration(config, &imports);
        let name = first_char_upper(class.name());

        // A data class needs at least one constructor parameter.
        if class.members().is_empty() {
            code.push_str(&format!("class {}", name));
            return Ok(code);
        }

        let parameters: Vec<String> = class
            .members()
            .iter()
            .map(|member| {
                format!(
                    "val {}: {}",
                    member.name,
                    self.field_type(&member.declared_type)
                )
            })
            .collect();

        code.push_str(&format!("data class {}({})", name, parameters.join(", ")));

        Ok(code)
    }

    fn generate_enum(&self, e: &Enum, config: &GeneratorConfig) -> Result<String> {
        let value_type = if fits_i32(e) { "Int" } else { "Long" };

        let mut code = self.declaration(config, &Imports::default());
        code.push_str(&format!(
            "enum class {}(val value: {}) {{\n",
            first_char_upper(e.name()),
            value_type
        ));

        let constants = enum_constants(self.language(), e, |name| name.to_shouty_snake_case())?;
        let entries: Vec<String> = constants
            .iter()
            .zip(e.values())
            .map(|(constant, value)| format!("\t{}({})", constant, value.value))
            .collect();

        if !entries.is_empty() {
            code.push_str(&entries.join(",\n"));
            code.push('\n');
        }

        code.push('}');

        Ok(code)
    }
}
