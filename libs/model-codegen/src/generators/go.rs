//! Go code generator
//!
//! Classes become exported structs with `json` tags. Non-primitive types are
//! held through pointers, including list elements and map keys/values.

use phf::phf_map;

use crate::error::Result;
use crate::generators::{
    banner, fits_i32, lookup, uses_type, Generator, GeneratorConfig, Imports, TypeName, TypeTable,
};
use crate::grammar::{first_char_upper, TypeExpr};
use crate::ir::{Class, Enum};

static GO_TYPES: TypeTable = phf_map! {
    "bool" => "bool",
    "int" => "int",
    "long" => "int64",
    "string" => "string",
    "double" => "float64",
    "float" => "float32",
    "char" => "byte",
    "byte" => "byte",
    "date" => "time.Time",
};

#[derive(Debug, Default, Clone, Copy)]
pub struct GoGenerator;

impl GoGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Package clause, banner and imports
    fn declaration(&self, config: &GeneratorConfig, imports: &Imports) -> String {
        let mut code = String::new();

        if let Some(package) = config.package() {
            code.push_str(&format!("package {}\n\n", package));
        }

        code.push_str(&banner(config));

        let imports: Vec<&str> = imports.iter().collect();
        match imports.as_slice() {
            [] => {}
            [single] => code.push_str(&format!("import \"{}\"\n\n", single)),
            many => {
                code.push_str("import (\n");
                for import in many {
                    code.push_str(&format!("\t\"{}\"\n", import));
                }
                code.push_str(")\n\n");
            }
        }

        code
    }

    fn element_type(&self, name: &str) -> String {
        match lookup(&GO_TYPES, name) {
            TypeName::Primitive(primitive) => primitive.to_string(),
            TypeName::Reference(reference) => format!("*{}", first_char_upper(reference)),
        }
    }

    fn field_type(&self, declared_type: &str) -> String {
        match TypeExpr::parse(declared_type) {
            TypeExpr::List(element) => format!("[]{}", self.element_type(&element)),
            TypeExpr::Map(key, value) => format!(
                "map[{}]{}",
                self.element_type(&key),
                self.element_type(&value)
            ),
            TypeExpr::Named(name) => self.element_type(name),
        }
    }
}

impl Generator for GoGenerator {
    fn language(&self) -> &'static str {
        "go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn type_table(&self) -> &'static TypeTable {
        &GO_TYPES
    }

    fn generate_class(&self, class: &Class, config: &GeneratorConfig) -> Result<String> {
        let mut imports = Imports::default();
        if uses_type(class, "date") {
            imports.push("time");
        }

        let mut code = self.declaration(config, &imports);
        code.push_str(&format!("type {} struct {{\n", first_char_upper(class.name())));

        for member in class.members() {
            code.push_str(&format!(
                "\t{} {} `json:\"{}\"`\n",
                first_char_upper(&member.name),
                self.field_type(&member.declared_type),
                member.name
            ));
        }

        code.push('}');

        Ok(code)
    }

    fn generate_enum(&self, e: &Enum, config: &GeneratorConfig) -> Result<String> {
        let type_name = first_char_upper(e.name());
        let underlying = if fits_i32(e) { "int" } else { "int64" };

        let mut code = self.declaration(config, &Imports::default());
        code.push_str(&format!("type {} {}\n\nconst (\n", type_name, underlying));

        for value in e.values() {
            code.push_str(&format!(
                "\t{}{} = {}({})\n",
                type_name,
                first_char_upper(&value.name),
                type_name,
                value.value
            ));
        }

        code.push(')');

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_config;

    fn class(members: &[(&str, &str)]) -> Class {
        let mut class = Class::new("test");
        for (name, declared_type) in members {
            class.add_member(name, declared_type).unwrap();
        }
        class
    }

    fn class_body(class: &Class) -> String {
        let config = test_config(Some("bla"));
        let code = GoGenerator::new().generate_class(class, &config).unwrap();
        let declaration = GoGenerator::new().declaration(&config, &Imports::default());

        code.strip_prefix(&declaration).unwrap().to_string()
    }

    #[test]
    fn test_primitive_class() {
        let body = class_body(&class(&[("a", "string"), ("b", "double")]));

        assert_eq!(
            body,
            "type Test struct {\n\tA string `json:\"a\"`\n\tB float64 `json:\"b\"`\n}"
        );
    }

    #[test]
    fn test_list_members() {
        assert_eq!(
            class_body(&class(&[("a", "string"), ("b", "list<int>")])),
            "type Test struct {\n\tA string `json:\"a\"`\n\tB []int `json:\"b\"`\n}"
        );
        assert_eq!(
            class_body(&class(&[("a", "string"), ("b", "list<Bla>")])),
            "type Test struct {\n\tA string `json:\"a\"`\n\tB []*Bla `json:\"b\"`\n}"
        );
    }

    #[test]
    fn test_map_members() {
        assert_eq!(
            class_body(&class(&[("a", "string"), ("b", "map<int,string>")])),
            "type Test struct {\n\tA string `json:\"a\"`\n\tB map[int]string `json:\"b\"`\n}"
        );
        assert_eq!(
            class_body(&class(&[("a", "string"), ("b", "map<int,Bla>")])),
            "type Test struct {\n\tA string `json:\"a\"`\n\tB map[int]*Bla `json:\"b\"`\n}"
        );
    }

    #[test]
    fn test_reference_member() {
        assert_eq!(
            class_body(&class(&[("a", "string"), ("b", "Bla")])),
            "type Test struct {\n\tA string `json:\"a\"`\n\tB *Bla `json:\"b\"`\n}"
        );
    }

    #[test]
    fn test_declaration_package() {
        let generator = GoGenerator::new();
        let imports = Imports::default();

        let with = generator.declaration(&test_config(Some("bla")), &imports);
        assert!(with.starts_with("package bla\n\n"));

        let without = generator.declaration(&test_config(None), &imports);
        assert!(!without.contains("package"));
    }

    #[test]
    fn test_date_member_imports_time() {
        let code = GoGenerator::new()
            .generate_class(&class(&[("created", "date")]), &test_config(None))
            .unwrap();

        assert!(code.contains("import \"time\"\n"));
        assert!(code.ends_with("\tCreated time.Time `json:\"created\"`\n}"));
    }

    #[test]
    fn test_enum() {
        let mut e = Enum::new("test");
        e.add_value("First", "5").unwrap();
        e.add_value("second", "8").unwrap();

        let code = GoGenerator::new()
            .generate_enum(&e, &test_config(Some("bla")))
            .unwrap();

        assert!(code.starts_with("package bla"));
        assert!(code.ends_with(
            "type Test int\n\nconst (\n\tTestFirst = Test(5)\n\tTestSecond = Test(8)\n)"
        ));
    }

    #[test]
    fn test_empty_enum() {
        let code = GoGenerator::new()
            .generate_enum(&Enum::new("test"), &test_config(None))
            .unwrap();

        assert!(code.ends_with("type Test int\n\nconst (\n)"));
    }

    #[test]
    fn test_wide_enum_values() {
        let mut e = Enum::new("test");
        e.add_value("small", "-1").unwrap();
        e.add_value("big", "5000000000").unwrap();

        let code = GoGenerator::new()
            .generate_enum(&e, &test_config(None))
            .unwrap();

        assert!(code.ends_with(
            "type Test int64\n\nconst (\n\tTestSmall = Test(-1)\n\tTestBig = Test(5000000000)\n)"
        ));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(GoGenerator::new().file_name("someClass"), "someClass.go");
    }
}
