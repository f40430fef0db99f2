//! TypeScript code generator
//!
//! Every referenced non-primitive type other than the class itself is
//! imported from a sibling module named after it. TypeScript has no package statement, so the configured
//! package name is ignored.

use phf::phf_map;

use crate::error::Result;
use crate::generators::{banner, lookup, Generator, GeneratorConfig, Imports, TypeName, TypeTable};
use crate::grammar::{first_char_upper, TypeExpr};
use crate::ir::{Class, Enum};

static TYPESCRIPT_TYPES: TypeTable = phf_map! {
    "bool" => "boolean",
    "int" => "number",
    "long" => "number",
    "string" => "string",
    "double" => "number",
    "float" => "number",
    "char" => "string",
    "byte" => "number",
    "date" => "Date",
};

#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptGenerator;

impl TypeScriptGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Banner followed by one import per referenced module
    fn declaration(&self, config: &GeneratorConfig, imports: &Imports) -> String {
        let mut code = banner(config);

        if !imports.is_empty() {
            for module in imports.iter() {
                code.push_str(&format!(
                    "import {{ {} }} from \"./{}\";\n",
                    first_char_upper(module),
                    module
                ));
            }
            code.push('\n');
        }

        code
    }

    /// `owner` is the type being generated; it is in scope already.
    fn element_type(&self, name: &str, owner: &str, imports: &mut Imports) -> String {
        match lookup(&TYPESCRIPT_TYPES, name) {
            TypeName::Primitive(primitive) => primitive.to_string(),
            TypeName::Reference(reference) => {
                let type_name = first_char_upper(reference);
                if type_name != owner {
                    imports.push(reference);
                }
                type_name
            }
        }
    }

    fn field_type(&self, declared_type: &str, owner: &str, imports: &mut Imports) -> String {
        match TypeExpr::parse(declared_type) {
            TypeExpr::List(element) => {
                format!("{}[]", self.element_type(&element, owner, imports))
            }
            TypeExpr::Map(key, value) => {
                let key = self.element_type(&key, owner, imports);
                let value = self.element_type(&value, owner, imports);
                format!("Map<{}, {}>", key, value)
            }
            TypeExpr::Named(name) => self.element_type(name, owner, imports),
        }
    }
}

impl Generator for TypeScriptGenerator {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn type_table(&self) -> &'static TypeTable {
        &TYPESCRIPT_TYPES
    }

    fn generate_class(&self, class: &Class, config: &GeneratorConfig) -> Result<String> {
        let mut imports = Imports::default();
        let name = first_char_upper(class.name());
        let mut body = format!("export class {} {{\n", name);

        for member in class.members() {
            let field_type = self.field_type(&member.declared_type, &name, &mut imports);
            body.push_str(&format!("\t{}: {};\n", member.name, field_type));
        }

        body.push('}');

        let mut code = self.declaration(config, &imports);
        code.push_str(&body);

        Ok(code)
    }

    fn generate_enum(&self, e: &Enum, config: &GeneratorConfig) -> Result<String> {
        let mut code = self.declaration(config, &Imports::default());
        code.push_str(&format!("export enum {} {{\n", first_char_upper(e.name())));

        let entries: Vec<String> = e
            .values()
            .iter()
            .map(|value| format!("\t{} = {}", first_char_upper(&value.name), value.value))
            .collect();

        if !entries.is_empty() {
            code.push_str(&entries.join(",\n"));
            code.push('\n');
        }

        code.push('}');

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

    fn generate(class: &Class) -> String {
        TypeScriptGenerator::new()
            .generate_class(class, &test_config(Some("bla")))
            .unwrap()
    }

    #[test]
    fn test_class_members() {
        let cases = [
            ("double", "number"),
            ("list<int>", "number[]"),
            ("list<Bla>", "Bla[]"),
            ("map<int,string>", "Map<number, string>"),
            ("map<int,Bla>", "Map<number, Bla>"),
            ("Bla", "Bla"),
        ];

        for (declared_type, rendered) in cases {
            let code = generate(&class(&[("a", "string"), ("b", declared_type)]));
            let expected = format!("export class Test {{\n\ta: string;\n\tb: {};\n}}", rendered);

            assert!(code.ends_with(&expected), "member type {}: {}", declared_type, code);
        }
    }

    #[test]
    fn test_reference_imports() {
        let code = generate(&class(&[
            ("a", "bla"),
            ("b", "list<other>"),
            ("c", "map<string,bla>"),
        ]));

        assert!(code.contains(
            "import { Bla } from \"./bla\";\nimport { Other } from \"./other\";\n\nexport class"
        ));
        assert_eq!(code.matches("import").count(), 2);
    }

    #[test]
    fn test_self_reference_is_not_imported() {
        let mut node = Class::new("node");
        node.add_member("next", "node").unwrap();
        node.add_member("children", "list<node>").unwrap();
        node.add_member("owner", "user").unwrap();

        let code = TypeScriptGenerator::new()
            .generate_class(&node, &test_config(None))
            .unwrap();

        assert!(!code.contains("from \"./node\""));
        assert!(code.contains("import { User } from \"./user\";\n\nexport class Node {\n"));
        assert!(code.ends_with("\tnext: Node;\n\tchildren: Node[];\n\towner: User;\n}"));
    }

    #[test]
    fn test_primitive_class_has_no_imports() {
        let code = generate(&class(&[("a", "string"), ("b", "list<date>")]));

        assert!(!code.contains("import"));
        assert!(!code.contains("bla"));
    }

    #[test]
    fn test_enum() {
        let mut e = Enum::new("test");
        e.add_value("First", "5").unwrap();
        e.add_value("second", "8").unwrap();

        let code = TypeScriptGenerator::new()
            .generate_enum(&e, &test_config(None))
            .unwrap();

        assert!(code.ends_with("export enum Test {\n\tFirst = 5,\n\tSecond = 8\n}"));
    }

    #[test]
    fn test_empty_enum() {
        let code = TypeScriptGenerator::new()
            .generate_enum(&Enum::new("test"), &test_config(None))
            .unwrap();

        assert!(code.ends_with("export enum Test {\n}"));
    }
}
