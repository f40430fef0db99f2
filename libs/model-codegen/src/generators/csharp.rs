//! C# code generator
//!
//! Classes become POCOs with Newtonsoft `JsonProperty` attributes. When a
//! package name is configured the type is wrapped in a namespace block and
//! indented one level.

use heck::ToUpperCamelCase;
use phf::phf_map;

use crate::error::Result;
use crate::generators::{
    banner, enum_constants, fits_i32, has_container, lookup, uses_type, Generator,
    GeneratorConfig, Imports, TypeName, TypeTable,
};
use crate::grammar::{first_char_upper, TypeExpr};
use crate::ir::{Class, Enum};

static CSHARP_TYPES: TypeTable = phf_map! {
    "bool" => "bool",
    "int" => "int",
    "long" => "long",
    "string" => "string",
    "double" => "double",
    "float" => "float",
    "char" => "char",
    "byte" => "byte",
    "date" => "DateTime",
};

#[derive(Debug, Default, Clone, Copy)]
pub struct CSharpGenerator;

impl CSharpGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Banner, `using` directives and the namespace opening
    fn declaration(&self, config: &GeneratorConfig, imports: &Imports) -> String {
        let mut code = banner(config);

        if !imports.is_empty() {
            for import in imports.iter() {
                code.push_str(&format!("using {};\n", import));
            }
            code.push('\n');
        }

        if let Some(package) = config.package() {
            code.push_str(&format!("namespace {}\n{{\n", package));
        }

        code
    }

    fn indent(&self, config: &GeneratorConfig) -> &'static str {
        if config.package().is_some() {
            "\t"
        } else {
            ""
        }
    }

    fn close_namespace(&self, code: &mut String, config: &GeneratorConfig) {
        if config.package().is_some() {
            code.push_str("\n}");
        }
    }

    fn element_type(&self, name: &str) -> String {
        match lookup(&CSHARP_TYPES, name) {
            TypeName::Primitive(primitive) => primitive.to_string(),
            TypeName::Reference(reference) => first_char_upper(reference),
        }
    }

    fn field_type(&self, declared_type: &str) -> String {
        match TypeExpr::parse(declared_type) {
            TypeExpr::List(element) => format!("List<{}>", self.element_type(&element)),
            TypeExpr::Map(key, value) => format!(
                "Dictionary<{}, {}>",
                self.element_type(&key),
                self.element_type(&value)
            ),
            TypeExpr::Named(name) => self.element_type(name),
        }
    }
}

impl Generator for CSharpGenerator {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn extension(&self) -> &'static str {
        "cs"
    }

    fn type_table(&self) -> &'static TypeTable {
        &CSHARP_TYPES
    }

    fn generate_class(&self, class: &Class, config: &GeneratorConfig) -> Result<String> {
        let mut imports = Imports::default();
        if uses_type(class, "date") {
            imports.push("System");
        }
        if has_container(class) {
            imports.push("System.Collections.Generic");
        }
        imports.push("Newtonsoft.Json");

        let indent = self.indent(config);
        let mut code = self.declaration(config, &imports);

        code.push_str(&format!(
            "{indent}public class {}\n{indent}{{\n",
            first_char_upper(class.name())
        ));

        for member in class.members() {
            code.push_str(&format!(
                "{indent}\t[JsonProperty(PropertyName = \"{}\")]\n",
                member.name
            ));
            code.push_str(&format!(
                "{indent}\tpublic {} {} {{ get; set; }}\n",
                self.field_type(&member.declared_type),
                first_char_upper(&member.name)
            ));
        }

        code.push_str(&format!("{indent}}}"));
        self.close_namespace(&mut code, config);

        Ok(code)
    }

    fn generate_enum(&self, e: &Enum, config: &GeneratorConfig) -> Result<String> {
        let indent = self.indent(config);
        let underlying = if fits_i32(e) { "" } else { " : long" };

        let mut code = self.declaration(config, &Imports::default());
        code.push_str(&format!(
            "{indent}public enum {}{}\n{indent}{{\n",
            first_char_upper(e.name()),
            underlying
        ));

        let constants = enum_constants(self.language(), e, |name| name.to_upper_camel_case())?;
        let entries: Vec<String> = constants
            .iter()
            .zip(e.values())
            .map(|(constant, value)| format!("{indent}\t{} = {}", constant, value.value))
            .collect();

        if !entries.is_empty() {
            code.push_str(&entries.join(",\n"));
            code.push('\n');
        }

        code.push_str(&format!("{indent}}}"));
        self.close_namespace(&mut code, config);

        Ok(code)
    }
}
