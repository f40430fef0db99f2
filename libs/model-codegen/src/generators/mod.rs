//! Code generators for different programming languages
//!
//! Each language has its own module that implements the `Generator` trait.
//! A generator owns a fixed table from DSL primitive names to the target
//! spelling; anything missing from the table is a reference to another
//! generated type.

pub mod csharp;
pub mod go;
pub mod kotlin;
pub mod registry;
pub mod typescript;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::grammar::{is_name_unique, TypeExpr};
use crate::ir::{Class, Enum, Middleware};

pub use registry::GeneratorRegistry;

/// DSL primitive name to target-language spelling
pub type TypeTable = phf::Map<&'static str, &'static str>;

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    pub file_name: String,
    pub code: String,
}

impl GeneratedCode {
    pub fn new(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            code: code.into(),
        }
    }
}

/// Per-invocation options for a generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Package, namespace or module the generated types belong to
    pub package_name: Option<String>,
    /// Timestamp written into every file banner
    pub generated_at: DateTime<Utc>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl GeneratorConfig {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            package_name: None,
            generated_at,
        }
    }

    pub fn with_package(mut self, package_name: Option<String>) -> Self {
        self.package_name = package_name;
        self
    }

    /// The package name, if one was given and it is not empty
    pub fn package(&self) -> Option<&str> {
        self.package_name.as_deref().filter(|p| !p.is_empty())
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Trait that all language generators must implement
pub trait Generator: Send + Sync {
    /// Canonical language name, also used as the output directory name
    fn language(&self) -> &'static str;

    /// File extension without the leading dot
    fn extension(&self) -> &'static str;

    fn type_table(&self) -> &'static TypeTable;

    /// Render a complete source file for a class
    fn generate_class(&self, class: &Class, config: &GeneratorConfig) -> Result<String>;

    /// Render a complete source file for an enum
    fn generate_enum(&self, e: &Enum, config: &GeneratorConfig) -> Result<String>;

    fn file_name(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension())
    }

    fn generate_middleware(
        &self,
        middleware: &Middleware,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode> {
        let code = match middleware {
            Middleware::Class(class) => self.generate_class(class, config)?,
            Middleware::Enum(e) => self.generate_enum(e, config)?,
        };

        Ok(GeneratedCode::new(self.file_name(middleware.name()), code))
    }

    /// Generate one file per declaration, in order. The first failure aborts
    /// the whole batch.
    fn generate(
        &self,
        middlewares: &[Middleware],
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedCode>> {
        middlewares
            .iter()
            .map(|middleware| self.generate_middleware(middleware, config))
            .collect()
    }
}

/// A single type name resolved against a generator's table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName<'a> {
    Primitive(&'static str),
    Reference(&'a str),
}

pub fn lookup<'a>(table: &TypeTable, name: &'a str) -> TypeName<'a> {
    match table.get(name) {
        Some(primitive) => TypeName::Primitive(*primitive),
        None => TypeName::Reference(name),
    }
}

/// Whether any member of the class mentions the given DSL type
pub(crate) fn uses_type(class: &Class, dsl_type: &str) -> bool {
    class.members().iter().any(|member| {
        TypeExpr::parse(&member.declared_type)
            .referenced_names()
            .contains(&dsl_type)
    })
}

pub(crate) fn has_container(class: &Class) -> bool {
    class
        .members()
        .iter()
        .any(|member| TypeExpr::parse(&member.declared_type).is_container())
}

/// Whether every enum value fits a 32-bit integer
pub(crate) fn fits_i32(e: &Enum) -> bool {
    e.values().iter().all(|v| i32::try_from(v.value).is_ok())
}

/// Render every enum value name with `render`, rejecting names that come out
/// empty or that collide with an earlier value.
pub(crate) fn enum_constants<F>(language: &'static str, e: &Enum, render: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> String,
{
    let mut constants: Vec<String> = Vec::with_capacity(e.values().len());

    for value in e.values() {
        let constant = render(&value.name);
        let failure = |message: String| Error::Generation {
            language,
            owner: e.name().to_string(),
            message,
        };

        if constant.is_empty() {
            return Err(failure(format!(
                "value '{}' has no usable identifier characters",
                value.name
            )));
        }
        if !is_name_unique(constants.iter().map(String::as_str), &constant) {
            return Err(failure(format!(
                "value '{}' renders to '{}', which is already taken",
                value.name, constant
            )));
        }

        constants.push(constant);
    }

    Ok(constants)
}

/// "Generated by" comment opening every file
pub fn banner(config: &GeneratorConfig) -> String {
    format!(
        "// **********************************\n\
         //\tGenerated by ModelsGenerator\n\
         //\t{}\n\
         // **********************************\n\n",
        config.timestamp()
    )
}

/// Import list keeping first-seen order
#[derive(Debug, Default)]
pub(crate) struct Imports(Vec<String>);

impl Imports {
    pub fn push(&mut self, import: impl Into<String>) {
        let import = import.into();
        if is_name_unique(self.0.iter().map(String::as_str), &import) {
            self.0.push(import);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) fn test_config(package: Option<&str>) -> GeneratorConfig {
    use chrono::TimeZone;

    GeneratorConfig::new(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        .with_package(package.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: TypeTable = phf::phf_map! { "int" => "i32" };

    #[test]
    fn test_banner_contains_timestamp() {
        let banner = banner(&test_config(None));

        assert!(banner.contains("Generated by ModelsGenerator"));
        assert!(banner.contains("2024-01-02T03:04:05Z"));
    }

    #[test]
    fn test_empty_package_is_absent() {
        assert_eq!(test_config(Some("")).package(), None);
        assert_eq!(test_config(Some("bla")).package(), Some("bla"));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(&TABLE, "int"), TypeName::Primitive("i32"));
        assert_eq!(lookup(&TABLE, "Bla"), TypeName::Reference("Bla"));
    }

    #[test]
    fn test_imports_dedupe() {
        let mut imports = Imports::default();
        imports.push("a");
        imports.push("b");
        imports.push("a");

        assert_eq!(imports.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_member_inspection() {
        let mut class = Class::new("test");
        class.add_member("a", "map<int,date>").unwrap();

        assert!(uses_type(&class, "date"));
        assert!(!uses_type(&class, "string"));
        assert!(has_container(&class));

        let mut e = Enum::new("e");
        e.add_value("small", "-5").unwrap();
        assert!(fits_i32(&e));
        e.add_value("big", "3000000000").unwrap();
        assert!(!fits_i32(&e));
    }

    #[test]
    fn test_enum_constants() {
        let mut e = Enum::new("state");
        e.add_value("first", "1").unwrap();
        e.add_value("second", "2").unwrap();

        let constants = enum_constants("test", &e, |name| name.to_uppercase()).unwrap();
        assert_eq!(constants, vec!["FIRST", "SECOND"]);

        let err = enum_constants("test", &e, |_| "SAME".to_string()).unwrap_err();
        assert!(matches!(
            err,
            Error::Generation { language: "test", ref owner, .. } if owner == "state"
        ));

        let err = enum_constants("test", &e, |_| String::new()).unwrap_err();
        assert!(err.to_string().contains("no usable identifier"));
    }
}
