//! Lookup of generators by language name

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::generators::csharp::CSharpGenerator;
use crate::generators::go::GoGenerator;
use crate::generators::kotlin::KotlinGenerator;
use crate::generators::typescript::TypeScriptGenerator;
use crate::generators::Generator;

/// Generators keyed by the language token accepted on the command line.
///
/// Built once at startup and passed to the orchestrator by reference.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in language.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register("go", Arc::new(GoGenerator::new()));
        registry.register("kotlin", Arc::new(KotlinGenerator::new()));
        registry.register("typescript", Arc::new(TypeScriptGenerator::new()));

        let csharp: Arc<dyn Generator> = Arc::new(CSharpGenerator::new());
        registry.register("csharp", csharp.clone());
        registry.register("c#", csharp);

        registry
    }

    /// Register a generator under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, generator: Arc<dyn Generator>) {
        self.generators.insert(name.into(), generator);
    }

    /// Names are matched case-sensitively.
    pub fn get(&self, name: &str) -> Result<&dyn Generator> {
        self.generators
            .get(name)
            .map(|generator| generator.as_ref())
            .ok_or_else(|| Error::UnsupportedLanguage(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("languages", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_languages() {
        let registry = GeneratorRegistry::with_defaults();

        assert_eq!(
            registry.names(),
            vec!["c#", "csharp", "go", "kotlin", "typescript"]
        );
        assert_eq!(registry.get("go").unwrap().extension(), "go");
        assert_eq!(registry.get("kotlin").unwrap().extension(), "kt");
        assert_eq!(registry.get("c#").unwrap().language(), "csharp");
        assert_eq!(registry.get("typescript").unwrap().extension(), "ts");
    }

    #[test]
    fn test_unsupported_language() {
        let registry = GeneratorRegistry::with_defaults();

        let err = registry.get("Go").err().unwrap();
        assert!(matches!(err, Error::UnsupportedLanguage(ref token) if token == "Go"));
        assert!(GeneratorRegistry::new().get("go").is_err());
    }

    #[test]
    fn test_type_tables_differ_per_language() {
        use crate::generators::{lookup, TypeName};

        let registry = GeneratorRegistry::with_defaults();
        let spelling = |language: &str| lookup(registry.get(language).unwrap().type_table(), "double");

        assert_eq!(spelling("go"), TypeName::Primitive("float64"));
        assert_eq!(spelling("kotlin"), TypeName::Primitive("Double"));
        assert_eq!(spelling("csharp"), TypeName::Primitive("double"));
        assert_eq!(spelling("typescript"), TypeName::Primitive("number"));
        assert_eq!(
            lookup(registry.get("go").unwrap().type_table(), "Bla"),
            TypeName::Reference("Bla")
        );
    }
}
