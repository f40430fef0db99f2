//! Model Code Generator
//!
//! Reads `.gen` model descriptions and generates equivalent type declarations
//! for several target languages, one file per declared class or enum.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Parser**: Turns `.gen` source text into declarations
//! 2. **IR (Intermediate Representation)**: Language-agnostic classes and enums
//! 3. **Generators**: Language-specific code generation from IR
//!
//! Persisting the output goes through a [`utils::CodeSink`], so the pipeline
//! itself never touches the filesystem beyond reading the input.

pub mod error;
pub mod generators;
pub mod grammar;
pub mod ir;
pub mod parser;
pub mod utils;

use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::info;

pub use error::{Error, ModelError, Result};
use generators::{GeneratedCode, Generator, GeneratorConfig, GeneratorRegistry};
use ir::Middleware;
use utils::CodeSink;

/// A requested output language with an optional package name, written
/// `language[:package]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTarget {
    pub language: String,
    pub package: Option<String>,
}

impl FromStr for LanguageTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (language, package) = match s.split_once(':') {
            Some((language, package)) => (language, Some(package)),
            None => (s, None),
        };

        Ok(Self {
            language: language.to_string(),
            package: package.filter(|p| !p.is_empty()).map(String::from),
        })
    }
}

impl fmt::Display for LanguageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}:{}", self.language, package),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Main entry point for code generation
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    middlewares: Vec<Middleware>,
}

impl CodeGenerator {
    /// Create a new code generator from `.gen` source text
    pub fn from_source(content: &str) -> Result<Self> {
        let middlewares = parser::parse(content)?;
        Ok(Self { middlewares })
    }

    /// Create a new code generator from a `.gen` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let middlewares = parser::parse_file(path)?;
        Ok(Self { middlewares })
    }

    /// Parsed declarations in source order
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    /// Generate code for a specific language
    pub fn generate(
        &self,
        generator: &dyn Generator,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedCode>> {
        generator.generate(&self.middlewares, config)
    }

    /// Generate every target and hand the files to `sink`.
    ///
    /// All targets are resolved before anything is generated. Generation and
    /// persistence stop at the first failure; files already saved are kept.
    /// Returns the number of files saved.
    pub fn run(
        &self,
        registry: &GeneratorRegistry,
        targets: &[LanguageTarget],
        generated_at: DateTime<Utc>,
        sink: &mut dyn CodeSink,
    ) -> Result<usize> {
        let resolved = targets
            .iter()
            .map(|target| {
                registry
                    .get(&target.language)
                    .map(|generator| (target, generator))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut saved = 0;

        for (target, generator) in resolved {
            let config = GeneratorConfig::new(generated_at).with_package(target.package.clone());
            let files = self.generate(generator, &config)?;

            for code in &files {
                sink.save(generator.language(), code)?;
            }

            info!(
                requested = %target,
                language = generator.language(),
                files = files.len(),
                "generated code"
            );
            saved += files.len();
        }

        Ok(saved)
    }
}
