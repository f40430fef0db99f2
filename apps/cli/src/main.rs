//! Command-line front end for the model generator
//!
//! Usage:
//!   modelgen <file.gen> <language>[:<package>] [<language>[:<package>] ...]

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use modelgen_codegen::generators::GeneratorRegistry;
use modelgen_codegen::utils::DirectorySink;
use modelgen_codegen::{CodeGenerator, LanguageTarget};
use tracing::info;

const ABOUT: &str = "Convert a \"gen\" file into model declarations for different languages.";

const AFTER_HELP: &str = "Targets are written as language:package; the package part is optional.\n\
Supported languages: go, kotlin, csharp (or c#) and typescript.\n\
Generated files are placed under <OUTPUT>/<language>/<timestamp>/.";

#[derive(Parser, Debug)]
#[command(name = "modelgen", version, about = ABOUT, after_help = AFTER_HELP)]
struct Args {
    /// Path to the .gen model file
    file: PathBuf,

    /// Target languages, e.g. go:models kotlin:com.example csharp
    #[arg(required_unless_present = "dump_model")]
    targets: Vec<LanguageTarget>,

    /// Root directory for generated files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Print the parsed model as JSON instead of generating code
    #[arg(long)]
    dump_model: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,modelgen=info,modelgen_codegen=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // A bare `help` is accepted alongside `--help`.
    if std::env::args().nth(1).as_deref() == Some("help") {
        Args::command().print_long_help()?;
        return Ok(());
    }

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let registry = GeneratorRegistry::with_defaults();

    // Unknown languages fail before the input is read.
    for target in &args.targets {
        registry.get(&target.language)?;
    }

    let codegen = CodeGenerator::from_file(&args.file)
        .with_context(|| format!("parsing {}", args.file.display()))?;

    if args.dump_model {
        let json = serde_json::to_string_pretty(codegen.middlewares())
            .context("serializing parsed model")?;
        println!("{}", json);
        return Ok(());
    }

    let generated_at = Utc::now();
    let mut sink = DirectorySink::new(&args.output, generated_at);

    let saved = codegen
        .run(&registry, &args.targets, generated_at, &mut sink)
        .context("generating code")?;

    info!(
        files = saved,
        output = %args.output.display(),
        "generation finished"
    );

    Ok(())
}
