//! structgen binary entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use structgen::cli::CliError;
use structgen::cli::commands::generate::{GenerateArgs, handle_generate, parse_key_values};

/// Generate Go struct declarations from sample JSON files or an OpenAPI
/// component schema
#[derive(Debug, Parser)]
#[command(name = "structgen", version, about)]
struct Cli {
    /// Path to the go file where structs will be created. If none provided
    /// stdout will be used.
    #[arg(long)]
    target: Option<PathBuf>,

    /// The package of the module where the structs will live
    #[arg(long, default_value = "main")]
    package: String,

    /// Path to a file containing an OpenAPI component schema (JSON or YAML)
    #[arg(long = "swaggerfile")]
    swagger_file: Option<PathBuf>,

    /// Files to use as source; wildcards are valid (such as *.json) but
    /// need to be quote wrapped
    #[arg(long = "source", value_delimiter = ',')]
    sources: Vec<String>,

    /// Alternative struct names as match=replacement pairs; names before
    /// capitalization are considered for the match
    #[arg(long = "structnames", value_delimiter = ',')]
    struct_names: Vec<String>,

    /// Imports to be added to the generated file
    #[arg(long = "imports", value_delimiter = ',')]
    imports: Vec<String>,

    /// Replace rendered types with your own, e.g. float64=float32;
    /// remember to add imports for types from external packages
    #[arg(long = "replacetypes", value_delimiter = ',')]
    replace_types: Vec<String>,

    /// Replace types of struct members by path, e.g.
    /// StructName.Member=package.CustomType
    #[arg(long = "typesforitems", value_delimiter = ',')]
    types_for_items: Vec<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("FAILED: {err:#}");
        let code = err
            .downcast_ref::<CliError>()
            .map(CliError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let args = GenerateArgs {
        target: cli.target,
        package: cli.package,
        swagger_file: cli.swagger_file,
        sources: cli.sources,
        struct_names: parse_key_values(&cli.struct_names, "structnames")
            .context("flags step")?,
        imports: cli.imports,
        replace_types: parse_key_values(&cli.replace_types, "replacetypes")
            .context("flags step")?,
        types_for_items: parse_key_values(&cli.types_for_items, "typesforitems")
            .context("flags step")?,
    };

    handle_generate(&args).context("generating structs")?;
    Ok(())
}
