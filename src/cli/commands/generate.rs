//! Generate command implementation

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::export::{GoRenderOptions, GoStructExporter};
use crate::import;
use crate::inference::{InferenceConfig, StructInferrer};

/// Arguments for a generate run
#[derive(Debug, Default)]
pub struct GenerateArgs {
    /// Output file; stdout if not provided
    pub target: Option<PathBuf>,
    /// Package of the module where the structs will live
    pub package: String,
    /// OpenAPI component schema file, instead of sampled sources
    pub swagger_file: Option<PathBuf>,
    /// Sample file patterns, glob-capable
    pub sources: Vec<String>,
    /// Alternative struct names, matched on raw names before normalization
    pub struct_names: BTreeMap<String, String>,
    /// Imports added to the generated file
    pub imports: Vec<String>,
    /// Replacements for rendered types
    pub replace_types: BTreeMap<String, String>,
    /// Per-field type overrides keyed `"StructName.FieldName"`
    pub types_for_items: BTreeMap<String, String>,
}

/// Handle the generate command
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    if args.swagger_file.is_none() && args.sources.is_empty() {
        return Err(CliError::Usage(
            "either --swaggerfile or --source must be provided".to_string(),
        ));
    }
    if args.swagger_file.is_some() && !args.sources.is_empty() {
        return Err(CliError::Usage(
            "--swaggerfile and --source are mutually exclusive".to_string(),
        ));
    }

    let config = InferenceConfig::builder()
        .package_scope(args.package.clone())
        .renames(args.struct_names.clone())
        .build();
    let mut inferrer = StructInferrer::with_config(config);

    if let Some(swagger) = &args.swagger_file {
        let (id, document) = import::load_components(swagger)?;
        eprintln!(
            "Processing {} schema component(s) from {}",
            document.components.schemas.len(),
            id
        );
        inferrer.add_components(&id, &document)?;
    } else {
        let documents = import::load_documents(&args.sources)?;
        eprintln!("Found {} source file(s)", documents.len());
        for document in &documents {
            inferrer.add_document(document)?;
        }
    }

    let registry = inferrer.finalize()?;
    eprintln!("Inferred {} type(s)", registry.len());

    let exporter = GoStructExporter::with_options(GoRenderOptions {
        package: args.package.clone(),
        imports: args.imports.clone(),
        replace_types: args.replace_types.clone(),
        field_overrides: args.types_for_items.clone(),
    });

    match &args.target {
        Some(path) => {
            let mut file = std::fs::File::create(path).map_err(|e| CliError::Output {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            exporter.export(&registry, &mut file)?;
        }
        None => {
            let stdout = std::io::stdout();
            exporter.export(&registry, &mut stdout.lock())?;
        }
    }
    Ok(())
}

/// Parse repeated `key=value` pairs into an override table
pub fn parse_key_values(
    pairs: &[String],
    flag: &str,
) -> Result<BTreeMap<String, String>, CliError> {
    let mut table = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::Usage(format!(
                "--{flag} expects key=value pairs, got '{pair}'"
            )));
        };
        if key.is_empty() || value.is_empty() {
            return Err(CliError::Usage(format!(
                "--{flag} expects non-empty key=value pairs, got '{pair}'"
            )));
        }
        table.insert(key.to_string(), value.to_string());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_values() {
        let table = parse_key_values(
            &["issuetype=ticket".to_string(), "a=b".to_string()],
            "structnames",
        )
        .unwrap();
        assert_eq!(table["issuetype"], "ticket");
        assert_eq!(table["a"], "b");
    }

    #[test]
    fn test_parse_key_values_rejects_malformed() {
        let err = parse_key_values(&["nopair".to_string()], "structnames").unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_generate_requires_an_input() {
        let args = GenerateArgs::default();
        let err = handle_generate(&args).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_generate_rejects_conflicting_inputs() {
        let args = GenerateArgs {
            swagger_file: Some(PathBuf::from("api.json")),
            sources: vec!["*.json".to_string()],
            package: "main".to_string(),
            ..GenerateArgs::default()
        };
        let err = handle_generate(&args).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }
}
