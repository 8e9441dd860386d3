//! End-to-end generation tests: loaded sources to rendered Go

use std::io::Write as _;
use std::path::PathBuf;

use structgen::export::{GoRenderOptions, GoStructExporter};
use structgen::import::{load_components, load_documents};
use structgen::inference::{InferenceConfig, InferenceError, StructInferrer};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn render(registry: &structgen::TypeRegistry) -> String {
    let mut out = Vec::new();
    GoStructExporter::new().export(registry, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_sampled_document_renders_expected_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "user.json", r#"{"id": 1, "address": {"city": "X"}}"#);
    let source = path.display().to_string();

    let mut inferrer = StructInferrer::new();
    for document in load_documents(&[source.clone()]).unwrap() {
        inferrer.add_document(&document).unwrap();
    }
    let registry = inferrer.finalize().unwrap();

    let expected = format!(
        "package main\n\n\
         // Address is auto generated by structgen from \"{source}\"\n\
         type Address struct {{\n\
         \tCity string `json:\"city\"`\n\
         }}\n\n\
         // User is auto generated by structgen from \"{source}\"\n\
         type User struct {{\n\
         \tAddress Address `json:\"address\"`\n\
         \tID int64 `json:\"id\"`\n\
         }}\n\n"
    );
    assert_eq!(render(&registry), expected);
}

#[test]
fn test_rename_override_changes_the_emitted_struct() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "issuetype.json", r#"{"name": "bug"}"#);

    let config = InferenceConfig::builder()
        .rename("issuetype", "TicketKind")
        .build();
    let mut inferrer = StructInferrer::with_config(config);
    for document in load_documents(&[path.display().to_string()]).unwrap() {
        inferrer.add_document(&document).unwrap();
    }
    let registry = inferrer.finalize().unwrap();

    let output = render(&registry);
    assert!(output.contains("type TicketKind struct"));
    assert!(!output.contains("type Issuetype struct"));
}

#[test]
fn test_swagger_components_render_with_descriptions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "api.json",
        r##"{
            "components": {"schemas": {
                "Pet": {
                    "type": "object",
                    "description": "A pet in the store",
                    "properties": {
                        "name": {"type": "string", "description": "display name"},
                        "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}}
                    }
                },
                "Tag": {
                    "type": "object",
                    "properties": {"label": {"type": "string"}}
                },
                "Animal": {
                    "type": "object",
                    "oneOf": [
                        {"$ref": "#/components/schemas/Pet"},
                        {"$ref": "#/components/schemas/Tag"}
                    ]
                }
            }}
        }"##,
    );

    let (id, document) = load_components(&path).unwrap();
    let mut inferrer = StructInferrer::new();
    inferrer.add_components(&id, &document).unwrap();
    let registry = inferrer.finalize().unwrap();

    let output = render(&registry);
    assert!(output.contains("// A pet in the store\n"));
    assert!(output.contains("\t// Name is the display name\n"));
    assert!(output.contains("\tTags []Tag `json:\"tags\"`\n"));
    assert!(output.contains("type Animal struct {\n\t*Pet `json:\",inline\"`\n\t*Tag `json:\",inline\"`\n}\n"));
}

#[test]
fn test_swagger_dangling_reference_fails_finalize() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "api.json",
        r##"{
            "components": {"schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "owner": {"$ref": "#/components/schemas/Owner"}
                    }
                }
            }}
        }"##,
    );

    let (id, document) = load_components(&path).unwrap();
    let mut inferrer = StructInferrer::new();
    inferrer.add_components(&id, &document).unwrap();

    let err = inferrer.finalize().unwrap_err();
    match err {
        InferenceError::UnresolvedReference { name, owner } => {
            assert_eq!(name, "Owner");
            assert_eq!(owner, "Pet");
        }
        other => panic!("Expected UnresolvedReference, got {other:?}"),
    }
}

#[test]
fn test_package_scope_strips_stuttering_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "mainconfig.json", r#"{"debug": true}"#);

    let config = InferenceConfig::builder().package_scope("main").build();
    let mut inferrer = StructInferrer::with_config(config);
    for document in load_documents(&[path.display().to_string()]).unwrap() {
        inferrer.add_document(&document).unwrap();
    }
    let registry = inferrer.finalize().unwrap();

    assert!(registry.contains("config"));
    let output = render(&registry);
    assert!(output.contains("type Config struct"));
}

#[test]
fn test_render_options_flow_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "metric.json", r#"{"value": 1.5}"#);

    let mut inferrer = StructInferrer::new();
    for document in load_documents(&[path.display().to_string()]).unwrap() {
        inferrer.add_document(&document).unwrap();
    }
    let registry = inferrer.finalize().unwrap();

    let mut options = GoRenderOptions {
        package: "metrics".to_string(),
        ..GoRenderOptions::default()
    };
    options
        .replace_types
        .insert("float64".to_string(), "float32".to_string());

    let mut out = Vec::new();
    GoStructExporter::with_options(options)
        .export(&registry, &mut out)
        .unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.starts_with("package metrics\n"));
    assert!(output.contains("\tValue float32 `json:\"value\"`\n"));
}
