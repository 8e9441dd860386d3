//! Go struct rendering
//!
//! Emits one `type X struct {...}` declaration per registry entry, in
//! sorted name order so the same registry always yields the same source.

use std::collections::BTreeMap;
use std::io::Write;

use crate::inference::{
    DescriptorKind, EMBEDDED_FIELD, PrimitiveKind, Shape, TypeDescriptor, TypeRegistry, naming,
};

use super::ExportError;

/// Options controlling Go source rendering
#[derive(Debug, Clone)]
pub struct GoRenderOptions {
    /// Target package name
    pub package: String,
    /// Imports added to the file header
    pub imports: Vec<String>,
    /// Replacements for rendered types, matched on the full type text
    /// (e.g. `float64` -> `float32`)
    pub replace_types: BTreeMap<String, String>,
    /// Per-field type overrides keyed `"StructName.FieldName"`
    pub field_overrides: BTreeMap<String, String>,
}

impl Default for GoRenderOptions {
    fn default() -> Self {
        Self {
            package: "main".to_string(),
            imports: Vec::new(),
            replace_types: BTreeMap::new(),
            field_overrides: BTreeMap::new(),
        }
    }
}

/// Go struct exporter
///
/// Consumes the final registry together with its provenance and
/// description maps; the inference core never sees target syntax.
#[derive(Debug, Default)]
pub struct GoStructExporter {
    options: GoRenderOptions,
}

impl GoStructExporter {
    /// Create an exporter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with custom options
    pub fn with_options(options: GoRenderOptions) -> Self {
        Self { options }
    }

    /// Render every registered type to `out`
    pub fn export<W: Write>(
        &self,
        registry: &TypeRegistry,
        out: &mut W,
    ) -> Result<(), ExportError> {
        let mut code = String::new();
        for (key, shape) in registry.iter() {
            self.render_struct(key, shape, registry, &mut code);
        }

        let mut heading = format!("package {}\n", self.options.package);
        let mut imports = self.options.imports.clone();
        imports.sort();
        if !imports.is_empty() {
            heading.push_str("import (\n");
            for import in &imports {
                heading.push_str(&format!("\t\"{import}\"\n"));
            }
            heading.push_str(")\n");
        }
        heading.push('\n');

        out.write_all(heading.as_bytes())?;
        out.write_all(code.as_bytes())?;
        Ok(())
    }

    fn render_struct(&self, key: &str, shape: &Shape, registry: &TypeRegistry, code: &mut String) {
        let struct_name = naming::display(key);

        code.push_str(&format!(
            "// {} is auto generated by structgen from \"{}\"\n",
            struct_name,
            registry.provenance(key)
        ));
        if let Some(description) = registry.description(key) {
            code.push_str(&format!("// {}\n", description.replace('\n', "\n// ")));
        }

        code.push_str(&format!("type {struct_name} struct {{\n"));
        for (field_name, descriptor) in shape.iter() {
            if field_name.as_str() == EMBEDDED_FIELD {
                // a component that is itself a union: embed the members
                if let DescriptorKind::Multi(members) = &descriptor.kind {
                    code.push_str(&self.embed_lines(members, "\t"));
                }
                continue;
            }
            self.render_field(&struct_name, field_name, descriptor, code);
        }
        code.push_str("}\n\n");
    }

    fn render_field(
        &self,
        struct_name: &str,
        field_name: &str,
        descriptor: &TypeDescriptor,
        code: &mut String,
    ) {
        let field = naming::display(field_name);

        if let Some(description) = &descriptor.description {
            code.push_str(&format!(
                "\t// {} is the {}\n",
                field,
                description.replace('\n', "\n\t// ")
            ));
        }

        // a union field embeds its members in an anonymous struct
        if let DescriptorKind::Multi(members) = &descriptor.kind {
            code.push_str(&format!("\t{field} struct {{\n"));
            code.push_str(&self.embed_lines(members, "\t\t"));
            code.push_str(&format!("\t}} `json:\"{field_name}\"`\n"));
            return;
        }

        let mut type_name = self.resolve_type(descriptor);
        if let Some(replacement) = self.options.replace_types.get(&type_name) {
            type_name = replacement.clone();
        }
        if let Some(forced) = self
            .options
            .field_overrides
            .get(&format!("{struct_name}.{field}"))
        {
            type_name = forced.clone();
        }
        if type_name.is_empty() {
            type_name = "interface{}".to_string();
        }
        // a directly recursive value is unrepresentable without indirection
        if type_name == struct_name {
            type_name = format!("*{type_name}");
        }

        code.push_str(&format!("\t{field} {type_name} `json:\"{field_name}\"`\n"));
    }

    fn embed_lines(&self, members: &[String], indent: &str) -> String {
        members
            .iter()
            .map(|member| format!("{}*{} `json:\",inline\"`\n", indent, naming::display(member)))
            .collect()
    }

    fn resolve_type(&self, descriptor: &TypeDescriptor) -> String {
        let base = self.resolve_kind(&descriptor.kind);
        if descriptor.is_array {
            format!("[]{base}")
        } else {
            base
        }
    }

    fn resolve_kind(&self, kind: &DescriptorKind) -> String {
        match kind {
            DescriptorKind::Primitive(kind) => go_primitive(kind).to_string(),
            DescriptorKind::Named(name) => naming::display(name),
            DescriptorKind::Array(inner) => format!("[]{}", self.resolve_kind(inner)),
            DescriptorKind::Map(inner) => format!("map[string]{}", self.resolve_kind(inner)),
            DescriptorKind::Unknown | DescriptorKind::Multi(_) => "interface{}".to_string(),
        }
    }
}

fn go_primitive(kind: &PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Integer => "int64",
        PrimitiveKind::Float => "float64",
        PrimitiveKind::Boolean => "bool",
    }
}
