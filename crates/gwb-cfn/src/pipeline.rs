//! The build pipeline: locate and parse the schema, copy the base template
//! to the output, then append every generated declaration in emission
//! order.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use gwb_core::config::BuildConfig;
use gwb_core::parse;
use gwb_core::parse::schema::ApiSchema;

use crate::builder::DeclarationBuilder;
use crate::error::BuildError;
use crate::{Declaration, DeclarationKind};

/// Outcome of a build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No schema document present; nothing to build.
    Skipped,

    /// Declarations appended to the output template.
    Built {
        resources: usize,
        methods: usize,
        cors: usize,
    },
}

/// Run a full build.
///
/// A missing schema is a valid steady state (a service with no custom API
/// surface) and short-circuits without touching the output. Every other
/// missing prerequisite is an error. The base template is copied before the
/// empty-paths validation, so that failure leaves exactly the copied
/// template on disk.
pub fn run(config: &BuildConfig) -> Result<BuildOutcome, BuildError> {
    let schema_path = Path::new(&config.schema);
    if !schema_path.exists() {
        log::info!("no API schema at {}, nothing to build", schema_path.display());
        return Ok(BuildOutcome::Skipped);
    }

    let schema = load_schema(schema_path)?;

    init_output(Path::new(&config.template), Path::new(&config.output))?;

    if schema.paths.is_empty() {
        return Err(BuildError::EmptyPaths);
    }

    let declarations = DeclarationBuilder::new().build(&schema);

    let output = Path::new(&config.output);
    for declaration in &declarations {
        append_declaration(output, declaration)?;
    }

    log::info!(
        "built {} with {} declarations",
        config.output,
        declarations.len()
    );
    Ok(summarize(&declarations))
}

/// Parse the schema document, picking the format from the file extension.
pub fn load_schema(path: &Path) -> Result<ApiSchema, BuildError> {
    let content = fs::read_to_string(path).map_err(|source| BuildError::ReadSchema {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yml");
    let schema = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(schema)
}

/// Copy the base template to the output location, creating parent
/// directories as needed.
fn init_output(template: &Path, output: &Path) -> Result<(), BuildError> {
    if !template.exists() {
        return Err(BuildError::MissingTemplate(template.to_path_buf()));
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Init {
            template: template.to_path_buf(),
            output: output.to_path_buf(),
            source,
        })?;
    }
    fs::copy(template, output).map_err(|source| BuildError::Init {
        template: template.to_path_buf(),
        output: output.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Append one declaration as an independently serialized fragment, nested
/// to continue the template's `Resources:` block.
fn append_declaration(output: &Path, declaration: &Declaration) -> Result<(), BuildError> {
    let fragment = declaration
        .to_fragment()
        .map_err(|source| BuildError::Serialize {
            logical_id: declaration.logical_id.clone(),
            source,
        })?;

    let mut file = OpenOptions::new()
        .append(true)
        .open(output)
        .map_err(|source| BuildError::Append {
            logical_id: declaration.logical_id.clone(),
            source,
        })?;
    write!(file, "\n{}", nest_fragment(&fragment)).map_err(|source| BuildError::Append {
        logical_id: declaration.logical_id.clone(),
        source,
    })?;

    log::debug!("appended {}", declaration.logical_id);
    Ok(())
}

/// Indent a serialized fragment two spaces so its top-level key becomes an
/// entry of the base template's `Resources:` block.
fn nest_fragment(fragment: &str) -> String {
    let mut nested = String::with_capacity(fragment.len() + 64);
    for line in fragment.lines() {
        if !line.is_empty() {
            nested.push_str("  ");
            nested.push_str(line);
        }
        nested.push('\n');
    }
    nested
}

fn summarize(declarations: &[Declaration]) -> BuildOutcome {
    let mut resources = 0;
    let mut methods = 0;
    let mut cors = 0;
    for declaration in declarations {
        match declaration.kind {
            DeclarationKind::Resource => resources += 1,
            DeclarationKind::Method => methods += 1,
            DeclarationKind::Cors => cors += 1,
        }
    }
    BuildOutcome::Built {
        resources,
        methods,
        cors,
    }
}
