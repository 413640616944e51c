use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;

use gwb_cfn::builder::DeclarationBuilder;
use gwb_cfn::pipeline::{self, BuildOutcome};
use gwb_cfn::DeclarationBody;
use gwb_core::config::{self, BuildConfig, CONFIG_FILE_NAME};

#[derive(Parser)]
#[command(name = "gwb", about = "API Gateway IaC template builder", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the gateway template from the API schema
    Build {
        /// Path to the API schema (YAML or JSON)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Path to the base template
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Path of the built template
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the API schema
    Validate {
        /// Path to the API schema (YAML or JSON)
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// Print the declarations a build would append, without writing
    Inspect {
        /// Path to the API schema (YAML or JSON)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a gwb configuration and starter base template
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            schema,
            template,
            output,
        } => cmd_build(schema, template, output),

        Commands::Validate { schema } => cmd_validate(schema),

        Commands::Inspect { schema, format } => cmd_inspect(schema, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "gwb", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config from the current directory, falling back to the
/// defaults, and apply CLI overrides on top.
fn resolve_config(
    schema: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<BuildConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let mut config = config::load_config(&config_path)
        .map_err(|e| anyhow::anyhow!(e))?
        .unwrap_or_default();

    if let Some(schema) = schema {
        config.schema = schema.display().to_string();
    }
    if let Some(template) = template {
        config.template = template.display().to_string();
    }
    if let Some(output) = output {
        config.output = output.display().to_string();
    }

    log::debug!("resolved config: {config:?}");
    Ok(config)
}

fn cmd_build(
    schema: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(schema, template, output)?;

    match pipeline::run(&config).with_context(|| format!("failed to build {}", config.output))? {
        BuildOutcome::Skipped => {
            eprintln!("  no schema at {}, nothing to build", config.schema);
        }
        BuildOutcome::Built {
            resources,
            methods,
            cors,
        } => {
            eprintln!(
                "  wrote {} ({resources} resources, {methods} methods, {cors} cors)",
                config.output
            );
        }
    }
    Ok(())
}

fn cmd_validate(schema: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(schema, None, None)?;

    let schema = pipeline::load_schema(Path::new(&config.schema))
        .with_context(|| format!("failed to load {}", config.schema))?;
    if schema.paths.is_empty() {
        bail!("{}: schema defines no paths", config.schema);
    }

    let operations: usize = schema
        .paths
        .values()
        .map(|item| item.defined_verbs().len())
        .sum();
    eprintln!(
        "  ok: {} paths, {} operations",
        schema.paths.len(),
        operations
    );
    Ok(())
}

fn cmd_inspect(schema: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let config = resolve_config(schema, None, None)?;

    let schema = pipeline::load_schema(Path::new(&config.schema))
        .with_context(|| format!("failed to load {}", config.schema))?;
    let declarations = DeclarationBuilder::new().build(&schema);

    match format {
        InspectFormat::Yaml => {
            for declaration in &declarations {
                println!("{}", declaration.to_fragment()?);
            }
        }
        InspectFormat::Json => {
            let doc: IndexMap<&str, &DeclarationBody> = declarations
                .iter()
                .map(|d| (d.logical_id.as_str(), &d.body))
                .collect();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    write_if_absent(
        Path::new(CONFIG_FILE_NAME),
        config::default_config_content(),
        force,
    )?;

    let config = resolve_config(None, None, None)?;
    write_if_absent(
        Path::new(&config.template),
        config::default_template_content(),
        force,
    )?;
    Ok(())
}

fn write_if_absent(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("  wrote {}", path.display());
    Ok(())
}
