//! FE command line: load a data schema / UI schema pair through an editor
//! session and report on it.
//!
//! Without file arguments the bundled example documents are used. A missing
//! UI schema is generated from the data schema unless the config disables it.

mod files;

use anyhow::{Context, bail};
use clap::Parser;
use fe_core::lookup::walk;
use fe_core::{LintSeverity, emit_outline};
use fe_editor::{
    EditorConfig, EditorSession, ExamplePaletteService, ExampleSchemaService, PropertiesService,
    SchemaService,
};
use files::FileSchemaService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "fe")]
#[command(about = "Inspect and lint JSON Forms UI schemas")]
#[command(version)]
struct Cli {
    /// Data schema (JSON Schema) file
    #[arg(short, long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// UI schema file
    #[arg(short, long, value_name = "PATH")]
    ui_schema: Option<PathBuf>,

    /// Editor config file (JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List the editable properties of every element
    #[arg(long)]
    properties: bool,

    /// Print the UI schema as JSON instead of an outline
    #[arg(long)]
    json: bool,

    /// Exit with an error when lint reports warnings
    #[arg(long)]
    deny_warnings: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            EditorConfig::from_json_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => EditorConfig::default(),
    };

    let service: Arc<dyn SchemaService> = if cli.schema.is_none() && cli.ui_schema.is_none() {
        log::info!("no documents given, using bundled example");
        Arc::new(ExampleSchemaService)
    } else {
        Arc::new(FileSchemaService::new(cli.schema.clone(), cli.ui_schema.clone()))
    };

    let mut session = EditorSession::new(
        config,
        service,
        Arc::new(ExamplePaletteService::new()),
        PropertiesService::with_defaults(),
    );
    for task in session.start_loading() {
        task.await.context("load task panicked")?;
    }
    let applied = session.apply_pending();
    log::debug!("applied {applied} loaded document(s)");

    let Some(ui_schema) = session.ui_schema() else {
        bail!("no UI schema could be loaded or generated");
    };

    if cli.json {
        println!("{}", ui_schema.to_json_string()?);
    } else {
        print!("{}", emit_outline(ui_schema));
    }

    if cli.properties {
        println!();
        for element in walk(ui_schema) {
            let schemas = session.properties().property_schemas_for(element);
            if schemas.is_empty() {
                continue;
            }
            let values = element.property_values();
            println!("{} [{}]", element.element_type(), element.id.short());
            for entry in schemas.iter() {
                match values.get(&entry.name) {
                    Some(value) => println!("  {} = {value}", entry.name),
                    None => println!("  {}", entry.name),
                }
            }
        }
    }

    let diagnostics = session.lint();
    if session.schema().is_none() {
        eprintln!("note: no data schema loaded, scope checks skipped");
    }
    let mut warnings = 0;
    for diag in &diagnostics {
        let level = match diag.severity {
            LintSeverity::Warning => {
                warnings += 1;
                "warning"
            }
            LintSeverity::Info => "info",
        };
        eprintln!(
            "{level}[{}]: {} ({})",
            diag.rule,
            diag.message,
            diag.element_id.short()
        );
    }

    if cli.deny_warnings && warnings > 0 {
        bail!("{warnings} lint warning(s)");
    }
    Ok(())
}
