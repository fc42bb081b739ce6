//! orbiter-props CLI
//!
//! Command-line interface for exporting collision cages and thruster layouts
//! from a scene snapshot into an Orbiter vessel header.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use orbiter_props_export::{ExportSettings, ExportSummary, HeaderExporter, RocketGroup};
use orbiter_props_scene::Scene;

/// orbiter-props - Orbiter vessel header exporter
#[derive(Parser)]
#[command(name = "orbiter-props")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for summaries and listings
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export the collision cage and thrusters to a header file
    Export(ExportArgs),

    /// List the objects and collections of a scene snapshot
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Scene snapshot (JSON)
    #[arg(short, long)]
    scene: PathBuf,

    /// Export settings (YAML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Collision cage object name
    #[arg(long)]
    cage: Option<String>,

    /// Collision cage symbol suffix
    #[arg(long)]
    suffix: Option<String>,

    /// Header file to write (overrides the settings' header_file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rocket group as NAME=COLLECTION (can be repeated; replaces configured groups)
    #[arg(short, long = "group")]
    groups: Vec<RocketGroup>,

    /// Type used for the vertex count constant
    #[arg(long)]
    uint_type: Option<String>,

    /// Print the header instead of writing it
    #[arg(long)]
    stdout: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Scene snapshot (JSON)
    #[arg(short, long)]
    scene: PathBuf,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbosity >= 2)
        .with_file(verbosity >= 3)
        .with_line_number(verbosity >= 3)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Export(args) => cmd_export(args, cli.format),
        Commands::Inspect(args) => cmd_inspect(args, cli.format),
    }
}

/// Settings file first, then command-line overrides
fn resolve_settings(args: &ExportArgs) -> Result<ExportSettings> {
    let mut settings = match &args.settings {
        Some(path) => ExportSettings::load(path)
            .with_context(|| format!("Failed to load settings {:?}", path))?,
        None => ExportSettings::default(),
    };

    if let Some(cage) = &args.cage {
        settings.collision_cage = cage.clone();
    }
    if let Some(suffix) = &args.suffix {
        settings.cage_suffix = suffix.clone();
    }
    if let Some(output) = &args.output {
        settings.header_file = output.to_string_lossy().into_owned();
    }
    if !args.groups.is_empty() {
        settings.rocket_groups = args.groups.clone();
    }
    if let Some(uint_type) = &args.uint_type {
        settings.uint_type = uint_type.clone();
    }

    Ok(settings)
}

fn cmd_export(args: ExportArgs, format: OutputFormat) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let output = match &args.output {
        Some(path) => path.clone(),
        None => settings.resolve_header_path(Some(args.scene.as_path())),
    };

    let mut scene = Scene::load(&args.scene)
        .context("Failed to load scene snapshot")?;
    let exporter = HeaderExporter::new(settings)
        .context("Invalid export settings")?;

    if args.stdout {
        let document = exporter.build_document(&mut scene, &output)
            .context("Export failed")?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(document.render().as_bytes())?;
        return Ok(());
    }

    let summary = exporter.export(&mut scene, &output)
        .with_context(|| format!("Export to {:?} failed", output))?;
    print_summary(&summary, format)
}

fn print_summary(summary: &ExportSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Text => {
            println!("Wrote {}", summary.output.display());
            println!("  Touchdown points: {}", summary.contact_points);
            println!("  Thrusters:        {}", summary.thrusters);
            println!("  Thruster groups:  {}", summary.groups);
        }
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs, format: OutputFormat) -> Result<()> {
    info!("Opening scene: {:?}", args.scene);
    let scene = Scene::load(&args.scene)
        .context("Failed to load scene snapshot")?;

    match format {
        OutputFormat::Json => {
            let objects = scene.objects().iter().map(|object| {
                let location = scene.world_location(&object.name).ok();
                serde_json::json!({
                    "name": object.name,
                    "kind": object.kind,
                    "parent": object.parent,
                    "vertices": object.mesh.as_ref().map(|m| m.vertex_count()),
                    "location": location,
                })
            }).collect::<Vec<_>>();
            let output = serde_json::json!({
                "objects": objects,
                "collections": scene.collections(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{:<24} {:<8} {:>9}  {}", "Object", "Kind", "Vertices", "Location");
            println!("{:-<24} {:-<8} {:->9}  {:-<30}", "", "", "", "");
            for object in scene.objects() {
                let vertices = object.mesh.as_ref()
                    .map(|m| m.vertex_count().to_string())
                    .unwrap_or_else(|| "-".to_string());
                let location = match scene.world_location(&object.name) {
                    Ok(p) => format!("{:.3}, {:.3}, {:.3}", p.x, p.y, p.z),
                    Err(e) => format!("<{}>", e),
                };
                println!("{:<24} {:<8} {:>9}  {}", object.name, object.kind, vertices, location);
            }

            println!("\nCollections:");
            for collection in scene.collections() {
                println!("  {} ({}): {}",
                    collection.name,
                    collection.objects.len(),
                    collection.objects.join(", ")
                );
            }
            println!("\nTotal: {} objects, {} collections",
                scene.objects().len(),
                scene.collections().len()
            );
        }
    }

    Ok(())
}
