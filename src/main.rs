//! Command line front end: export a map project to authoring-language source.
//!
//! `int_fic_export map.toml -b world -o map_world.toml`
//!
//! Without `--output` the export is printed to stdout.
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info, warn};

use int_fic_export::export::all_backends;
use int_fic_export::{ExportError, backend_by_name, export_to_file, export_to_string};
use int_fic_export::{load_project_from_file, validate_project};

#[derive(Parser)]
#[command(name = "int_fic_export")]
#[command(about = "Export an interactive fiction map to authoring-language source")]
#[command(version)]
struct Cli {
    /// Project file (.toml)
    #[arg(required_unless_present = "list_backends")]
    project: Option<PathBuf>,

    /// Export backend
    #[arg(short, long, default_value = "outline")]
    backend: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the available backends and exit
    #[arg(long)]
    list_backends: bool,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_backends {
        for backend in all_backends() {
            println!("{}\t.{}", backend.name(), backend.extension());
        }
        return;
    }

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Export failed: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ExportError> {
    let Some(project_path) = cli.project.as_deref() else {
        return Ok(());
    };

    let project = load_project_from_file(project_path)?;
    info!(
        "loaded {}: {} rooms, {} connections",
        project_path.display(),
        project.rooms.len(),
        project.connections.len()
    );

    for issue in validate_project(&project) {
        warn!("{}", issue.message);
    }

    let backend = backend_by_name(&cli.backend)?;

    match &cli.output {
        Some(path) => {
            export_to_file(&project, backend.as_ref(), path)?;
            info!("wrote {}", path.display());
        }
        None => {
            let text = export_to_string(&project, backend.as_ref())?;
            print!("{}", text);
        }
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // RUST_LOG, when set, wins over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
