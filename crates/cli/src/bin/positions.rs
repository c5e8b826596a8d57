use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use intercept_cli::{epoch_millis, init_logging, load_registry, load_settings, parse_instant};
use interceptor_sim::ephemeris::{PositionMap, PositionService, merge_live_positions};
use interceptor_sim::export::{self, positions};
use interceptor_sim::orbits::StateVectorComputer;
use interceptor_sim::vector;
use log::debug;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Heliocentric positions of every registered body at an instant"
)]
struct Cli {
    /// Instant to evaluate (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long)]
    at: Option<String>,

    /// Body manifest (YAML list, TOML record, or directory of TOML records)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Engine settings TOML
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON object of externally fetched positions (AU) that override computed ones
    #[arg(long)]
    live: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Table,
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let instant = parse_instant(cli.at.as_deref())?;
    let epoch_ms = epoch_millis(&instant);
    let registry = load_registry(cli.bodies.as_deref())?;
    let settings = load_settings(cli.settings.as_deref())?;
    debug!(
        "evaluating {} bodies at {} (epoch ms {epoch_ms})",
        registry.len(),
        instant.to_rfc3339()
    );
    let service = PositionService::with_computer(
        &registry,
        StateVectorComputer::new(settings.solver.to_solver()),
    );

    let mut snapshot = service.current_positions(epoch_ms)?;
    if let Some(path) = &cli.live {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let live: BTreeMap<String, [f64; 3]> = serde_json::from_reader(file)
            .with_context(|| format!("parsing live positions in {}", path.display()))?;
        debug!("merging {} live positions from {}", live.len(), path.display());
        snapshot = merge_live_positions(snapshot, &live);
    }

    match cli.format {
        Format::Table => print_table(&instant.to_rfc3339(), &snapshot),
        Format::Csv => {
            let mut out = export::writer_for_path(std::path::Path::new("-"))?;
            positions::write_csv(&mut out, epoch_ms, &snapshot)?;
        }
        Format::Json => positions::write_json(&mut io::stdout(), &snapshot)?,
    }
    Ok(())
}

fn print_table(label: &str, snapshot: &PositionMap) {
    println!("=== Positions at {label} ===");
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>10}",
        "body", "x [AU]", "y [AU]", "z [AU]", "r [AU]"
    );
    for (name, position) in snapshot {
        println!(
            "{:<12} {:>12.6} {:>12.6} {:>12.6} {:>10.6}",
            name,
            position[0],
            position[1],
            position[2],
            vector::norm(position)
        );
    }
}
