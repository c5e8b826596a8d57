use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use intercept_cli::{epoch_millis, init_logging, load_registry, load_settings, parse_instant};
use interceptor_sim::constants::SECONDS_PER_DAY;
use interceptor_sim::ephemeris::PositionService;
use interceptor_sim::export::{self, trajectory as trajectory_export};
use interceptor_sim::orbits::StateVectorComputer;
use interceptor_sim::transfer::{
    MissionConfig, TrajectoryEstimator, TrajectoryType, plan_intercept,
};
use log::debug;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Estimate an interceptor trajectory between two registered bodies"
)]
struct Cli {
    /// Launch body name (case-insensitive)
    #[arg(long)]
    from: String,

    /// Target body name (case-insensitive)
    #[arg(long)]
    to: String,

    /// Launch instant (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long)]
    at: Option<String>,

    /// Flight time in days (defaults to --mission-days, then the Hohmann estimate)
    #[arg(long)]
    days: Option<f64>,

    /// Preferred mission duration in days
    #[arg(long)]
    mission_days: Option<f64>,

    /// Propulsion type: chemical, ion, or nuclear
    #[arg(long)]
    propulsion: String,

    /// Payload items (repeatable): camera, spectrometer, magnetometer, dust_analyzer, impactor, sample_return
    #[arg(long = "payload", required = true, num_args = 1..)]
    payload: Vec<String>,

    /// Trajectory type: direct, flyby, or rendezvous
    #[arg(long)]
    trajectory: Option<String>,

    /// Fuel tank capacity in kg
    #[arg(long)]
    fuel_capacity: Option<f64>,

    /// Body manifest (YAML list, TOML record, or directory of TOML records)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Engine settings TOML
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the full plan as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write trajectory samples as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let instant = parse_instant(cli.at.as_deref())?;
    let registry = load_registry(cli.bodies.as_deref())?;
    let settings = load_settings(cli.settings.as_deref())?;

    let mut mission = MissionConfig::parse(&cli.propulsion, cli.payload.as_slice())?;
    if let Some(kind) = &cli.trajectory {
        mission = mission.with_trajectory_type(kind.parse::<TrajectoryType>()?);
    }
    if let Some(capacity) = cli.fuel_capacity {
        mission = mission.with_fuel_capacity(capacity);
    }
    if let Some(days) = cli.mission_days {
        mission = mission.with_mission_duration(days * SECONDS_PER_DAY);
    }

    debug!(
        "planning {} -> {} with {} bodies registered, {} propulsion",
        cli.from,
        cli.to,
        registry.len(),
        mission.propulsion
    );
    let service = PositionService::with_computer(
        &registry,
        StateVectorComputer::new(settings.solver.to_solver()),
    );
    let estimator = TrajectoryEstimator::new(settings.mission.base_dry_mass_kg);
    let plan = plan_intercept(
        &service,
        &estimator,
        &cli.from,
        &cli.to,
        epoch_millis(&instant),
        cli.days.map(|days| days * SECONDS_PER_DAY),
        &mission,
    )?;

    if let Some(path) = &cli.json {
        let mut out = export::writer_for_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        trajectory_export::write_json(&mut out, &plan)?;
    }
    if let Some(path) = &cli.csv {
        let mut out = export::writer_for_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        trajectory_export::write_csv(&mut out, &plan.trajectory)?;
    }

    let trajectory = &plan.trajectory;
    let arrival_ms = trajectory
        .points
        .last()
        .map(|point| point.time_ms)
        .unwrap_or_default();
    let (d, h, m) = format_duration(trajectory.flight_time_s);

    println!("=== Intercept Estimate ===");
    println!("Route           : {} -> {}", plan.origin, plan.target);
    println!("Launch          : {}", instant.to_rfc3339());
    println!("Arrival         : {}", format_millis(arrival_ms));
    println!(
        "Flight time     : {:.2} days ({}d {}h {}m)",
        trajectory.flight_time_s / SECONDS_PER_DAY,
        d,
        h,
        m
    );
    println!(
        "Propulsion      : {} (Isp {:.0} s)",
        trajectory.propulsion,
        trajectory.propulsion.isp_seconds()
    );
    println!(
        "Delta-v         : {:.3} km/s",
        trajectory.total_delta_v_m_s / 1_000.0
    );
    println!("Fuel used       : {:.1} kg", trajectory.total_fuel_used_kg);
    if let Some(margin) = trajectory.fuel_margin_kg {
        println!("Fuel margin     : {margin:.1} kg");
    }
    println!(
        "Success (est.)  : {:.1}%",
        trajectory.intercept_probability * 100.0
    );
    println!("Samples         : {}", trajectory.points.len());

    Ok(())
}

fn format_millis(ms: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms.round() as i64)
        .map(|instant| instant.to_rfc3339())
        .unwrap_or_else(|| format!("{ms} ms"))
}

fn format_duration(seconds: f64) -> (i64, i64, i64) {
    let total_seconds = seconds.max(0.0);
    let days = (total_seconds / 86_400.0).floor() as i64;
    let remaining = total_seconds - (days as f64 * 86_400.0);
    let hours = (remaining / 3_600.0).floor() as i64;
    let minutes = ((remaining - hours as f64 * 3_600.0) / 60.0).floor() as i64;
    (days, hours, minutes)
}
