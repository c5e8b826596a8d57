//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors surfaced while writing artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::Write;

    use intercept_transfer::{InterceptPlan, InterceptorTrajectory};
    use serde::Serialize;

    use super::ExportError;

    /// Flattened CSV row for one trajectory sample.
    #[derive(Debug, Serialize)]
    struct Row {
        index: usize,
        time_ms: f64,
        x_au: f64,
        y_au: f64,
        z_au: f64,
        vx_km_s: f64,
        vy_km_s: f64,
        vz_km_s: f64,
        fuel_mass_kg: f64,
        ax_m_s2: f64,
        ay_m_s2: f64,
        az_m_s2: f64,
    }

    /// Write every sample of `trajectory` as CSV with a header row.
    pub fn write_csv(
        writer: &mut dyn Write,
        trajectory: &InterceptorTrajectory,
    ) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for (index, point) in trajectory.points.iter().enumerate() {
            let [x_au, y_au, z_au] = point.position_au;
            let [vx_km_s, vy_km_s, vz_km_s] = point.velocity_km_s;
            let [ax_m_s2, ay_m_s2, az_m_s2] = point.acceleration_m_s2;
            csv.serialize(Row {
                index,
                time_ms: point.time_ms,
                x_au,
                y_au,
                z_au,
                vx_km_s,
                vy_km_s,
                vz_km_s,
                fuel_mass_kg: point.fuel_mass_kg,
                ax_m_s2,
                ay_m_s2,
                az_m_s2,
            })?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the full plan (body states plus trajectory) as pretty JSON.
    pub fn write_json(writer: &mut dyn Write, plan: &InterceptPlan) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut *writer, plan)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub mod positions {
    use std::io::Write;

    use intercept_ephemeris::PositionMap;
    use serde::Serialize;

    use super::ExportError;

    #[derive(Debug, Serialize)]
    struct Row<'a> {
        epoch_ms: f64,
        body: &'a str,
        x_au: f64,
        y_au: f64,
        z_au: f64,
        r_au: f64,
    }

    /// Write one CSV row per body for the snapshot taken at `epoch_ms`.
    pub fn write_csv(
        writer: &mut dyn Write,
        epoch_ms: f64,
        positions: &PositionMap,
    ) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for (body, position) in positions {
            let [x_au, y_au, z_au] = *position;
            csv.serialize(Row {
                epoch_ms,
                body,
                x_au,
                y_au,
                z_au,
                r_au: (x_au * x_au + y_au * y_au + z_au * z_au).sqrt(),
            })?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the snapshot as a JSON object keyed by body name.
    pub fn write_json(writer: &mut dyn Write, positions: &PositionMap) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut *writer, positions)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
