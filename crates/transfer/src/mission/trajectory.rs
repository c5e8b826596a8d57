//! Discretised interceptor path between two positions.

use log::{debug, warn};
use serde::Serialize;

use intercept_core::constants::{AU_M, GM_SUN};
use intercept_core::units::ms_to_kms;
use intercept_core::vector::{self, Vector3};
use intercept_orbits::hohmann;
use intercept_propulsion::{PropulsionType, fuel_mass};

use super::estimate::{estimate_delta_v, intercept_probability};
use super::{MissionConfig, TrajectoryError, TrajectoryType};

/// Number of intervals along the path; the trajectory carries one more sample.
pub const TRAJECTORY_STEPS: usize = 100;

/// Default spacecraft bus mass before payload (kg).
const DEFAULT_BASE_DRY_MASS_KG: f64 = 1_000.0;

/// Per-sample record along the interceptor path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    /// Unix time of the sample (ms).
    pub time_ms: f64,
    pub position_au: Vector3,
    pub velocity_km_s: Vector3,
    /// Propellant remaining on board (kg).
    pub fuel_mass_kg: f64,
    pub acceleration_m_s2: Vector3,
}

/// Result of one estimation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterceptorTrajectory {
    pub points: Vec<TrajectoryPoint>,
    pub total_delta_v_m_s: f64,
    pub total_fuel_used_kg: f64,
    pub flight_time_s: f64,
    pub intercept_probability: f64,
    pub propulsion: PropulsionType,
    pub trajectory_type: Option<TrajectoryType>,
    /// Fuel capacity minus fuel used, when a capacity was configured.
    pub fuel_margin_kg: Option<f64>,
}

/// Sizing parameters shared by every estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryEstimator {
    pub base_dry_mass_kg: f64,
}

impl Default for TrajectoryEstimator {
    fn default() -> Self {
        Self {
            base_dry_mass_kg: DEFAULT_BASE_DRY_MASS_KG,
        }
    }
}

impl TrajectoryEstimator {
    pub fn new(base_dry_mass_kg: f64) -> Self {
        Self { base_dry_mass_kg }
    }

    /// Bus plus payload mass (kg).
    pub fn dry_mass_kg(&self, config: &MissionConfig) -> f64 {
        self.base_dry_mass_kg + config.payload.mass_kg()
    }

    /// Hohmann time of flight (s) between the radii of two positions in AU.
    pub fn hohmann_flight_time(
        &self,
        start_au: &Vector3,
        target_au: &Vector3,
    ) -> Result<f64, TrajectoryError> {
        let r1 = vector::norm(start_au) * AU_M;
        let r2 = vector::norm(target_au) * AU_M;
        hohmann(r1, r2, GM_SUN)
            .map(|transfer| transfer.tof_seconds)
            .ok_or_else(|| {
                TrajectoryError::InvalidInput(
                    "cannot derive a flight time from a zero or non-finite radius".to_string(),
                )
            })
    }

    /// Build the discretised path from `start_au` to `target_au`.
    ///
    /// Samples sit at fractions `i / 100` of the flight. Position moves linearly between
    /// the endpoints at the constant mean transit velocity, propellant drains linearly from
    /// the rocket-equation total to zero, and acceleration is reported as zero. Timestamps
    /// are offset from `reference_ms` so identical inputs always give identical output.
    pub fn build_trajectory(
        &self,
        start_au: Vector3,
        target_au: Vector3,
        flight_time_s: f64,
        config: &MissionConfig,
        reference_ms: f64,
    ) -> Result<InterceptorTrajectory, TrajectoryError> {
        config.validate()?;
        if !vector::is_finite(&start_au) || !vector::is_finite(&target_au) {
            return Err(TrajectoryError::InvalidInput(
                "start and target positions must be finite".to_string(),
            ));
        }
        if !(flight_time_s.is_finite() && flight_time_s > 0.0) {
            return Err(TrajectoryError::InvalidInput(format!(
                "flight time must be positive (got {flight_time_s})"
            )));
        }
        if !reference_ms.is_finite() {
            return Err(TrajectoryError::InvalidInput(format!(
                "reference instant must be finite (got {reference_ms})"
            )));
        }

        let delta_v = estimate_delta_v(
            &vector::scale(&start_au, AU_M),
            &vector::scale(&target_au, AU_M),
        )?;
        let dry_mass = self.dry_mass_kg(config);
        let total_fuel = fuel_mass(delta_v, config.propulsion.isp_seconds(), dry_mass);
        let probability = intercept_probability(delta_v, flight_time_s, config.propulsion);

        let displacement_m = vector::scale(&vector::sub(&target_au, &start_au), AU_M);
        let transit_velocity = vector::scale(&displacement_m, 1.0 / flight_time_s).map(ms_to_kms);

        let points = (0..=TRAJECTORY_STEPS)
            .map(|i| {
                let t = i as f64 / TRAJECTORY_STEPS as f64;
                TrajectoryPoint {
                    time_ms: reference_ms + t * flight_time_s * 1_000.0,
                    position_au: vector::lerp(&start_au, &target_au, t),
                    velocity_km_s: transit_velocity,
                    fuel_mass_kg: total_fuel * (1.0 - t),
                    acceleration_m_s2: [0.0; 3],
                }
            })
            .collect();

        let fuel_margin = config.fuel_capacity_kg.map(|capacity| capacity - total_fuel);
        if let Some(margin) = fuel_margin.filter(|margin| *margin < 0.0) {
            warn!(
                "{} interceptor needs {total_fuel:.1} kg of propellant, {:.1} kg over capacity",
                config.propulsion, -margin
            );
        }
        debug!(
            "trajectory estimate: dv = {delta_v:.1} m/s, fuel = {total_fuel:.1} kg, p = {probability:.3}"
        );

        Ok(InterceptorTrajectory {
            points,
            total_delta_v_m_s: delta_v,
            total_fuel_used_kg: total_fuel,
            flight_time_s,
            intercept_probability: probability,
            propulsion: config.propulsion,
            trajectory_type: config.trajectory_type,
            fuel_margin_kg: fuel_margin,
        })
    }
}

/// Build a trajectory with the default bus mass.
pub fn build_trajectory(
    start_au: Vector3,
    target_au: Vector3,
    flight_time_s: f64,
    config: &MissionConfig,
    reference_ms: f64,
) -> Result<InterceptorTrajectory, TrajectoryError> {
    TrajectoryEstimator::default().build_trajectory(
        start_au,
        target_au,
        flight_time_s,
        config,
        reference_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use intercept_propulsion::{Payload, PayloadItem};

    fn config() -> MissionConfig {
        MissionConfig::new(
            PropulsionType::Ion,
            Payload::new([PayloadItem::Camera, PayloadItem::Impactor]).unwrap(),
        )
    }

    #[test]
    fn dry_mass_includes_payload() {
        let estimator = TrajectoryEstimator::new(500.0);
        assert_eq!(estimator.dry_mass_kg(&config()), 875.0);
    }

    #[test]
    fn fuel_margin_reports_shortfall() {
        let cfg = config().with_fuel_capacity(1.0);
        let trajectory =
            build_trajectory([1.0, 0.0, 0.0], [0.0, 2.0, 0.0], 1.0e7, &cfg, 0.0).unwrap();
        let margin = trajectory.fuel_margin_kg.unwrap();
        assert!((margin - (1.0 - trajectory.total_fuel_used_kg)).abs() < 1e-9);
        assert!(margin < 0.0);
    }

    #[test]
    fn rejects_non_positive_flight_time() {
        for flight in [0.0, -5.0, f64::NAN] {
            assert!(matches!(
                build_trajectory([1.0, 0.0, 0.0], [1.5, 0.0, 0.0], flight, &config(), 0.0),
                Err(TrajectoryError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn velocity_is_mean_transit_velocity() {
        let flight = 1.0e7;
        let trajectory =
            build_trajectory([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], flight, &config(), 0.0).unwrap();
        let expected = AU_M / flight / 1_000.0;
        for point in &trajectory.points {
            assert!((point.velocity_km_s[0] - expected).abs() < 1e-9);
            assert_eq!(point.acceleration_m_s2, [0.0; 3]);
        }
    }
}
