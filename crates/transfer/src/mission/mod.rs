//! Interceptor planning orchestrator: samples the origin and target bodies, then
//! estimates the transfer between them.
//!
//! The estimate is deliberately coarse. Delta-v comes from an average-radius vis-viva
//! heuristic and the path is a straight-line interpolation, so the output is a
//! simulation-quality sketch rather than a solved transfer.

pub mod estimate;
pub mod trajectory;

use std::fmt;
use std::str::FromStr;

use intercept_ephemeris::{PositionError, PositionService};
use intercept_orbits::StateVector;
use intercept_propulsion::{Payload, PropulsionError, PropulsionType};
use serde::{Deserialize, Serialize};

use self::trajectory::{InterceptorTrajectory, TrajectoryEstimator};

/// Top-level trajectory estimation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrajectoryError {
    #[error("invalid mission configuration: {0}")]
    InvalidMissionConfig(String),
    #[error("invalid trajectory input: {0}")]
    InvalidInput(String),
    #[error("position lookup failed: {0}")]
    Position(#[from] PositionError),
}

impl From<PropulsionError> for TrajectoryError {
    fn from(err: PropulsionError) -> Self {
        TrajectoryError::InvalidMissionConfig(err.to_string())
    }
}

/// Requested trajectory shape, carried through to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryType {
    Direct,
    Flyby,
    Rendezvous,
}

impl fmt::Display for TrajectoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrajectoryType::Direct => "direct",
            TrajectoryType::Flyby => "flyby",
            TrajectoryType::Rendezvous => "rendezvous",
        })
    }
}

impl FromStr for TrajectoryType {
    type Err = TrajectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(TrajectoryType::Direct),
            "flyby" => Ok(TrajectoryType::Flyby),
            "rendezvous" => Ok(TrajectoryType::Rendezvous),
            _ => Err(TrajectoryError::InvalidMissionConfig(format!(
                "unknown trajectory type `{s}`"
            ))),
        }
    }
}

/// Read-only mission inputs for a trajectory estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionConfig {
    pub propulsion: PropulsionType,
    pub payload: Payload,
    pub trajectory_type: Option<TrajectoryType>,
    /// Tank capacity (kg); when set the result reports the remaining margin.
    pub fuel_capacity_kg: Option<f64>,
    /// Preferred flight duration (s) used when the caller does not pass one.
    pub mission_duration_s: Option<f64>,
}

impl MissionConfig {
    pub fn new(propulsion: PropulsionType, payload: Payload) -> Self {
        Self {
            propulsion,
            payload,
            trajectory_type: None,
            fuel_capacity_kg: None,
            mission_duration_s: None,
        }
    }

    /// Build a configuration from textual propulsion and payload names.
    pub fn parse<S: AsRef<str>>(propulsion: &str, payload: &[S]) -> Result<Self, TrajectoryError> {
        Ok(Self::new(propulsion.parse()?, Payload::parse(payload)?))
    }

    pub fn with_trajectory_type(mut self, trajectory_type: TrajectoryType) -> Self {
        self.trajectory_type = Some(trajectory_type);
        self
    }

    pub fn with_fuel_capacity(mut self, capacity_kg: f64) -> Self {
        self.fuel_capacity_kg = Some(capacity_kg);
        self
    }

    pub fn with_mission_duration(mut self, duration_s: f64) -> Self {
        self.mission_duration_s = Some(duration_s);
        self
    }

    /// Reject non-finite or non-positive optional quantities.
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if let Some(capacity) = self.fuel_capacity_kg {
            if !(capacity.is_finite() && capacity >= 0.0) {
                return Err(TrajectoryError::InvalidMissionConfig(format!(
                    "fuel capacity must be a non-negative mass (got {capacity})"
                )));
            }
        }
        if let Some(duration) = self.mission_duration_s {
            if !positive(duration) {
                return Err(TrajectoryError::InvalidMissionConfig(format!(
                    "mission duration must be positive (got {duration})"
                )));
            }
        }
        Ok(())
    }
}

/// Interceptor estimate together with the body states it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct InterceptPlan {
    pub origin: String,
    pub target: String,
    /// Origin state at the reference instant.
    pub departure_state: StateVector,
    /// Target state at the reference instant plus the flight time.
    pub arrival_state: StateVector,
    pub trajectory: InterceptorTrajectory,
}

/// Estimate an intercept from `origin` (sampled at `reference_ms`) to where `target`
/// will be after the flight time.
///
/// The flight time is `flight_time_s` when given, else the configuration's mission
/// duration, else the Hohmann time of flight between the two bodies' current radii.
pub fn plan_intercept(
    service: &PositionService<'_>,
    estimator: &TrajectoryEstimator,
    origin: &str,
    target: &str,
    reference_ms: f64,
    flight_time_s: Option<f64>,
    config: &MissionConfig,
) -> Result<InterceptPlan, TrajectoryError> {
    config.validate()?;
    let departure_state = service.state_of(origin, reference_ms)?;

    let flight_time = match flight_time_s.or(config.mission_duration_s) {
        Some(seconds) => seconds,
        None => {
            let target_now = service.state_of(target, reference_ms)?;
            estimator.hohmann_flight_time(&departure_state.position_au, &target_now.position_au)?
        }
    };
    if !(flight_time.is_finite() && flight_time > 0.0) {
        return Err(TrajectoryError::InvalidInput(format!(
            "flight time must be positive (got {flight_time})"
        )));
    }

    let arrival_state = service.state_of(target, reference_ms + flight_time * 1_000.0)?;
    let trajectory = estimator.build_trajectory(
        departure_state.position_au,
        arrival_state.position_au,
        flight_time,
        config,
        reference_ms,
    )?;

    let registry = service.registry();
    Ok(InterceptPlan {
        origin: registry.canonical_name(origin).unwrap_or(origin).to_string(),
        target: registry.canonical_name(target).unwrap_or(target).to_string(),
        departure_state,
        arrival_state,
        trajectory,
    })
}
