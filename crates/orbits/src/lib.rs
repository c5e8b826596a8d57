//! Keplerian orbit propagation for heliocentric bodies.
//!
//! Bodies move independently on fixed two-body elements; there is no mutual
//! gravitation. Results are simulation-quality approximations, not ephemerides.

pub mod anomaly;
pub mod elements;
pub mod kepler;
pub mod state;
pub mod transfers;

use thiserror::Error;

pub use anomaly::{true_anomaly_from_eccentric, true_anomaly_from_hyperbolic};
pub use elements::{OrbitFamily, OrbitalElements};
pub use kepler::{KeplerSolver, mean_motion};
pub use state::{
    PerifocalState, StateVector, StateVectorComputer, ecliptic_transform, orbital_plane_state,
    position_and_velocity_at_time,
};
pub use transfers::{HohmannResult, hohmann};

/// Failures raised while validating elements or propagating an orbit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("invalid orbital elements: {reason}")]
    InvalidOrbitalElements { reason: String },
    #[error("{solver} solver did not converge within {iterations} iterations (M = {mean_anomaly_rad} rad)")]
    NumericalDivergence {
        solver: &'static str,
        iterations: usize,
        mean_anomaly_rad: f64,
    },
    #[error("unsupported orbit type: {0}")]
    UnsupportedOrbitType(&'static str),
}

impl OrbitError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        OrbitError::InvalidOrbitalElements {
            reason: reason.into(),
        }
    }
}
