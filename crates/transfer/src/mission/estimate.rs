//! Scalar heuristics feeding the trajectory estimate.

use intercept_core::constants::{GM_SUN, SECONDS_PER_YEAR};
use intercept_core::vector::{self, Vector3};
use intercept_orbits::hohmann;
use intercept_propulsion::PropulsionType;

use super::TrajectoryError;

const BASE_PROBABILITY: f64 = 0.85;
const MIN_PROBABILITY: f64 = 0.10;
const MAX_PROBABILITY: f64 = 0.99;

/// Delta-v (m/s) between two heliocentric positions given in metres.
///
/// Average-radius heuristic: a transfer ellipse with `a = (|r1| + |r2|) / 2` is compared
/// against circular speed at each end. Transfer orientation and phasing are ignored,
/// so this is not a Lambert solution.
pub fn estimate_delta_v(r1_m: &Vector3, r2_m: &Vector3) -> Result<f64, TrajectoryError> {
    let (r1, r2) = (vector::norm(r1_m), vector::norm(r2_m));
    hohmann(r1, r2, GM_SUN)
        .map(|transfer| transfer.dv_total_m_s)
        .ok_or_else(|| {
            TrajectoryError::InvalidInput(format!(
                "delta-v estimate needs finite, non-zero radii (|r1| = {r1} m, |r2| = {r2} m)"
            ))
        })
}

/// Heuristic likelihood in `[0.10, 0.99]` that the interceptor reaches its target.
///
/// Starts at 0.85 and is discounted for large delta-v, long flights, and by the
/// propulsion reliability factor. A NaN delta-v or flight time takes the harshest
/// discount for that term.
pub fn intercept_probability(
    delta_v_m_s: f64,
    flight_time_s: f64,
    propulsion: PropulsionType,
) -> f64 {
    let worst_if_nan = |v: f64| if v.is_nan() { f64::INFINITY } else { v };
    let delta_v = worst_if_nan(delta_v_m_s);
    let flight_time = worst_if_nan(flight_time_s);
    let mut probability = BASE_PROBABILITY;

    if delta_v > 15_000.0 {
        probability *= 0.7;
    } else if delta_v > 10_000.0 {
        probability *= 0.85;
    }

    if flight_time > 2.0 * SECONDS_PER_YEAR {
        probability *= 0.8;
    } else if flight_time > SECONDS_PER_YEAR {
        probability *= 0.9;
    }

    probability *= propulsion.reliability_factor();
    probability.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}
