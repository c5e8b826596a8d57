//! Eccentric / hyperbolic anomaly to true anomaly conversions.

use crate::OrbitError;

/// True anomaly from the eccentric anomaly of an elliptical orbit (`0 <= e < 1`).
///
/// Uses the half-angle `atan2` form so the quadrant is preserved.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    if !eccentric_anomaly.is_finite() || !(0.0..1.0).contains(&e) {
        return Err(OrbitError::invalid(format!(
            "eccentric anomaly conversion requires finite E and 0 <= e < 1 (E = {eccentric_anomaly}, e = {e})"
        )));
    }
    let half = eccentric_anomaly / 2.0;
    let y = (1.0 + e).sqrt() * half.sin();
    let x = (1.0 - e).sqrt() * half.cos();
    Ok(2.0 * y.atan2(x))
}

/// True anomaly from the hyperbolic anomaly of an open orbit (`e > 1`).
pub fn true_anomaly_from_hyperbolic(hyperbolic_anomaly: f64, e: f64) -> Result<f64, OrbitError> {
    if e == 1.0 {
        return Err(OrbitError::UnsupportedOrbitType("parabolic orbit (e = 1)"));
    }
    if !hyperbolic_anomaly.is_finite() || !e.is_finite() || e < 1.0 {
        return Err(OrbitError::invalid(format!(
            "hyperbolic anomaly conversion requires finite H and e > 1 (H = {hyperbolic_anomaly}, e = {e})"
        )));
    }
    let factor = ((e + 1.0) / (e - 1.0)).sqrt();
    Ok(2.0 * (factor * (hyperbolic_anomaly / 2.0).tanh()).atan())
}
