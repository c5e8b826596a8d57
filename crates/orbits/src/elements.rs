//! Classical orbital elements with the sign-of-`a` orbit family convention.

use serde::Serialize;

use crate::OrbitError;

/// Conic family encoded by the sign of the semi-major axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitFamily {
    /// `a > 0`, `0 <= e < 1`.
    Elliptical,
    /// `a < 0`, `e > 1`.
    Hyperbolic,
}

/// Heliocentric Keplerian elements referred to the ecliptic.
///
/// Angles are stored in degrees and the semi-major axis in AU, signed negative for
/// hyperbolic orbits. Values are validated on construction and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalElements {
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    arg_periapsis_deg: f64,
    ascending_node_deg: f64,
    mean_anomaly_deg: f64,
    epoch_jd: f64,
}

impl OrbitalElements {
    /// Validate and build an element set.
    ///
    /// Fails with [`OrbitError::UnsupportedOrbitType`] for parabolic orbits (`e == 1`) and
    /// [`OrbitError::InvalidOrbitalElements`] for non-finite values, negative eccentricity,
    /// a zero semi-major axis, or a sign of `a` that disagrees with the eccentricity.
    pub fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        arg_periapsis_deg: f64,
        ascending_node_deg: f64,
        mean_anomaly_deg: f64,
        epoch_jd: f64,
    ) -> Result<Self, OrbitError> {
        let named = [
            ("semi-major axis", semi_major_axis_au),
            ("eccentricity", eccentricity),
            ("inclination", inclination_deg),
            ("argument of periapsis", arg_periapsis_deg),
            ("longitude of ascending node", ascending_node_deg),
            ("mean anomaly", mean_anomaly_deg),
            ("epoch", epoch_jd),
        ];
        if let Some((name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbitError::invalid(format!("{name} is not finite ({value})")));
        }
        if eccentricity < 0.0 {
            return Err(OrbitError::invalid(format!(
                "eccentricity must be non-negative (got {eccentricity})"
            )));
        }
        if eccentricity == 1.0 {
            return Err(OrbitError::UnsupportedOrbitType("parabolic orbit (e = 1)"));
        }
        if semi_major_axis_au == 0.0 {
            return Err(OrbitError::invalid("semi-major axis must be non-zero"));
        }
        if (semi_major_axis_au < 0.0) != (eccentricity >= 1.0) {
            return Err(OrbitError::invalid(format!(
                "semi-major axis sign disagrees with eccentricity (a = {semi_major_axis_au}, e = {eccentricity})"
            )));
        }

        Ok(Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            arg_periapsis_deg,
            ascending_node_deg,
            mean_anomaly_deg,
            epoch_jd,
        })
    }

    /// Semi-major axis in AU (negative for hyperbolic orbits).
    pub fn semi_major_axis_au(&self) -> f64 {
        self.semi_major_axis_au
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    /// Argument of periapsis `ω` in degrees.
    pub fn arg_periapsis_deg(&self) -> f64 {
        self.arg_periapsis_deg
    }

    /// Longitude of the ascending node `Ω` in degrees.
    pub fn ascending_node_deg(&self) -> f64 {
        self.ascending_node_deg
    }

    /// Mean anomaly at epoch in degrees.
    pub fn mean_anomaly_deg(&self) -> f64 {
        self.mean_anomaly_deg
    }

    /// Epoch of the element set as a Julian date.
    pub fn epoch_jd(&self) -> f64 {
        self.epoch_jd
    }

    pub fn family(&self) -> OrbitFamily {
        if self.eccentricity < 1.0 {
            OrbitFamily::Elliptical
        } else {
            OrbitFamily::Hyperbolic
        }
    }
}
