//! Perifocal state evaluation and rotation into the heliocentric ecliptic frame.
//!
//! Velocities use `v = h/r · (-sin ν, e + cos ν)`. The exact two-body expression is
//! `μ/h · (-sin ν, e + cos ν)`, so speeds are off by a factor `(1 + e·cos ν)`; the
//! error vanishes for circular orbits and grows with eccentricity. Hyperbolic bodies
//! reuse the same expressions with the semi-latus rectum `|a|·|1 - e²|`, which keeps
//! the conic radius exact but inherits the velocity approximation. Downstream consumers
//! should treat hyperbolic velocities as indicative only.

use std::f64::consts::TAU;

use log::debug;
use serde::Serialize;

use intercept_core::constants::{G, M_SUN, SECONDS_PER_DAY};
use intercept_core::units::{au_to_m, m_to_au, ms_to_kms};
use intercept_core::vector::{self, Vector3};

use crate::anomaly::{true_anomaly_from_eccentric, true_anomaly_from_hyperbolic};
use crate::elements::{OrbitFamily, OrbitalElements};
use crate::kepler::{KeplerSolver, mean_motion};
use crate::OrbitError;

/// Heliocentric ecliptic position (AU) and velocity (km/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub position_au: Vector3,
    pub velocity_km_s: Vector3,
}

/// In-plane coordinates with the x-axis toward periapsis (metres, m/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerifocalState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// Evaluates element sets at arbitrary instants around a single central body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVectorComputer {
    pub solver: KeplerSolver,
    pub central_mass_kg: f64,
}

impl Default for StateVectorComputer {
    fn default() -> Self {
        Self {
            solver: KeplerSolver::default(),
            central_mass_kg: M_SUN,
        }
    }
}

impl StateVectorComputer {
    pub fn new(solver: KeplerSolver) -> Self {
        Self {
            solver,
            ..Self::default()
        }
    }

    /// Gravitational parameter of the central body (m³/s²).
    pub fn gm(&self) -> f64 {
        G * self.central_mass_kg
    }

    /// Position and velocity in the orbital plane for true anomaly `nu` (radians).
    pub fn orbital_plane_state(&self, elements: &OrbitalElements, nu: f64) -> PerifocalState {
        let e = elements.eccentricity();
        let a_m = au_to_m(elements.semi_major_axis_au().abs());
        let semi_latus = a_m * (1.0 - e * e).abs();
        let (sin_nu, cos_nu) = nu.sin_cos();

        let r = semi_latus / (1.0 + e * cos_nu);
        let h = (self.gm() * semi_latus).sqrt();

        PerifocalState {
            x: r * cos_nu,
            y: r * sin_nu,
            vx: -h * sin_nu / r,
            vy: h * (e + cos_nu) / r,
        }
    }

    /// True anomaly (radians) reached `dt_seconds` after the element epoch.
    pub fn true_anomaly_after(
        &self,
        elements: &OrbitalElements,
        dt_seconds: f64,
    ) -> Result<f64, OrbitError> {
        let e = elements.eccentricity();
        let n = mean_motion(elements.semi_major_axis_au(), self.central_mass_kg);
        let mean_anomaly = elements.mean_anomaly_deg().to_radians() + n * dt_seconds;

        match elements.family() {
            OrbitFamily::Elliptical => {
                let m = mean_anomaly.rem_euclid(TAU);
                let ecc = self.solver.solve_elliptical(m, e)?;
                true_anomaly_from_eccentric(ecc, e)
            }
            OrbitFamily::Hyperbolic => {
                let h = self.solver.solve_hyperbolic(mean_anomaly, e)?;
                true_anomaly_from_hyperbolic(h, e)
            }
        }
    }

    /// Heliocentric ecliptic state of `elements` at `julian_date`.
    pub fn position_and_velocity_at_time(
        &self,
        elements: &OrbitalElements,
        julian_date: f64,
    ) -> Result<StateVector, OrbitError> {
        if !julian_date.is_finite() {
            return Err(OrbitError::invalid(format!(
                "julian date is not finite ({julian_date})"
            )));
        }
        let dt = (julian_date - elements.epoch_jd()) * SECONDS_PER_DAY;
        let nu = self.true_anomaly_after(elements, dt)?;
        let plane = self.orbital_plane_state(elements, nu);

        let position_m = ecliptic_transform(plane.x, plane.y, 0.0, elements);
        let velocity_m_s = ecliptic_transform(plane.vx, plane.vy, 0.0, elements);

        let state = StateVector {
            position_au: position_m.map(m_to_au),
            velocity_km_s: velocity_m_s.map(ms_to_kms),
        };
        if !vector::is_finite(&state.position_au) || !vector::is_finite(&state.velocity_km_s) {
            return Err(OrbitError::invalid(format!(
                "elements produced a non-finite state at JD {julian_date}"
            )));
        }
        debug!(
            "state at JD {julian_date}: nu = {nu:.6} rad, r = {:.6} AU",
            vector::norm(&state.position_au)
        );
        Ok(state)
    }
}

/// Rotate perifocal coordinates into the ecliptic frame via `Rz(Ω)·Rx(i)·Rz(ω)`.
pub fn ecliptic_transform(x: f64, y: f64, z: f64, elements: &OrbitalElements) -> Vector3 {
    let (sin_node, cos_node) = elements.ascending_node_deg().to_radians().sin_cos();
    let (sin_argp, cos_argp) = elements.arg_periapsis_deg().to_radians().sin_cos();
    let (sin_inc, cos_inc) = elements.inclination_deg().to_radians().sin_cos();

    let big_x = (cos_node * cos_argp - sin_node * sin_argp * cos_inc) * x
        + (-cos_node * sin_argp - sin_node * cos_argp * cos_inc) * y
        + (sin_node * sin_inc) * z;
    let big_y = (sin_node * cos_argp + cos_node * sin_argp * cos_inc) * x
        + (-sin_node * sin_argp + cos_node * cos_argp * cos_inc) * y
        + (-cos_node * sin_inc) * z;
    let big_z = (sin_argp * sin_inc) * x + (cos_argp * sin_inc) * y + cos_inc * z;

    [big_x, big_y, big_z]
}

/// Perifocal state around the Sun with default solver settings.
pub fn orbital_plane_state(elements: &OrbitalElements, nu: f64) -> PerifocalState {
    StateVectorComputer::default().orbital_plane_state(elements, nu)
}

/// Heliocentric ecliptic state around the Sun with default solver settings.
pub fn position_and_velocity_at_time(
    elements: &OrbitalElements,
    julian_date: f64,
) -> Result<StateVector, OrbitError> {
    StateVectorComputer::default().position_and_velocity_at_time(elements, julian_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intercept_core::constants::J2000_JD;
    use std::f64::consts::FRAC_PI_2;

    fn planar(a: f64, e: f64) -> OrbitalElements {
        OrbitalElements::new(a, e, 0.0, 0.0, 0.0, 0.0, J2000_JD).unwrap()
    }

    #[test]
    fn zero_angles_leave_perifocal_vector_untouched() {
        let elements = planar(1.0, 0.1);
        assert_eq!(ecliptic_transform(1.0, 2.0, 3.0, &elements), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn node_rotation_turns_x_into_y() {
        let elements = OrbitalElements::new(1.0, 0.1, 0.0, 0.0, 90.0, 0.0, J2000_JD).unwrap();
        let [x, y, z] = ecliptic_transform(1.0, 0.0, 0.0, &elements);
        assert!(x.abs() < 1e-15);
        assert!((y - 1.0).abs() < 1e-15);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn inclination_lifts_periapsis_direction_out_of_plane() {
        let elements = OrbitalElements::new(1.0, 0.1, 90.0, 90.0, 0.0, 0.0, J2000_JD).unwrap();
        let [x, y, z] = ecliptic_transform(1.0, 0.0, 0.0, &elements);
        assert!(x.abs() < 1e-15 && y.abs() < 1e-15);
        assert!((z - 1.0).abs() < 1e-15);
    }

    type Matrix = [[f64; 3]; 3];

    fn rot_z(angle_deg: f64) -> Matrix {
        let (s, c) = angle_deg.to_radians().sin_cos();
        [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
    }

    fn rot_x(angle_deg: f64) -> Matrix {
        let (s, c) = angle_deg.to_radians().sin_cos();
        [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
    }

    fn mul(a: &Matrix, b: &Matrix) -> Matrix {
        let mut out = [[0.0; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[row][k] * b[k][col]).sum();
            }
        }
        out
    }

    #[test]
    fn generic_angles_match_matrix_product() {
        let (inc, argp, node) = (23.0, 71.0, 137.0);
        let elements = OrbitalElements::new(1.0, 0.1, inc, argp, node, 0.0, J2000_JD).unwrap();
        let rotation = mul(&mul(&rot_z(node), &rot_x(inc)), &rot_z(argp));

        for v in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.3, -1.7, 0.9]] {
            let got = ecliptic_transform(v[0], v[1], v[2], &elements);
            for (row, value) in got.iter().enumerate() {
                let expected: f64 = (0..3).map(|k| rotation[row][k] * v[k]).sum();
                assert!((value - expected).abs() < 1e-12, "v={v:?} row={row}");
            }
            assert!((vector::norm(&got) - vector::norm(&v)).abs() < 1e-12);
        }
    }

    #[test]
    fn periapsis_radius_matches_conic() {
        let elements = planar(2.0, 0.25);
        let plane = orbital_plane_state(&elements, 0.0);
        let expected = au_to_m(2.0) * 0.75;
        assert!((plane.x - expected).abs() / expected < 1e-12);
        assert_eq!(plane.y, 0.0);
        assert!(plane.vy > 0.0);
    }

    #[test]
    fn hyperbolic_periapsis_sits_at_perihelion_distance() {
        let elements = planar(-1.0, 1.5);
        let plane = orbital_plane_state(&elements, 0.0);
        let q = au_to_m(1.0) * 0.5;
        assert!((plane.x - q).abs() / q < 1e-12);
        let side = orbital_plane_state(&elements, FRAC_PI_2);
        assert!(side.y > 0.0 && side.vx.is_finite() && side.vy.is_finite());
    }

    #[test]
    fn state_at_epoch_from_periapsis() {
        let elements = planar(1.0, 0.0);
        let state = position_and_velocity_at_time(&elements, J2000_JD).unwrap();
        assert!((state.position_au[0] - 1.0).abs() < 1e-12);
        assert!(state.position_au[1].abs() < 1e-12);
        // circular speed at 1 AU ≈ 29.8 km/s
        assert!((state.velocity_km_s[1] - 29.8).abs() < 0.2);
    }

    #[test]
    fn non_finite_instant_is_rejected() {
        let elements = planar(1.0, 0.0);
        assert!(position_and_velocity_at_time(&elements, f64::NAN).is_err());
    }
}
