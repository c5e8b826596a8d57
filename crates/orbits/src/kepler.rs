//! Newton–Raphson solvers for Kepler's equation.

use log::debug;

use intercept_core::units::au_to_m;

use crate::OrbitError;

/// Iteration settings shared by the elliptical and hyperbolic solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    /// Convergence threshold on the Newton step `|ΔE|` (radians).
    pub tolerance: f64,
    /// Upper bound on Newton iterations before reporting divergence.
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 500,
        }
    }
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Solve `E - e·sin E = M` for the eccentric anomaly, seeded at `E₀ = M`.
    ///
    /// Converges when the Newton step falls below [`KeplerSolver::tolerance`]; exceeding
    /// [`KeplerSolver::max_iterations`] yields [`OrbitError::NumericalDivergence`].
    ///
    /// Requires `0 <= e < 1`.
    pub fn solve_elliptical(&self, mean_anomaly_rad: f64, e: f64) -> Result<f64, OrbitError> {
        if !mean_anomaly_rad.is_finite() || !e.is_finite() {
            return Err(OrbitError::invalid("mean anomaly and eccentricity must be finite"));
        }
        if !(0.0..1.0).contains(&e) {
            return Err(OrbitError::invalid(format!(
                "elliptical solver requires 0 <= e < 1 (got {e})"
            )));
        }
        // |E - M| = e·|sin E| <= e
        let bracket = (mean_anomaly_rad - e, mean_anomaly_rad + e);
        self.newton("elliptical", mean_anomaly_rad, mean_anomaly_rad, bracket, |ecc| {
            let f = ecc - e * ecc.sin() - mean_anomaly_rad;
            let f_prime = 1.0 - e * ecc.cos();
            (f, f_prime)
        })
    }

    /// Solve `e·sinh H - H = M` for the hyperbolic anomaly, seeded at `H₀ = asinh(M / e)`.
    ///
    /// The seed tracks the logarithmic growth of the root, so large `|M|` converges in a
    /// handful of Newton steps instead of crawling down the exponential.
    ///
    /// Requires `e > 1`; `e == 1` is reported as an unsupported (parabolic) orbit.
    pub fn solve_hyperbolic(&self, mean_anomaly_rad: f64, e: f64) -> Result<f64, OrbitError> {
        if !mean_anomaly_rad.is_finite() || !e.is_finite() {
            return Err(OrbitError::invalid("mean anomaly and eccentricity must be finite"));
        }
        if e == 1.0 {
            return Err(OrbitError::UnsupportedOrbitType("parabolic orbit (e = 1)"));
        }
        if e < 1.0 {
            return Err(OrbitError::invalid(format!(
                "hyperbolic solver requires e > 1 (got {e})"
            )));
        }
        // e·sinh H - H >= (e - 1)·H for H >= 0, and the equation is odd in (H, M)
        let bound = mean_anomaly_rad / (e - 1.0);
        let bracket = (bound.min(0.0), bound.max(0.0));
        let seed = (mean_anomaly_rad / e).asinh();
        self.newton("hyperbolic", mean_anomaly_rad, seed, bracket, |h| {
            let f = e * h.sinh() - h - mean_anomaly_rad;
            let f_prime = e * h.cosh() - 1.0;
            (f, f_prime)
        })
    }

    /// Newton–Raphson on a strictly increasing `f`, safeguarded by the root bracket
    /// `[lo, hi]`: an iterate that would leave the bracket is replaced by bisection.
    /// The seed is clamped into the bracket.
    fn newton<F>(
        &self,
        solver: &'static str,
        mean_anomaly_rad: f64,
        seed: f64,
        bracket: (f64, f64),
        eval: F,
    ) -> Result<f64, OrbitError>
    where
        F: Fn(f64) -> (f64, f64),
    {
        let diverged = || OrbitError::NumericalDivergence {
            solver,
            iterations: self.max_iterations,
            mean_anomaly_rad,
        };

        let (mut lo, mut hi) = bracket;
        let mut anomaly = seed.clamp(lo, hi);
        for iteration in 1..=self.max_iterations {
            let (f, f_prime) = eval(anomaly);
            if f < 0.0 {
                lo = anomaly;
            } else {
                hi = anomaly;
            }
            let mut next = anomaly - f / f_prime;
            if !(next >= lo && next <= hi) {
                next = 0.5 * (lo + hi);
            }
            let step = next - anomaly;
            anomaly = next;
            if !anomaly.is_finite() {
                return Err(diverged());
            }
            if step.abs() < self.tolerance {
                debug!("{solver} Kepler solve converged in {iteration} iterations (M = {mean_anomaly_rad})");
                return Ok(anomaly);
            }
        }
        Err(diverged())
    }
}

/// Mean motion `n = √(G·M / a³)` in rad/s for a semi-major axis in AU.
///
/// Hyperbolic orbits carry a negative `a`; the magnitude is used so both families
/// share the same mean-anomaly clock.
pub fn mean_motion(semi_major_axis_au: f64, central_mass_kg: f64) -> f64 {
    let a_m = au_to_m(semi_major_axis_au.abs());
    (intercept_core::constants::G * central_mass_kg / a_m.powi(3)).sqrt()
}
