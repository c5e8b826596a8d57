//! Core units, constants, and shared primitives for the interceptor simulation workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian constant of gravitation (m³/(kg·s²)).
    pub const G: f64 = 6.674_30e-11;
    /// Mass of the Sun (kg).
    pub const M_SUN: f64 = 1.989e30;
    /// Heliocentric gravitational parameter derived from `G · M_SUN` (m³/s²).
    pub const GM_SUN: f64 = G * M_SUN;
    /// Standard gravity used by the rocket equation (m/s²).
    pub const G0: f64 = 9.81;
    /// Metres per astronomical unit.
    pub const AU_M: f64 = 1.495_978_707e11;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Milliseconds per Julian day.
    pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
    /// Days per Julian year.
    pub const DAYS_PER_YEAR: f64 = 365.25;
    /// Seconds per Julian year.
    pub const SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * SECONDS_PER_DAY;
    /// Julian date of the Unix epoch (1970-01-01T00:00:00Z).
    pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
    /// Julian date of J2000.0.
    pub const J2000_JD: f64 = 2_451_545.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::AU_M;

    /// Convert astronomical units to metres.
    #[inline]
    pub fn au_to_m(v: f64) -> f64 {
        v * AU_M
    }

    /// Convert metres to astronomical units.
    #[inline]
    pub fn m_to_au(v: f64) -> f64 {
        v / AU_M
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{MILLIS_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD};

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Convert Unix epoch milliseconds to a Julian date.
    #[inline]
    pub fn epoch_millis_to_jd(ms: f64) -> f64 {
        ms / MILLIS_PER_DAY + UNIX_EPOCH_JD
    }

    /// Convert a Julian date to Unix epoch milliseconds.
    #[inline]
    pub fn jd_to_epoch_millis(jd: f64) -> f64 {
        (jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU, metres, or km/s depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Linear interpolation `a + (b - a) * t`.
    #[inline]
    pub fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
        add(a, &scale(&sub(b, a), t))
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_maps_to_reference_julian_date() {
        assert_eq!(time::epoch_millis_to_jd(0.0), constants::UNIX_EPOCH_JD);
        let jd = time::epoch_millis_to_jd(946_728_000_000.0);
        assert!((jd - constants::J2000_JD).abs() < 1e-9);
        assert!((time::jd_to_epoch_millis(jd) - 946_728_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = [1.0, 2.0, 3.0];
        let b = [3.0, -2.0, 0.0];
        assert_eq!(vector::lerp(&a, &b, 0.0), a);
        assert_eq!(vector::lerp(&a, &b, 1.0), b);
        assert_eq!(vector::lerp(&a, &b, 0.5), [2.0, 0.0, 1.5]);
    }
}
