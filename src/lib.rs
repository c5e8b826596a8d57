//! Orbital-mechanics engine for an interceptor simulation.
//!
//! Bodies are propagated on fixed Keplerian elements and an interceptor estimate is
//! derived between two positions. Each concern lives in its own workspace crate; this
//! façade re-exports them so front-ends (CLI, services) depend on a single package.

pub use intercept_config as config;
pub use intercept_core::{constants, time, units, vector};
pub use intercept_ephemeris as ephemeris;
pub use intercept_export as export;
pub use intercept_orbits as orbits;
pub use intercept_propulsion as propulsion;
pub use intercept_transfer as transfer;
pub use intercept_transfer::mission;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
