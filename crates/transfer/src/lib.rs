//! Transfer façade crate consolidating interceptor planning and exposing supporting crates.

pub mod mission;

pub use facade::*;
pub use intercept_propulsion as propulsion;

mod facade;
