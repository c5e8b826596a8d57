//! Propulsion descriptors, payload catalogue, and Tsiolkovsky sizing.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use intercept_core::constants::G0;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while interpreting mission hardware choices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropulsionError {
    #[error("unknown propulsion type `{0}` (expected chemical, ion, or nuclear)")]
    UnknownPropulsion(String),
    #[error("unknown payload item `{0}`")]
    UnknownPayload(String),
    #[error("payload item `{0}` listed more than once")]
    DuplicatePayload(String),
    #[error("payload set is empty")]
    EmptyPayload,
}

/// Propulsion families supported by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropulsionType {
    Chemical,
    Ion,
    Nuclear,
}

impl PropulsionType {
    pub const ALL: [PropulsionType; 3] = [
        PropulsionType::Chemical,
        PropulsionType::Ion,
        PropulsionType::Nuclear,
    ];

    /// Specific impulse in seconds.
    pub fn isp_seconds(self) -> f64 {
        match self {
            PropulsionType::Chemical => 450.0,
            PropulsionType::Ion => 3_000.0,
            PropulsionType::Nuclear => 900.0,
        }
    }

    /// Multiplier applied to the intercept-success heuristic.
    pub fn reliability_factor(self) -> f64 {
        match self {
            PropulsionType::Chemical => 0.9,
            PropulsionType::Ion => 0.95,
            PropulsionType::Nuclear => 0.85,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropulsionType::Chemical => "chemical",
            PropulsionType::Ion => "ion",
            PropulsionType::Nuclear => "nuclear",
        }
    }
}

impl fmt::Display for PropulsionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropulsionType {
    type Err = PropulsionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chemical" => Ok(PropulsionType::Chemical),
            "ion" => Ok(PropulsionType::Ion),
            "nuclear" => Ok(PropulsionType::Nuclear),
            _ => Err(PropulsionError::UnknownPropulsion(s.to_string())),
        }
    }
}

/// Instruments and hardware that can ride on the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadItem {
    Camera,
    Spectrometer,
    Magnetometer,
    DustAnalyzer,
    Impactor,
    SampleReturn,
}

impl PayloadItem {
    pub fn mass_kg(self) -> f64 {
        match self {
            PayloadItem::Camera => 25.0,
            PayloadItem::Spectrometer => 40.0,
            PayloadItem::Magnetometer => 8.0,
            PayloadItem::DustAnalyzer => 15.0,
            PayloadItem::Impactor => 350.0,
            PayloadItem::SampleReturn => 450.0,
        }
    }
}

impl FromStr for PayloadItem {
    type Err = PropulsionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "camera" => Ok(PayloadItem::Camera),
            "spectrometer" => Ok(PayloadItem::Spectrometer),
            "magnetometer" => Ok(PayloadItem::Magnetometer),
            "dust_analyzer" => Ok(PayloadItem::DustAnalyzer),
            "impactor" => Ok(PayloadItem::Impactor),
            "sample_return" => Ok(PayloadItem::SampleReturn),
            _ => Err(PropulsionError::UnknownPayload(s.to_string())),
        }
    }
}

/// Non-empty set of distinct payload items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    items: BTreeSet<PayloadItem>,
}

impl Payload {
    pub fn new<I>(items: I) -> Result<Self, PropulsionError>
    where
        I: IntoIterator<Item = PayloadItem>,
    {
        let mut set = BTreeSet::new();
        for item in items {
            if !set.insert(item) {
                return Err(PropulsionError::DuplicatePayload(format!("{item:?}")));
            }
        }
        if set.is_empty() {
            return Err(PropulsionError::EmptyPayload);
        }
        Ok(Self { items: set })
    }

    /// Parse item names such as `camera` or `dust_analyzer`.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, PropulsionError> {
        let items = names
            .iter()
            .map(|name| name.as_ref().parse::<PayloadItem>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(items)
    }

    pub fn items(&self) -> impl Iterator<Item = PayloadItem> + '_ {
        self.items.iter().copied()
    }

    pub fn mass_kg(&self) -> f64 {
        self.items().map(PayloadItem::mass_kg).sum()
    }
}

/// Propellant mass for a burn of `delta_v_m_s` from the rocket equation.
///
/// `fuel = dry · (exp(Δv / (Isp · g0)) - 1)` with `g0 = 9.81 m/s²`.
///
/// Inputs must be finite with `Δv >= 0`, `Isp > 0` and `dry >= 0`; anything else
/// yields `NaN` rather than a plausible-looking mass.
pub fn fuel_mass(delta_v_m_s: f64, isp_seconds: f64, dry_mass_kg: f64) -> f64 {
    let valid = delta_v_m_s.is_finite()
        && delta_v_m_s >= 0.0
        && isp_seconds.is_finite()
        && isp_seconds > 0.0
        && dry_mass_kg.is_finite()
        && dry_mass_kg >= 0.0;
    if !valid {
        return f64::NAN;
    }
    let exhaust_velocity = isp_seconds * G0;
    dry_mass_kg * ((delta_v_m_s / exhaust_velocity).exp() - 1.0)
}
