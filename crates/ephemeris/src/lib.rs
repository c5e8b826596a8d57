//! Heliocentric positions for every registered body at a given instant.
//!
//! The service is a pure function of time and the registry: nothing is cached and
//! nothing is mutated, so it can be called concurrently from any number of threads.

use std::collections::BTreeMap;

use intercept_config::BodyRegistry;
use intercept_core::time::epoch_millis_to_jd;
use intercept_core::vector::{self, Vector3};
use intercept_orbits::{OrbitError, StateVector, StateVectorComputer};
use log::warn;
use thiserror::Error;

/// Body name → heliocentric ecliptic position (AU).
pub type PositionMap = BTreeMap<String, Vector3>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("body `{0}` is not in the registry")]
    UnknownBody(String),
    #[error("failed to propagate `{body}`: {source}")]
    Orbit {
        body: String,
        #[source]
        source: OrbitError,
    },
}

/// Samples a [`BodyRegistry`] through a [`StateVectorComputer`].
#[derive(Debug, Clone, Copy)]
pub struct PositionService<'a> {
    registry: &'a BodyRegistry,
    computer: StateVectorComputer,
}

impl<'a> PositionService<'a> {
    pub fn new(registry: &'a BodyRegistry) -> Self {
        Self::with_computer(registry, StateVectorComputer::default())
    }

    pub fn with_computer(registry: &'a BodyRegistry, computer: StateVectorComputer) -> Self {
        Self { registry, computer }
    }

    pub fn registry(&self) -> &'a BodyRegistry {
        self.registry
    }

    /// Positions (AU) of every registered body at Unix time `epoch_millis`.
    pub fn current_positions(&self, epoch_millis: f64) -> Result<PositionMap, PositionError> {
        let jd = epoch_millis_to_jd(epoch_millis);
        self.registry
            .iter()
            .map(|(name, elements)| {
                let state = self
                    .computer
                    .position_and_velocity_at_time(elements, jd)
                    .map_err(|source| PositionError::Orbit {
                        body: name.to_string(),
                        source,
                    })?;
                Ok((name.to_string(), state.position_au))
            })
            .collect()
    }

    /// Full state vector of one body at Unix time `epoch_millis`.
    pub fn state_of(&self, name: &str, epoch_millis: f64) -> Result<StateVector, PositionError> {
        let elements = self
            .registry
            .get(name)
            .ok_or_else(|| PositionError::UnknownBody(name.to_string()))?;
        self.computer
            .position_and_velocity_at_time(elements, epoch_millis_to_jd(epoch_millis))
            .map_err(|source| PositionError::Orbit {
                body: name.to_string(),
                source,
            })
    }
}

/// Positions of every body in `registry` using default solver settings.
pub fn current_positions(
    registry: &BodyRegistry,
    epoch_millis: f64,
) -> Result<PositionMap, PositionError> {
    PositionService::new(registry).current_positions(epoch_millis)
}

/// Overlay externally fetched positions onto computed ones.
///
/// A finite live position replaces the computed value for the same body (names match
/// case-insensitively); bodies only present in `live` are added. Computed entries are
/// never dropped, and non-finite live values are ignored.
pub fn merge_live_positions(mut computed: PositionMap, live: &PositionMap) -> PositionMap {
    for (name, position) in live {
        if !vector::is_finite(position) {
            warn!("ignoring non-finite live position for `{name}`");
            continue;
        }
        let key = computed
            .keys()
            .find(|existing| existing.eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| name.clone());
        computed.insert(key, *position);
    }
    computed
}
