//! Configuration models and loaders for the interceptor simulation.
//!
//! Body element sets are read once at start-up into an immutable [`BodyRegistry`];
//! engine tuning lives in [`EngineSettings`].

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use intercept_orbits::{KeplerSolver, OrbitError, OrbitalElements};
use serde::Deserialize;
use thiserror::Error;

const BUILTIN_BODIES: &str = include_str!("../data/bodies.yaml");

/// Orbital element record parsed from body manifests.
///
/// Every field is required, including the mean anomaly at epoch.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    /// Semi-major axis (AU), negative for hyperbolic orbits.
    pub a_au: f64,
    pub e: f64,
    pub i_deg: f64,
    /// Argument of periapsis.
    pub omega_deg: f64,
    /// Longitude of the ascending node.
    pub node_deg: f64,
    pub mean_anomaly_deg: f64,
    pub epoch_jd: f64,
}

impl BodyConfig {
    /// Validate the record into an element set.
    pub fn to_elements(&self) -> Result<OrbitalElements, OrbitError> {
        OrbitalElements::new(
            self.a_au,
            self.e,
            self.i_deg,
            self.omega_deg,
            self.node_deg,
            self.mean_anomaly_deg,
            self.epoch_jd,
        )
    }
}

/// Engine tuning parsed from a TOML settings file.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub solver: SolverSettings,
    pub mission: MissionSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SolverSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let solver = KeplerSolver::default();
        Self {
            tolerance: solver.tolerance,
            max_iterations: solver.max_iterations,
        }
    }
}

impl SolverSettings {
    pub fn to_solver(&self) -> KeplerSolver {
        KeplerSolver::new(self.tolerance, self.max_iterations)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MissionSettings {
    /// Spacecraft bus mass before payload (kg).
    pub base_dry_mass_kg: f64,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            base_dry_mass_kg: 1_000.0,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("body `{name}` has invalid elements: {source}")]
    Elements {
        name: String,
        #[source]
        source: OrbitError,
    },
    #[error("body `{0}` is defined more than once")]
    DuplicateBody(String),
    #[error("body registry is empty")]
    EmptyRegistry,
    #[error("solver settings are out of range: {0}")]
    InvalidSettings(String),
}

/// Immutable name → elements table, looked up case-insensitively.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: BTreeMap<String, (String, OrbitalElements)>,
}

impl BodyRegistry {
    /// Validate records and build the registry; duplicate names (ignoring case) are rejected.
    pub fn from_configs(configs: &[BodyConfig]) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        let mut bodies = BTreeMap::new();
        for config in configs {
            let elements = config.to_elements().map_err(|source| ConfigError::Elements {
                name: config.name.clone(),
                source,
            })?;
            let key = config.name.to_uppercase();
            if bodies.contains_key(&key) {
                return Err(ConfigError::DuplicateBody(config.name.clone()));
            }
            bodies.insert(key, (config.name.clone(), elements));
        }
        log::debug!("body registry initialised with {} bodies", bodies.len());
        Ok(Self { bodies })
    }

    /// Registry bundled with the crate: Mercury through Neptune plus 1I/ʻOumuamua.
    pub fn builtin() -> Result<Self, ConfigError> {
        let configs: Vec<BodyConfig> = serde_yaml::from_str(BUILTIN_BODIES)?;
        Self::from_configs(&configs)
    }

    /// Load body records from `path` (see [`load_bodies`]) and build a registry.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_configs(&load_bodies(path)?)
    }

    pub fn get(&self, name: &str) -> Option<&OrbitalElements> {
        self.bodies.get(&name.to_uppercase()).map(|(_, elements)| elements)
    }

    /// Display name as written in the manifest.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.bodies
            .get(&name.to_uppercase())
            .map(|(display, _)| display.as_str())
    }

    /// Bodies in case-insensitive name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrbitalElements)> {
        self.bodies
            .values()
            .map(|(name, elements)| (name.as_str(), elements))
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Load body configurations from a YAML list, a TOML record, or a directory of TOML records.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load engine settings from a TOML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EngineSettings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let settings: EngineSettings = toml::from_str(&contents)?;
    if !(settings.solver.tolerance.is_finite() && settings.solver.tolerance > 0.0) {
        return Err(ConfigError::InvalidSettings(format!(
            "tolerance must be positive (got {})",
            settings.solver.tolerance
        )));
    }
    if settings.solver.max_iterations == 0 {
        return Err(ConfigError::InvalidSettings(
            "max_iterations must be at least 1".to_string(),
        ));
    }
    if !(settings.mission.base_dry_mass_kg.is_finite() && settings.mission.base_dry_mass_kg > 0.0)
    {
        return Err(ConfigError::InvalidSettings(format!(
            "base_dry_mass_kg must be positive (got {})",
            settings.mission.base_dry_mass_kg
        )));
    }
    Ok(settings)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builtin_registry_contains_planets_and_visitor() {
        let registry = BodyRegistry::builtin().expect("builtin registry");
        assert_eq!(registry.len(), 9);
        assert!(registry.get("earth").is_some());
        assert!(registry.get("MARS").is_some());
        let visitor = registry.get("Oumuamua").expect("interstellar object");
        assert!(visitor.semi_major_axis_au() < 0.0);
        assert_eq!(registry.canonical_name("neptune"), Some("Neptune"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut configs: Vec<BodyConfig> = serde_yaml::from_str(BUILTIN_BODIES).unwrap();
        let mut copy = configs[0].clone();
        copy.name = copy.name.to_lowercase();
        configs.push(copy);
        assert!(matches!(
            BodyRegistry::from_configs(&configs),
            Err(ConfigError::DuplicateBody(_))
        ));
    }

    #[test]
    fn invalid_elements_name_the_body() {
        let configs = vec![BodyConfig {
            name: "Broken".to_string(),
            a_au: -1.0,
            e: 0.5,
            i_deg: 0.0,
            omega_deg: 0.0,
            node_deg: 0.0,
            mean_anomaly_deg: 0.0,
            epoch_jd: 2_451_545.0,
        }];
        let err = BodyRegistry::from_configs(&configs).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn mean_anomaly_is_required() {
        let yaml = "- name: Ceres\n  a_au: 2.77\n  e: 0.0785\n  i_deg: 10.6\n  omega_deg: 73.6\n  node_deg: 80.3\n  epoch_jd: 2451545.0\n";
        assert!(serde_yaml::from_str::<Vec<BodyConfig>>(yaml).is_err());
    }

    #[test]
    fn toml_directory_is_loaded_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b_ceres.toml"),
            "name = \"Ceres\"\na_au = 2.77\ne = 0.0785\ni_deg = 10.6\nomega_deg = 73.6\nnode_deg = 80.3\nmean_anomaly_deg = 95.99\nepoch_jd = 2451545.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a_vesta.toml"),
            "name = \"Vesta\"\na_au = 2.36\ne = 0.089\ni_deg = 7.1\nomega_deg = 151.2\nnode_deg = 103.8\nmean_anomaly_deg = 20.86\nepoch_jd = 2451545.0\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let bodies = load_bodies(dir.path()).unwrap();
        let names: Vec<_> = bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Vesta", "Ceres"]);
    }

    #[test]
    fn settings_default_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "[solver]\nmax_iterations = 50\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.solver.max_iterations, 50);
        assert_eq!(settings.solver.tolerance, 1e-8);
        assert_eq!(settings.mission.base_dry_mass_kg, 1_000.0);

        fs::write(&path, "[solver]\nmax_iterations = 0\n").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::InvalidSettings(_))
        ));
    }
}
