use std::collections::BTreeMap;
use std::fs;

use interceptor_sim::config::BodyRegistry;
use interceptor_sim::ephemeris::PositionService;
use interceptor_sim::export::{self, positions, trajectory};
use interceptor_sim::transfer::{MissionConfig, TrajectoryEstimator, plan_intercept};
use tempfile::tempdir;

const REFERENCE_MS: f64 = 1_767_225_600_000.0;

#[test]
fn trajectory_csv_has_one_row_per_sample() {
    let registry = BodyRegistry::builtin().unwrap();
    let service = PositionService::new(&registry);
    let mission = MissionConfig::parse("ion", &["camera", "magnetometer"]).unwrap();
    let plan = plan_intercept(
        &service,
        &TrajectoryEstimator::default(),
        "Earth",
        "Mars",
        REFERENCE_MS,
        Some(250.0 * 86_400.0),
        &mission,
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("trajectory.csv");
    {
        let mut writer = export::writer_for_path(&path).unwrap();
        trajectory::write_csv(&mut writer, &plan.trajectory).unwrap();
    }

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "index");
    assert_eq!(&headers[8], "fuel_mass_kg");
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 101);
    let first_fuel: f64 = rows[0][8].parse().unwrap();
    let last_fuel: f64 = rows[100][8].parse().unwrap();
    assert!((first_fuel - plan.trajectory.total_fuel_used_kg).abs() < 1e-6);
    assert!(last_fuel.abs() < 1e-6);
}

#[test]
fn plan_json_round_trips_key_fields() {
    let registry = BodyRegistry::builtin().unwrap();
    let service = PositionService::new(&registry);
    let mission = MissionConfig::parse("chemical", &["impactor"]).unwrap();
    let plan = plan_intercept(
        &service,
        &TrajectoryEstimator::default(),
        "earth",
        "oumuamua",
        REFERENCE_MS,
        None,
        &mission.with_mission_duration(500.0 * 86_400.0),
    )
    .unwrap();

    let mut buffer = Vec::new();
    trajectory::write_json(&mut buffer, &plan).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value["origin"], "Earth");
    assert_eq!(value["target"], "Oumuamua");
    assert_eq!(value["trajectory"]["propulsion"], "chemical");
    assert_eq!(value["trajectory"]["points"].as_array().unwrap().len(), 101);
    let probability = value["trajectory"]["intercept_probability"].as_f64().unwrap();
    assert!((probability - plan.trajectory.intercept_probability).abs() < 1e-12);
}

#[test]
fn position_snapshot_exports() {
    let registry = BodyRegistry::builtin().unwrap();
    let snapshot = PositionService::new(&registry)
        .current_positions(REFERENCE_MS)
        .unwrap();

    let dir = tempdir().unwrap();
    let json_path = dir.path().join("positions.json");
    {
        let mut writer = export::writer_for_path(&json_path).unwrap();
        positions::write_json(&mut writer, &snapshot).unwrap();
    }
    let parsed: BTreeMap<String, [f64; 3]> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.len(), registry.len());
    for (a, b) in parsed["Earth"].iter().zip(snapshot["Earth"]) {
        assert!((a - b).abs() < 1e-12);
    }

    let mut buffer = Vec::new();
    positions::write_csv(&mut buffer, REFERENCE_MS, &snapshot).unwrap();
    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let bodies: Vec<String> = reader
        .records()
        .map(|record| record.unwrap()[1].to_string())
        .collect();
    assert_eq!(bodies.len(), registry.len());
    assert!(bodies.iter().any(|body| body == "Jupiter"));
}
