use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn positions_table_lists_every_builtin_body() {
    Command::cargo_bin("positions")
        .expect("positions bin")
        .args(["--at", "2026-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Positions at 2026-01-01T00:00:00+00:00"))
        .stdout(predicate::str::contains("Earth"))
        .stdout(predicate::str::contains("Neptune"))
        .stdout(predicate::str::contains("Oumuamua"));
}

#[test]
fn positions_json_honours_live_overrides() {
    let dir = tempdir().unwrap();
    let live = dir.path().join("live.json");
    fs::write(&live, r#"{"mars": [1.5, 0.25, 0.0], "Probe": [0.5, 0.5, 0.0]}"#).unwrap();

    let output = Command::cargo_bin("positions")
        .expect("positions bin")
        .args(["--at", "2026-01-01", "--format", "json", "--live"])
        .arg(&live)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let snapshot: serde_json::Value = serde_json::from_slice(&output).expect("json stdout");
    assert_eq!(snapshot["Mars"], serde_json::json!([1.5, 0.25, 0.0]));
    assert_eq!(snapshot["Probe"], serde_json::json!([0.5, 0.5, 0.0]));
    assert!(snapshot["Jupiter"].is_array());
}

#[test]
fn intercept_prints_summary_and_writes_json() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("plan.json");

    Command::cargo_bin("intercept")
        .expect("intercept bin")
        .args([
            "--from",
            "earth",
            "--to",
            "mars",
            "--at",
            "2026-01-01",
            "--days",
            "200",
            "--propulsion",
            "chemical",
            "--payload",
            "camera",
            "spectrometer",
            "--trajectory",
            "rendezvous",
            "--json",
        ])
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Route           : Earth -> Mars"))
        .stdout(predicate::str::contains("Flight time     : 200.00 days"))
        .stdout(predicate::str::contains("Samples         : 101"));

    let plan: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(plan["trajectory"]["trajectory_type"], "rendezvous");
    assert_eq!(plan["trajectory"]["points"].as_array().unwrap().len(), 101);
}

#[test]
fn intercept_rejects_unknown_propulsion() {
    Command::cargo_bin("intercept")
        .expect("intercept bin")
        .args([
            "--from",
            "Earth",
            "--to",
            "Mars",
            "--at",
            "2026-01-01",
            "--propulsion",
            "antimatter",
            "--payload",
            "camera",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("antimatter"));
}

#[test]
fn intercept_rejects_unknown_body() {
    Command::cargo_bin("intercept")
        .expect("intercept bin")
        .args([
            "--from",
            "Earth",
            "--to",
            "Vulcan",
            "--propulsion",
            "ion",
            "--payload",
            "magnetometer",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vulcan"));
}

#[test]
fn custom_bodies_and_settings_are_honoured() {
    let dir = tempdir().unwrap();
    let bodies = dir.path().join("bodies");
    fs::create_dir(&bodies).unwrap();
    fs::write(
        bodies.join("earth.toml"),
        "name = \"Earth\"\na_au = 1.00000261\ne = 0.01671123\ni_deg = 0.0\nomega_deg = 102.93768193\nnode_deg = 0.0\nmean_anomaly_deg = 357.52688973\nepoch_jd = 2451545.0\n",
    )
    .unwrap();
    fs::write(
        bodies.join("ceres.toml"),
        "name = \"Ceres\"\na_au = 2.7675\ne = 0.0758\ni_deg = 10.59\nomega_deg = 73.6\nnode_deg = 80.3\nmean_anomaly_deg = 95.99\nepoch_jd = 2458600.5\n",
    )
    .unwrap();

    let shipped = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs/engine.toml");
    Command::cargo_bin("positions")
        .expect("positions bin")
        .args(["--at", "2026-01-01", "--format", "csv", "--bodies"])
        .arg(&bodies)
        .arg("--settings")
        .arg(&shipped)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("epoch_ms,body,x_au,y_au,z_au,r_au"))
        .stdout(predicate::str::contains("Ceres"))
        .stdout(predicate::str::contains("Mars").not());

    let starved = dir.path().join("starved.toml");
    fs::write(&starved, "[solver]\nmax_iterations = 1\n").unwrap();
    Command::cargo_bin("positions")
        .expect("positions bin")
        .args(["--at", "2026-01-01", "--bodies"])
        .arg(&bodies)
        .arg("--settings")
        .arg(&starved)
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not converge"));
}

#[test]
fn debug_logging_reports_the_snapshot_size() {
    Command::cargo_bin("positions")
        .expect("positions bin")
        .env("RUST_LOG", "debug")
        .args(["--at", "2026-01-01", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("evaluating 9 bodies"));
}
