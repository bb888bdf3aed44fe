//! Runs the binary against the bundled scenario files.

use std::process::Command;

#[derive(Debug)]
struct Summary {
    solar_kwh: f64,
    demand_kwh: f64,
    renewable_share_pct: f64,
}

#[test]
fn scenarios_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse_summary("scenarios/baseline.toml");
    let summer = run_and_parse_summary("scenarios/summer_peak.toml");
    let winter = run_and_parse_summary("scenarios/winter.toml");

    assert!(
        summer.demand_kwh > baseline.demand_kwh,
        "expected summer demand above baseline: summer={:.2}, baseline={:.2}",
        summer.demand_kwh,
        baseline.demand_kwh
    );
    assert!(
        (baseline.solar_kwh - winter.solar_kwh).abs() > 1.0,
        "expected baseline and winter solar to differ: baseline={:.2}, winter={:.2}",
        baseline.solar_kwh,
        winter.solar_kwh
    );
    for s in [&baseline, &summer, &winter] {
        assert!(s.renewable_share_pct.is_finite() && s.renewable_share_pct >= 0.0);
    }
}

#[test]
fn offline_scenario_emits_sensor_samples_as_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_campus-energy-sim"))
        .args(["--scenario", "scenarios/monsoon_offline.toml", "--ticks", "4", "--json"])
        .output()
        .expect("campus-energy-sim process should run");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let doc: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let ticks = doc["ticks"].as_array().expect("ticks array");
    assert_eq!(ticks.len(), 4);
    assert!(ticks.iter().all(|t| t["sensorSample"].is_object()));
    assert!(doc["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
    assert_eq!(doc["summary"]["ticks"], 4);
}

#[test]
fn invalid_mode_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_campus-energy-sim"))
        .args(["--preset", "baseline", "--mode", "hybrid"])
        .output()
        .expect("campus-energy-sim process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("simulation.mode"));
}

#[test]
fn telemetry_out_writes_csv() {
    let path = std::env::temp_dir().join(format!("campus-cli-{}.csv", std::process::id()));
    let output = Command::new(env!("CARGO_BIN_EXE_campus-energy-sim"))
        .args(["--preset", "winter", "--ticks", "6", "--telemetry-out"])
        .arg(&path)
        .output()
        .expect("campus-energy-sim process should run");
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&path).expect("csv written");
    let _ = std::fs::remove_file(&path);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some(
            "timestamp,solar_gen_kw,wind_gen_kw,load_demand_kw,battery_soc_percent,\
             grid_import_kw,grid_export_kw,weather,forecast,temperature,carbon_saved_kg"
        )
    );
    assert_eq!(lines.count(), 6);
}

fn run_and_parse_summary(path: &str) -> Summary {
    let output = Command::new(env!("CARGO_BIN_EXE_campus-energy-sim"))
        .args(["--scenario", path])
        .output()
        .expect("campus-energy-sim process should run");

    assert!(
        output.status.success(),
        "scenario run failed for {path}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    Summary {
        solar_kwh: parse_metric(&stdout, "Solar energy:", "kWh"),
        demand_kwh: parse_metric(&stdout, "Campus demand:", "kWh"),
        renewable_share_pct: parse_metric(&stdout, "Renewable share:", "%"),
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing summary line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid summary format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from summary line `{line}`"))
}
