//! Campus energy simulator entry point: CLI wiring and config-driven engine construction.

use std::path::Path;
use std::process;

use campus_energy_sim::config::ScenarioConfig;
use campus_energy_sim::io::export::export_csv;
use campus_energy_sim::sim::engine::Engine;
use campus_energy_sim::sim::kpi::RunSummary;
use campus_energy_sim::sim::recommend::recommendations;
use campus_energy_sim::sim::types::{EnergyRecord, TickOutput};
use campus_energy_sim::telemetry::init_tracing;
use tracing::info;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    ticks_override: Option<usize>,
    mode_override: Option<String>,
    telemetry_out: Option<String>,
    json: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "api")]
    tick_interval_secs: u64,
}

fn print_help() {
    eprintln!("campus-energy-sim: weather-driven campus renewable energy simulator");
    eprintln!();
    eprintln!("Usage: campus-energy-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --ticks <n>              Override number of ticks");
    eprintln!("  --mode <online|offline>  Override operating mode");
    eprintln!("  --telemetry-out <path>   Export energy records to CSV");
    eprintln!("  --json                   Print results as JSON instead of text");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
        eprintln!("  --tick-interval <secs>   Background tick period while serving (0 = off)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => fail(&format!("{flag} requires {what}")),
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        ticks_override: None,
        mode_override: None,
        telemetry_out: None,
        json: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "api")]
        tick_interval_secs: 0,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(value(&args, i, "--scenario", "a path argument").into());
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(value(&args, i, "--preset", "a name argument").into());
            }
            "--seed" => {
                i += 1;
                let v = value(&args, i, "--seed", "a u64 argument");
                match v.parse::<u64>() {
                    Ok(s) => cli.seed_override = Some(s),
                    Err(_) => fail(&format!("--seed value \"{v}\" is not a valid u64")),
                }
            }
            "--ticks" => {
                i += 1;
                let v = value(&args, i, "--ticks", "a count argument");
                match v.parse::<usize>() {
                    Ok(n) => cli.ticks_override = Some(n),
                    Err(_) => fail(&format!("--ticks value \"{v}\" is not a valid count")),
                }
            }
            "--mode" => {
                i += 1;
                cli.mode_override = Some(value(&args, i, "--mode", "online or offline").into());
            }
            "--telemetry-out" => {
                i += 1;
                cli.telemetry_out =
                    Some(value(&args, i, "--telemetry-out", "a path argument").into());
            }
            "--json" => {
                cli.json = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let v = value(&args, i, "--port", "a u16 argument");
                match v.parse::<u16>() {
                    Ok(p) => cli.port = p,
                    Err(_) => fail(&format!("--port value \"{v}\" is not a valid u16")),
                }
            }
            #[cfg(feature = "api")]
            "--tick-interval" => {
                i += 1;
                let v = value(&args, i, "--tick-interval", "a number of seconds");
                match v.parse::<u64>() {
                    Ok(s) => cli.tick_interval_secs = s,
                    Err(_) => fail(&format!("--tick-interval value \"{v}\" is not valid")),
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn load_scenario(cli: &CliArgs) -> ScenarioConfig {
    // --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(ticks) = cli.ticks_override {
        scenario.simulation.ticks = ticks;
    }
    if let Some(ref mode) = cli.mode_override {
        scenario.simulation.mode = mode.clone();
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario
}

fn print_text(outputs: &[TickOutput], summary: &RunSummary) {
    for out in outputs {
        let marker = if out.fallback { " (fallback)" } else { "" };
        println!("{}{marker}", out.energy_record);
    }

    if let Some(last) = outputs.last() {
        println!("\nRecommendations:");
        for r in recommendations(&last.energy_record, &last.weather_sample, &last.prediction) {
            println!("  [{:?}] {}", r.priority, r.message);
        }
    }

    println!("\n{summary}");
}

fn print_json(outputs: &[TickOutput], summary: &RunSummary) {
    let recs = outputs
        .last()
        .map(|o| recommendations(&o.energy_record, &o.weather_sample, &o.prediction))
        .unwrap_or_default();
    let doc = serde_json::json!({
        "ticks": outputs,
        "recommendations": recs,
        "summary": summary,
    });
    match serde_json::to_string_pretty(&doc) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(&format!("failed to encode JSON: {e}")),
    }
}

fn main() {
    let cli = parse_args();
    let scenario = load_scenario(&cli);

    if let Err(e) = init_tracing(&scenario.logging.level, scenario.logging.json) {
        eprintln!("warning: tracing already initialised: {e}");
    }

    let mut engine = Engine::from_config(&scenario).unwrap_or_else(|e| fail(&e.to_string()));
    info!(
        seed = scenario.simulation.seed,
        ticks = scenario.simulation.ticks,
        mode = %engine.mode(),
        "starting run"
    );

    let outputs = engine.run(scenario.simulation.ticks);
    let records: Vec<EnergyRecord> = outputs.iter().map(|o| o.energy_record.clone()).collect();
    let summary = RunSummary::from_records(&records, engine.clock().step_hours());

    if cli.json {
        print_json(&outputs, &summary);
    } else {
        print_text(&outputs, &summary);
    }

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&records, Path::new(path)) {
            fail(&format!("failed to write CSV: {e}"));
        }
        eprintln!("Telemetry written to {path}");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;
        use std::time::Duration;

        let state = Arc::new(campus_energy_sim::api::AppState::with_history(
            engine,
            outputs,
            campus_energy_sim::api::DEFAULT_HISTORY_CAP,
        ));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let tick_every = (cli.tick_interval_secs > 0)
            .then(|| Duration::from_secs(cli.tick_interval_secs));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(&format!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(campus_energy_sim::api::serve(state, addr, tick_every)) {
            fail(&format!("server error: {e}"));
        }
    }
}
