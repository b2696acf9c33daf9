//! Integration tests for the skirmish engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use serde_json::Value;

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_skirmish");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start skirmish");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn json(line: &str) -> Value {
    serde_json::from_str(line).unwrap_or_else(|e| panic!("not JSON ({}): {}", e, line))
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_and_malformed_commands_are_ignored() {
    let lines = run_engine(&["foobar", "orders c {}", "state {broken", "resolve", "isready", "quit"]);
    // resolve without a state prints nothing
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn new_match_then_show() {
    let lines = run_engine(&["newmatch", "show", "quit"]);
    assert_eq!(lines.len(), 1);
    let state = json(&lines[0]);
    assert_eq!(state["turn_number"], 0);
    assert_eq!(state["vessel_a"]["position"], serde_json::json!([100.0, 250.0]));
    assert_eq!(state["vessel_b"]["position"], serde_json::json!([900.0, 250.0]));
}

#[test]
fn resolve_with_staged_orders() {
    let lines = run_engine(&[
        "newmatch",
        r#"orders a {"movement":"FORWARD","rotation":"NONE","weapon_action":"LAUNCH_TORPEDO"}"#,
        r#"orders b {"movement":"STOP","rotation":"NONE","weapon_action":"CONFIGURE_FOCUSED"}"#,
        "resolve",
        "quit",
    ]);
    assert_eq!(lines.len(), 1);
    let outcome = json(&lines[0]);
    let state = &outcome["state"];
    assert_eq!(state["turn_number"], 1);
    assert_eq!(state["vessel_b"]["weapon_mode"], "FOCUSED");
    assert_eq!(state["projectiles"][0]["id"], "ship_a_torpedo_1");

    let x = state["vessel_a"]["position"][0].as_f64().unwrap();
    assert!((x - 145.0).abs() < 1e-6, "x = {}", x);

    let kinds: Vec<&str> = outcome["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["torpedo_launched", "phaser_reconfigured"]);
}

#[test]
fn resolve_defaults_missing_orders_and_clears_staged() {
    let lines = run_engine(&[
        "newmatch",
        r#"orders a {"movement":"FORWARD","rotation":"NONE","weapon_action":"MAINTAIN_CONFIG"}"#,
        "resolve",
        "resolve",
        "quit",
    ]);
    assert_eq!(lines.len(), 2);
    let first = json(&lines[0]);
    let second = json(&lines[1]);
    let x1 = first["state"]["vessel_a"]["position"][0].as_f64().unwrap();
    let x2 = second["state"]["vessel_a"]["position"][0].as_f64().unwrap();
    assert!((x1 - 145.0).abs() < 1e-6);
    assert_eq!(x1, x2);
    assert_eq!(second["state"]["turn_number"], 2);
    assert_eq!(first["state"]["vessel_b"]["position"], serde_json::json!([900.0, 250.0]));
}

#[test]
fn state_command_replaces_state() {
    let custom = r#"state {"turn_number":7,"vessel_a":{"position":[0.0,0.0],"velocity":[0.0,0.0],"heading":0.0,"shields":100.0,"energy":100.0,"weapon_mode":"WIDE"},"vessel_b":{"position":[20.0,0.0],"velocity":[0.0,0.0],"heading":3.141592653589793,"shields":100.0,"energy":100.0,"weapon_mode":"WIDE"}}"#;
    let lines = run_engine(&[custom, "resolve", "quit"]);
    assert_eq!(lines.len(), 1);
    let outcome = json(&lines[0]);
    assert_eq!(outcome["state"]["turn_number"], 8);
    let hits = outcome["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["type"] == "phaser_hit")
        .count();
    assert_eq!(hits, 2);
    assert_eq!(outcome["state"]["vessel_a"]["shields"], 85.0);
}

#[test]
fn config_command_loads_parameters() {
    let mut params: Value = serde_json::to_value(skirmish::config::ParameterSet::default()).unwrap();
    params["ship"]["base_speed_units_per_second"] = serde_json::json!(1.0);
    let path = std::env::temp_dir().join(format!("skirmish-it-{}.json", std::process::id()));
    std::fs::write(&path, params.to_string()).unwrap();

    let config_cmd = format!("config {}", path.display());
    let lines = run_engine(&[
        &config_cmd,
        "newmatch",
        r#"orders a {"movement":"FORWARD","rotation":"NONE","weapon_action":"MAINTAIN_CONFIG"}"#,
        "resolve",
        "quit",
    ]);
    let _ = std::fs::remove_file(&path);

    let outcome = json(&lines[0]);
    let x = outcome["state"]["vessel_a"]["position"][0].as_f64().unwrap();
    assert!((x - 115.0).abs() < 1e-6, "x = {}", x);
}

#[test]
fn bad_config_keeps_previous_parameters() {
    let lines = run_engine(&[
        "config /nonexistent/params.json",
        "newmatch",
        "show",
        "quit",
    ]);
    assert_eq!(lines.len(), 1);
    assert_eq!(json(&lines[0])["vessel_a"]["energy"], 100.0);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}
