//! Skirmish -- a turn resolution engine for two-vessel arena combat.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one JSON document per line. Diagnostics go to stderr.

use std::io::{self, BufRead};

use tracing::{error, warn};

use skirmish::engine::Engine;
use skirmish::logging::init_tracing;
use skirmish::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::default();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result = match cmd {
            Command::Config { path } => engine.load_config(&path),
            Command::NewMatch => {
                engine.new_match();
                Ok(())
            }
            Command::State { json } => engine.set_state(&json),
            Command::Orders { side, json } => engine.stage_orders(side, &json),
            Command::Resolve => engine.handle_resolve(&mut out),
            Command::Show => engine.handle_show(&mut out),
            Command::IsReady => engine.handle_isready(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = result {
            warn!(error = %e, "command failed");
        }
    }
}
