//! Scripted match CLI.
//!
//! Plays matches between built-in strategies and outputs transcripts as JSONL.
//!
//! Usage:
//!   cargo run --release --bin showcase -- [OPTIONS]
//!
//! Options:
//!   --matches N      Number of matches to play (default: 4)
//!   --max-turns N    Turn limit per match (default: 40)
//!   --a NAME         Strategy for ship_a (default: aggressive)
//!   --b NAME         Strategy for ship_b (default: defensive)
//!   --config FILE    Parameter file (default: built-in parameters)
//!   --threads N      Number of parallel threads (default: 1)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --timeout-ms N   Per-side limit for producing orders (default: 30000)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress per-match and summary logging

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{error, info};

use skirmish::arena::{self, MatchConfig, Strategy};
use skirmish::config::ParameterSet;
use skirmish::logging::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config = MatchConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--matches" => config.num_matches = value(&args, &mut i),
            "--max-turns" => config.max_turns = value(&args, &mut i),
            "--threads" => config.threads = value(&args, &mut i),
            "--seed" => config.seed = value(&args, &mut i),
            "--timeout-ms" => config.order_timeout = Duration::from_millis(value(&args, &mut i)),
            "--a" => config.strategy_a = strategy(&args, &mut i),
            "--b" => config.strategy_b = strategy(&args, &mut i),
            "--config" => {
                let path: String = value(&args, &mut i);
                config.params = ParameterSet::load(&path).unwrap_or_else(|e| {
                    error!(error = %e, "cannot load parameters");
                    process::exit(1);
                });
            }
            "--output" => output_path = Some(value(&args, &mut i)),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                error!(argument = other, "unknown argument");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        info!(
            matches = config.num_matches,
            max_turns = config.max_turns,
            a = config.strategy_a.name(),
            b = config.strategy_b.name(),
            threads = config.threads,
            "starting showcase"
        );
    }

    let start = Instant::now();
    let records = match arena::play_matches(&config) {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "match batch failed");
            process::exit(1);
        }
    };

    if !config.quiet {
        info!(elapsed_s = start.elapsed().as_secs_f64(), "batch complete");
        arena::log_summary(&records);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            arena::write_jsonl(&records, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            arena::write_jsonl(&records, &mut writer)
        }
    };
    if let Err(e) = written {
        error!(error = %e, "failed to write transcripts");
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        info!(path = %path, count = records.len(), "transcripts written");
    }
}

/// Parses the argument following `args[*i]`, exiting on a missing or bad value.
fn value<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            error!(flag = %flag, "missing or invalid value");
            process::exit(1);
        }
    }
}

fn strategy(args: &[String], i: &mut usize) -> Strategy {
    let name: String = value(args, i);
    Strategy::from_name(&name).unwrap_or_else(|| {
        error!(strategy = %name, "unknown strategy (aggressive, defensive, strafe, random)");
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!("Usage: showcase [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --matches N      Number of matches to play (default: 4)");
    eprintln!("  --max-turns N    Turn limit per match (default: 40)");
    eprintln!("  --a NAME         Strategy for ship_a (default: aggressive)");
    eprintln!("  --b NAME         Strategy for ship_b (default: defensive)");
    eprintln!("  --config FILE    Parameter file (default: built-in parameters)");
    eprintln!("  --threads N      Number of parallel threads (default: 1)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --timeout-ms N   Per-side limit for producing orders (default: 30000)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress per-match and summary logging");
    eprintln!("  --help           Show this help");
}
