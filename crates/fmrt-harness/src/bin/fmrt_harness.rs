//! CLI entry point for the scenario runner.
//!
//! `fmrt-harness run --scenarios <dir>` executes every `*.json` fixture
//! under the given directory and reports pass/fail per scenario.
//! `fmrt-harness bench` is a thin pointer to the `fmrt-bench` crate's
//! criterion benches, which run under `cargo bench` rather than this CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fmrt_harness::runner::{load_scenario, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "fmrt-harness", about = "Scenario runner for the FMRT evolution engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every scenario fixture under a directory.
    Run {
        #[arg(long, default_value = "crates/fmrt-harness/scenarios")]
        scenarios: PathBuf,
    },
    /// Point the caller at `cargo bench -p fmrt-bench` instead of running benches here.
    Bench,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { scenarios } => run_all(&scenarios),
        Command::Bench => {
            println!("run `cargo bench -p fmrt-bench` to execute the criterion benchmarks");
            ExitCode::SUCCESS
        }
    }
}

fn run_all(dir: &PathBuf) -> ExitCode {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("failed to read scenario directory {}: {err}", dir.display());
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;
    let mut total = 0usize;

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        total += 1;
        let outcome = load_scenario(&path).and_then(|scenario| run_scenario(&scenario));
        match outcome {
            Ok(()) => println!("PASS {}", path.display()),
            Err(err) => {
                println!("FAIL {}: {err}", path.display());
                failures += 1;
            }
        }
    }

    println!("{}/{total} scenarios passed", total - failures);
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
