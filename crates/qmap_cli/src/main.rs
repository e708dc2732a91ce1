//! `qmap` — layer-by-layer A* qubit mapper CLI.
//!
//! Exit codes (spec §7): `0` on success, `1` on a configuration or I/O
//! error, `2` when the mapper itself reports an invariant violation
//! (a bug in the search or the coupling graph, not a user error).

use std::process::ExitCode;

use clap::Parser;
use qmap_core::MapError;
use qmap_cli::cli::Cli;
use qmap_cli::pipeline::run;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let cli = Cli::parse().resolve();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    match run(&cli) {
        Ok(outcome) => {
            info!(
                depth = outcome.result.depth(),
                gates = outcome.result.gate_count(),
                swaps = outcome.result.total_swaps,
                time_secs = outcome.elapsed_secs,
                "mapping finished"
            );
            if !cli.verbose {
                println!(
                    "{},{},{}",
                    outcome.elapsed_secs,
                    outcome.result.gate_count() - outcome.result.total_swaps,
                    outcome.result.depth()
                );
            }
            ExitCode::from(0)
        },
        Err(
            err @ (MapError::InvariantViolation(_)
            | MapError::NoPlacementEdge
            | MapError::SearchExhausted(_)),
        ) => {
            eprintln!("{err}");
            ExitCode::from(2)
        },
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        },
    }
}
