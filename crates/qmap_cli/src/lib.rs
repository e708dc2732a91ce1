//! # qmap_cli
//!
//! Command-line front end for the layer-by-layer A* qubit mapper:
//! argument parsing ([`cli::Cli`]) and the run pipeline ([`pipeline::run`])
//! that wires `qmap_io`'s adapters to `qmap_mapper::map_circuit`.
//!
//! ## Library usage
//!
//! ```rust
//! use qmap_cli::cli::Cli;
//! use qmap_cli::pipeline::run;
//! use qmap_cli::Parser as _;
//!
//! let cli = Cli::parse_from(["qmap", "--input", "circuit.txt"]).resolve();
//! let _outcome = run(&cli);
//! ```

pub mod cli;
pub mod pipeline;

pub use cli::Cli;
pub use pipeline::{run, RunOutcome};

// Re-exported so doctests and downstream consumers don't need a direct
// `clap` dependency just to call `Cli::parse_from`.
pub use clap::Parser;
