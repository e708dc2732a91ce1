//! Argument parsing.
//!
//! Mirrors the original's `boost::program_options` contract: every
//! input is nameable (`--input/-i`, `--statistic/-s`, `--output/-o`,
//! ...) and the first three also accept the positional fallback order
//! `input statistic output` (spec §6). `clap`'s derive can't bind one
//! field to both a name and a position, so the positional slots are
//! collected separately and only consulted for whichever named flags
//! were left unset.

use std::path::PathBuf;

use clap::Parser;

/// Rewrites a circuit over logical qubits into one legal on a hardware
/// coupling graph, inserting a heuristically-minimal number of SWAPs.
#[derive(Parser, Debug)]
#[command(name = "qmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gate-source input file.
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Mapped-circuit output file.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Statistics file; one line is appended per run.
    #[arg(short = 's', long)]
    pub statistic: Option<PathBuf>,

    /// Coupling-graph file; omitted or empty selects the preset
    /// architecture.
    #[arg(short = 'c', long = "coupling_file")]
    pub coupling_file: Option<PathBuf>,

    /// Verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit the `.real` alternative output format instead of OpenQASM.
    #[arg(short, long)]
    pub real: bool,

    /// Positional fallback, in order: `input statistic output`.
    #[arg(value_name = "ARGS", num_args = 0..=3)]
    pub(crate) positional: Vec<PathBuf>,
}

impl Cli {
    /// Resolves `input`/`statistic`/`output` against the positional
    /// fallback slots, named flags taking priority.
    pub fn resolve(mut self) -> Self {
        let mut positional = self.positional.drain(..);
        if self.input.is_none() {
            self.input = positional.next();
        } else {
            positional.next();
        }
        if self.statistic.is_none() {
            self.statistic = positional.next();
        } else {
            positional.next();
        }
        if self.output.is_none() {
            self.output = positional.next();
        }
        self
    }
}
