//! The run pipeline: read input, map, write output and statistics.
//!
//! Kept separate from [`crate::cli`] and `main` so it can be exercised
//! directly in tests without spawning a process, separating orchestration
//! from argument handling.

use std::fs;
use std::path::Path;
use std::time::Instant;

use qmap_core::coupling::CouplingGraph;
use qmap_core::{MapError, MapperConfig, Result};
use qmap_io::circuit_text;
use qmap_io::coupling_file;
use qmap_io::output::{render_openqasm, render_real, render_statistic_line};
use qmap_io::presets;
use qmap_mapper::MappingResult;

use crate::cli::Cli;

/// Everything a successful run produced, for the caller to report.
pub struct RunOutcome {
    pub result: MappingResult,
    pub elapsed_secs: f64,
}

/// Runs the full pipeline for one invocation: parse the input circuit,
/// build (or load) the coupling graph, map it, and write whichever of
/// `output`/`statistic` were requested.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let input_path = cli
        .input
        .as_ref()
        .ok_or_else(|| MapError::config("--input is required"))?;

    let source = fs::read_to_string(input_path)?;
    let circuit = circuit_text::parse_auto(&source)?;
    let num_qubits = circuit.num_qubits();

    let graph = load_coupling_graph(cli.coupling_file.as_deref(), num_qubits)?;

    if num_qubits > graph.positions() {
        return Err(MapError::OverCapacity(num_qubits, graph.positions()));
    }

    let config = MapperConfig::default();

    let start = Instant::now();
    let result = qmap_mapper::map_circuit(circuit.gates(), num_qubits, &graph, &config)?;
    let elapsed_secs = start.elapsed().as_secs_f64();

    if let Some(output_path) = &cli.output {
        let text = if cli.real {
            render_real(&result, num_qubits)
        } else {
            render_openqasm(&result, graph.positions())
        };
        fs::write(output_path, text)?;
    }

    if let Some(statistic_path) = &cli.statistic {
        let name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input_path.display().to_string());
        let fidelity = if config.depth_fidelity_enabled {
            result.final_properties.fidelity.iter().sum::<f64>().round() as i64
        } else {
            0
        };
        let line = render_statistic_line(&name, elapsed_secs, &result, fidelity);
        append_line(statistic_path, &line)?;
    }

    Ok(RunOutcome { result, elapsed_secs })
}

fn load_coupling_graph(coupling_file_path: Option<&Path>, num_qubits: usize) -> Result<CouplingGraph> {
    match coupling_file_path {
        Some(path) if !path.as_os_str().is_empty() => {
            let text = fs::read_to_string(path)?;
            coupling_file::parse(&text)
        },
        _ => Ok(presets::linear(num_qubits)),
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io::Write;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    fn base_cli(input: &tempfile::NamedTempFile) -> Cli {
        Cli {
            input: Some(input.path().to_path_buf()),
            output: None,
            statistic: None,
            coupling_file: None,
            verbose: false,
            real: false,
            positional: Vec::new(),
        }
    }

    #[test]
    fn test_run_trivial_circuit_produces_openqasm_output() {
        let input = write_temp("CX 0 1\n");
        let output = tempfile::NamedTempFile::new().unwrap();

        let cli = Cli {
            output: Some(output.path().to_path_buf()),
            ..base_cli(&input)
        };

        let outcome = run(&cli).unwrap();
        assert_eq!(outcome.result.total_swaps, 0);

        let written = fs::read_to_string(output.path()).unwrap();
        assert!(written.starts_with("OPENQASM 2.0;"));
    }

    #[test]
    fn test_run_appends_statistics_line() {
        let input = write_temp("CX 0 1\n");
        let statistic = tempfile::NamedTempFile::new().unwrap();

        let cli = Cli {
            statistic: Some(statistic.path().to_path_buf()),
            ..base_cli(&input)
        };

        run(&cli).unwrap();
        let written = fs::read_to_string(statistic.path()).unwrap();
        assert!(written.contains(" : "));
    }

    #[test]
    fn test_over_capacity_is_reported_before_mapping() {
        let input = write_temp("CX 0 1\nH -1 5\n");
        let coupling = write_temp("Positions: 2\n[0,1]\n[1,0]\n");

        let cli = Cli {
            coupling_file: Some(coupling.path().to_path_buf()),
            ..base_cli(&input)
        };

        let err = run(&cli).unwrap_err();
        assert!(matches!(err, MapError::OverCapacity(_, _)));
    }

    #[test]
    fn test_real_format_output() {
        let input = write_temp("CX 0 1\n");
        let output = tempfile::NamedTempFile::new().unwrap();

        let cli = Cli {
            output: Some(output.path().to_path_buf()),
            real: true,
            ..base_cli(&input)
        };

        run(&cli).unwrap();
        let written = fs::read_to_string(output.path()).unwrap();
        assert!(written.starts_with(".numvars"));
    }
}
