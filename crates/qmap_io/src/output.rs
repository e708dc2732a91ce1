//! Output circuit writer (spec §6, out of the core's scope).
//!
//! Renders a mapped circuit in either of the two text formats the
//! original emitter supports: the default OpenQASM-style listing, or
//! the `.real` alternative format with its `U(θ,φ,δ)` rotation
//! decomposition. Also formats the `--statistic` line.

use qmap_core::types::{Gate, GateOp};
use qmap_mapper::MappingResult;
use std::fmt::Write as _;

/// Renders `result` as the default OpenQASM-style text: a `qreg`/`creg`
/// header sized to `positions` physical qubits, followed by one line
/// per gate (`<type> q[<target>];` or `<type> q[<control>],q[<target>];`).
pub fn render_openqasm(result: &MappingResult, positions: usize) -> String {
    let mut out = String::new();
    writeln!(out, "OPENQASM 2.0;").unwrap();
    writeln!(out, "include \"qelib1.inc\";").unwrap();
    writeln!(out, "qreg q[{positions}];").unwrap();
    writeln!(out, "creg c[{positions}];").unwrap();

    for layer in &result.layers {
        for gate in &layer.gates {
            match gate.control {
                Some(c) => writeln!(out, "{} q[{}],q[{}];", gate.op.name(), c, gate.target).unwrap(),
                None => writeln!(out, "{} q[{}];", gate.op.name(), gate.target).unwrap(),
            }
        }
    }

    out
}

/// Renders `result` in the `.real` alternative format: a
/// `.numvars`/`.variables`/`.constants`/`.begin`/`.end` block over
/// `num_qubits` logical variable names, decomposing the basis-change
/// `H` as `h1 q<i>`, a CNOT as `t2 q<c> q<t>`, and any other
/// parameterised unitary `U(θ,φ,δ)` into the original's fixed
/// `rz1`/`rx1` rotation sequence.
pub fn render_real(result: &MappingResult, num_qubits: usize) -> String {
    let mut out = String::new();
    writeln!(out, ".numvars {num_qubits}").unwrap();
    write!(out, ".variables").unwrap();
    for i in 0..num_qubits {
        write!(out, " q{i}").unwrap();
    }
    writeln!(out).unwrap();
    write!(out, ".constants ").unwrap();
    for _ in 0..num_qubits {
        write!(out, "0").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, ".begin").unwrap();

    for layer in &result.layers {
        for gate in &layer.gates {
            render_real_gate(&mut out, gate);
        }
    }

    writeln!(out, ".end").unwrap();
    out
}

fn render_real_gate(out: &mut String, gate: &Gate) {
    if let Some(c) = gate.control {
        writeln!(out, "t2 q{} q{}", c, gate.target).unwrap();
        return;
    }
    if matches!(gate.op, GateOp::H) {
        writeln!(out, "h1 q{}", gate.target).unwrap();
        return;
    }
    if let GateOp::Other(name, _) = &gate.op {
        if let Some((theta, phi, delta)) = parse_unitary_angles(name) {
            render_rotation_decomposition(out, gate.target, theta, phi, delta);
        }
    }
}

/// Parses a `U(theta,phi,delta)` token into its three angle values in
/// radians (e.g. `U(1.5707963,0,3.14159265)`), returning `None` for
/// anything that doesn't match this shape. No comma-adjacent
/// whitespace is accepted since the token must survive the
/// whitespace-delimited gate-source format unsplit.
fn parse_unitary_angles(token: &str) -> Option<(f64, f64, f64)> {
    let inner = token.strip_prefix("U(")?.strip_suffix(')')?;
    let mut parts = inner.split(',');
    let theta: f64 = parts.next()?.parse().ok()?;
    let phi: f64 = parts.next()?.parse().ok()?;
    let delta: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((theta, phi, delta))
}

/// `get_pi_div`: quantizes a radian angle to the fixed 10000-step
/// rational precision the original decomposition uses (`round(pi /
/// val * precision) / precision`); `0` maps to `0`.
fn get_pi_div(val_radians: f64) -> f64 {
    if val_radians == 0.0 {
        return 0.0;
    }
    const PRECISION: f64 = 10000.0;
    (std::f64::consts::PI / val_radians * PRECISION).round() / PRECISION
}

/// Emits the fixed `rz1`/`rx1` rotation sequence for a `U(theta,phi,delta)`
/// single-qubit unitary, following the original emitter's quantization
/// exactly (`main.cpp`'s post-`get_pi_div` branch arithmetic).
fn render_rotation_decomposition(out: &mut String, target: usize, theta: f64, phi: f64, delta: f64) {
    let theta_div = get_pi_div(theta);
    let phi_div = get_pi_div(phi);
    let delta_div = get_pi_div(delta);

    if phi_div == 0.0 {
        writeln!(out, "rz1:{} q{}", 1, target).unwrap();
    } else {
        writeln!(out, "rz1:{} q{}", (phi_div / (1.0 + 3.0 * phi_div)) as i64, target).unwrap();
    }
    writeln!(out, "rx1:{} q{}", 2, target).unwrap();

    if theta_div == 0.0 {
        writeln!(out, "rz1:{} q{}", 1, target).unwrap();
    } else {
        writeln!(out, "rz1:{} q{}", (theta_div / (1.0 + theta_div)) as i64, target).unwrap();
    }
    writeln!(out, "rx1:{} q{}", 2, target).unwrap();

    if delta_div != 0.0 {
        writeln!(out, "rz1:{} q{}", delta_div, target).unwrap();
    }
}

/// Formats the `--statistic` append line: `name : time depth gate_count
/// fidelity total_swaps` (spec §6).
pub fn render_statistic_line(name: &str, time_secs: f64, result: &MappingResult, fidelity: i64) -> String {
    format!(
        "{} : {} {} {} {} {}",
        name,
        time_secs,
        result.depth(),
        result.gate_count() - result.total_swaps,
        fidelity,
        result.total_swaps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmap_core::coupling::{CouplingGraph, Edge};
    use qmap_core::MapperConfig;

    fn linear_graph(n: usize) -> CouplingGraph {
        let edges = (0..n - 1).map(|i| Edge::new(i, i + 1)).collect();
        CouplingGraph::from_edges(n, edges).unwrap()
    }

    #[test]
    fn test_render_openqasm_trivial_gate() {
        let graph = linear_graph(4);
        let config = MapperConfig::default();
        let gates = vec![Gate::cx(0, 1)];
        let result = qmap_mapper::map_circuit(&gates, 2, &graph, &config).unwrap();
        let text = render_openqasm(&result, graph.positions());
        assert!(text.starts_with("OPENQASM 2.0;\n"));
        assert!(text.contains("qreg q[4];"));
        assert!(text.contains("CX q[0],q[1];") || text.contains("CX q[1],q[0];"));
    }

    #[test]
    fn test_render_real_block_structure() {
        let graph = linear_graph(4);
        let config = MapperConfig::default();
        let gates = vec![Gate::cx(0, 1)];
        let result = qmap_mapper::map_circuit(&gates, 2, &graph, &config).unwrap();
        let text = render_real(&result, 2);
        assert!(text.starts_with(".numvars 2\n"));
        assert!(text.contains(".variables q0 q1"));
        assert!(text.contains(".begin"));
        assert!(text.trim_end().ends_with(".end"));
        assert!(text.contains("t2 q0 q1") || text.contains("t2 q1 q0"));
    }

    #[test]
    fn test_hadamard_renders_as_h1() {
        let mut out = String::new();
        render_real_gate(&mut out, &Gate::h(3));
        assert_eq!(out, "h1 q3\n");
    }

    #[test]
    fn test_get_pi_div_zero() {
        assert_eq!(get_pi_div(0.0), 0.0);
    }

    #[test]
    fn test_parse_unitary_angles() {
        let (theta, phi, delta) = parse_unitary_angles("U(1.5707963,0,3.14159265)").unwrap();
        assert!((theta - 1.5707963).abs() < 1e-6);
        assert_eq!(phi, 0.0);
        assert!((delta - std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_statistic_line_format() {
        let graph = linear_graph(4);
        let config = MapperConfig::default();
        let gates = vec![Gate::cx(0, 1)];
        let result = qmap_mapper::map_circuit(&gates, 2, &graph, &config).unwrap();
        let line = render_statistic_line("bell", 0.01, &result, 0);
        assert!(line.starts_with("bell : 0.01"));
    }
}
