//! Gate-source adapter (spec §6, out of the core's scope).
//!
//! A minimal line-oriented format recovered from the original source's
//! `QASMparser` contract: one gate per line, `type ctrl target`,
//! `ctrl` blank or `-1` for a single-qubit gate, `#`-prefixed comment
//! and blank lines ignored. `type` tokens `CX`/`cx` and `H`/`h` map to
//! [`GateOp::Cx`]/[`GateOp::H`]; everything else (including a
//! parameterised token like `U(pi/2,0,pi)`) passes through as
//! [`GateOp::Other`] with its parameter list left empty, since the
//! angle parameters already live inside the token the way the original
//! stores them.
//!
//! This is deliberately thin: circuit parsing proper (a real QASM
//! frontend) is an explicit Non-goal of the core mapper.

use qmap_core::types::{Circuit, Gate, GateOp};
use qmap_core::{MapError, Result};

/// Parses gate-source text into a [`Circuit`] declared over
/// `num_qubits` logical qubits.
pub fn parse(contents: &str, num_qubits: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(num_qubits);

    for (lineno, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let gate = parse_gate_line(line)
            .ok_or_else(|| MapError::config(format!("malformed gate line {}: '{line}'", lineno + 1)))?;
        circuit.add_gate(gate)?;
    }

    Ok(circuit)
}

/// Parses gate-source text, inferring the logical qubit count `N` as
/// one more than the highest qubit index referenced by any gate (spec
/// §6: the gate-source collaborator "also supplies `N`").
pub fn parse_auto(contents: &str) -> Result<Circuit> {
    let num_qubits = highest_qubit_index(contents).map_or(0, |max| max + 1);
    parse(contents, num_qubits)
}

fn highest_qubit_index(contents: &str) -> Option<usize> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_gate_line)
        .flat_map(|g| g.qubits().into_iter())
        .max()
}

fn parse_gate_line(line: &str) -> Option<Gate> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let (ty, ctrl, target) = match fields.as_slice() {
        // `ctrl` omitted entirely: single-qubit gate.
        [ty, target] => (*ty, None, *target),
        [ty, ctrl, target] => (*ty, Some(*ctrl), *target),
        _ => return None,
    };

    let target: usize = target.parse().ok()?;
    let op = gate_op(ty);

    let ctrl = match ctrl {
        None => None,
        Some(c) if c == "-1" => None,
        Some(c) => Some(c.parse::<usize>().ok()?),
    };

    Some(match ctrl {
        None => Gate::single(op, target),
        Some(c) => Gate::two_qubit(op, c, target),
    })
}

fn gate_op(ty: &str) -> GateOp {
    match ty {
        "CX" | "cx" => GateOp::Cx,
        "H" | "h" => GateOp::H,
        other => GateOp::Other(other.to_string(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_two_qubit_and_single_qubit_gates() {
        let text = "CX 0 1\nH -1 2\n";
        let circuit = parse(text, 3).unwrap();
        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(circuit.gates()[0].control, Some(0));
        assert_eq!(circuit.gates()[0].target, 1);
        assert_eq!(circuit.gates()[1].control, None);
    }

    #[test]
    fn test_ignores_comments_and_blank_lines() {
        let text = "# a comment\n\nCX 0 1\n";
        let circuit = parse(text, 2).unwrap();
        assert_eq!(circuit.gate_count(), 1);
    }

    #[test]
    fn test_omitted_ctrl_field_is_single_qubit() {
        let text = "U(pi/2,0,pi) 2\n";
        let circuit = parse(text, 3).unwrap();
        assert_eq!(circuit.gate_count(), 1);
        assert!(circuit.gates()[0].control.is_none());
        match &circuit.gates()[0].op {
            GateOp::Other(name, params) => {
                assert_eq!(name, "U(pi/2,0,pi)");
                assert!(params.is_empty());
            },
            _ => panic!("expected Other"),
        }
    }

    #[test]
    fn test_malformed_line_errors() {
        let err = parse("CX 0\n", 2).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_out_of_range_qubit_errors() {
        let err = parse("CX 0 5\n", 2).unwrap_err();
        assert!(matches!(err, MapError::InvalidQubit(5, 1)));
    }

    #[test]
    fn test_parse_auto_infers_qubit_count() {
        let text = "CX 0 1\nCX 2 3\n";
        let circuit = parse_auto(text).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.gate_count(), 2);
    }

    #[test]
    fn test_parse_auto_empty_input_yields_zero_qubits() {
        let circuit = parse_auto("").unwrap();
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.gate_count(), 0);
    }
}
