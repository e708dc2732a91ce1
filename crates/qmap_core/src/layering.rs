//! Layering (C2): partitions a gate sequence into data-parallel layers.
//!
//! Scans gates in order, tracking the last layer index that touched
//! each physical position. A single-qubit gate on `t` joins layer
//! `last[t] + 1`; a two-qubit gate on `(c, t)` joins
//! `max(last[c], last[t]) + 1`. The partition is deterministic and
//! depends only on the input order, matching the original's
//! `init_layers` pass.

use crate::types::Gate;

/// An ordered list of gates scheduled to run concurrently: no gate in
/// a layer writes a qubit that any other gate in the same layer reads
/// or writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub gates: Vec<Gate>,
}

impl Layer {
    /// Whether this layer contains at least one two-qubit gate.
    pub fn has_two_qubit_gate(&self) -> bool {
        self.gates.iter().any(|g| g.is_two_qubit())
    }

    /// The layer's two-qubit gates, in order.
    pub fn two_qubit_gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter().filter(|g| g.is_two_qubit())
    }
}

/// Partitions `gates` into layers using the last-touch-per-qubit rule.
///
/// `num_qubits` bounds the `last` tracking table; gates are assumed
/// already validated against it (see [`crate::types::Circuit::add_gate`]).
pub fn partition_into_layers(gates: &[Gate], num_qubits: usize) -> Vec<Layer> {
    let mut last: Vec<Option<usize>> = vec![None; num_qubits];
    let mut layers: Vec<Layer> = Vec::new();

    for gate in gates {
        let layer_idx = match gate.control {
            Some(c) => {
                let lc = last[c].map(|i| i + 1).unwrap_or(0);
                let lt = last[gate.target].map(|i| i + 1).unwrap_or(0);
                lc.max(lt)
            },
            None => last[gate.target].map(|i| i + 1).unwrap_or(0),
        };

        if layer_idx >= layers.len() {
            layers.resize_with(layer_idx + 1, Layer::default);
        }
        layers[layer_idx].gates.push(gate.clone());

        if let Some(c) = gate.control {
            last[c] = Some(layer_idx);
        }
        last[gate.target] = Some(layer_idx);
    }

    layers
}

/// Re-layers an already-physical gate sequence after emission,
/// skipping internal `SWP` markers (spec §4.8: "Skip `SWP` markers and
/// re-schedule the remaining emitted gates into layers by the same
/// last-touch algorithm as C2").
pub fn relayer_emitted(gates: &[Gate], num_positions: usize) -> Vec<Layer> {
    let real_gates: Vec<Gate> = gates.iter().filter(|g| !g.is_swp()).cloned().collect();
    partition_into_layers(&real_gates, num_positions)
}
