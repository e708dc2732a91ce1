//! Orchestrator (C9).
//!
//! Drives the layer-by-layer A* search in order, keeping the evolving
//! circuit properties (`q2p`, `p2q`, `depth`, `fidelity`) that are
//! carried from one layer's winner to the next layer's root, and
//! collects the emitted physical circuit (`mapping.cpp`'s top-level
//! `mapping()` loop).

use crate::astar::search_layer;
use crate::cost::is_adjacent;
use crate::emit::{emit_layer, resolve_deferred_targets};
use crate::node::CircuitProperties;
use qmap_core::coupling::{CouplingGraph, DistanceOracle};
use qmap_core::layering::{partition_into_layers, relayer_emitted, Layer};
use qmap_core::types::Gate;
use qmap_core::{MapError, MapperConfig, Result};

/// The final product of one mapping run: the physical gate sequence,
/// re-layered after emission, plus aggregate statistics for the
/// `--statistic` line (spec §6).
#[derive(Debug, Clone)]
pub struct MappingResult {
    pub layers: Vec<Layer>,
    pub total_swaps: usize,
    pub final_properties: CircuitProperties,
}

impl MappingResult {
    /// Total number of physical gates across all emitted layers.
    pub fn gate_count(&self) -> usize {
        self.layers.iter().map(|l| l.gates.len()).sum()
    }

    /// Circuit depth: the number of emitted layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

/// Maps `gates` (over `num_qubits` logical qubits) onto `graph`,
/// returning the physically-legal, re-layered circuit plus statistics.
///
/// Errors with [`MapError::OverCapacity`] before any search runs if the
/// circuit needs more logical qubits than the device has positions
/// (spec §7).
pub fn map_circuit(gates: &[Gate], num_qubits: usize, graph: &CouplingGraph, config: &MapperConfig) -> Result<MappingResult> {
    let positions = graph.positions();
    if num_qubits > positions {
        return Err(MapError::OverCapacity(num_qubits, positions));
    }

    let oracle = DistanceOracle::build(graph, config);
    let layers = partition_into_layers(gates, num_qubits);

    let mut properties = CircuitProperties::new(num_qubits, positions);
    if config.use_initial_mapping {
        seed_initial_mapping(&mut properties, &layers, graph);
    }

    let mut emitted: Vec<Gate> = Vec::new();
    let mut total_swaps = 0usize;

    for (idx, layer) in layers.iter().enumerate() {
        let search = search_layer(layer, &layers, idx, &mut properties, graph, &oracle, config)?;
        let winner = search.winner;

        tracing::debug!(
            layer = idx,
            considered_qubits = search.considered_qubits.len(),
            swaps = winner.swaps.len(),
            "layer mapped"
        );

        advance_properties(&mut properties, layer, &winner, &oracle, config);
        total_swaps += winner.swaps.len();

        emit_layer(idx, layer, &winner, graph, &mut emitted)?;
    }

    resolve_deferred_targets(&mut emitted, &properties);
    let relayered = relayer_emitted(&emitted, positions);

    tracing::info!(
        layers = relayered.len(),
        total_swaps,
        max_depth = properties.depth.iter().cloned().fold(0.0_f64, f64::max),
        "mapping complete"
    );

    Ok(MappingResult {
        layers: relayered,
        total_swaps,
        final_properties: properties,
    })
}

/// Seeds `properties` from the first layer containing a two-qubit gate:
/// each gate's endpoints are placed on a fresh coupling-graph edge, and
/// any remaining logical qubits are filled arbitrarily into free
/// positions (spec §4.9: "enabled flag, forced on when depth/fidelity
/// is on").
fn seed_initial_mapping(properties: &mut CircuitProperties, layers: &[Layer], graph: &CouplingGraph) {
    if let Some(first) = layers.iter().find(|l| l.has_two_qubit_gate()) {
        for g in first.two_qubit_gates() {
            let c = g.control.expect("two_qubit_gates yields only two-qubit gates");
            let t = g.target;
            if properties.q2p[c].is_some() || properties.q2p[t].is_some() {
                continue;
            }
            if let Some(edge) = graph
                .edges()
                .iter()
                .find(|e| properties.p2q[e.u].is_none() && properties.p2q[e.v].is_none())
            {
                properties.place(c, edge.u);
                properties.place(t, edge.v);
            }
        }
    }

    let mut free_positions = (0..properties.p2q.len()).filter(|&p| properties.p2q[p].is_none());
    for q in 0..properties.q2p.len() {
        if properties.q2p[q].is_none() {
            if let Some(p) = free_positions.next() {
                properties.place(q, p);
            }
        }
    }
}

/// Copies the winning node's state into the persistent circuit
/// properties, then advances depth/fidelity for the current layer's own
/// gates on top of that (spec §4.9: "the update also accounts for the
/// gates in the current layer themselves").
fn advance_properties(properties: &mut CircuitProperties, layer: &Layer, winner: &crate::node::MapNode, oracle: &DistanceOracle, config: &MapperConfig) {
    properties.q2p = winner.q2p.clone();
    properties.p2q = winner.p2q.clone();
    properties.depth = winner.depth.clone();
    properties.fidelity = winner.fidelity.clone();

    if !config.depth_fidelity_enabled {
        return;
    }

    for g in &layer.gates {
        match g.control {
            None => {
                if let Some(p) = properties.q2p[g.target] {
                    properties.depth[p] += config.depth_gate;
                    properties.fidelity[p] += config.fidelity_gate;
                }
            },
            Some(c) => {
                let (Some(pc), Some(pt)) = (properties.q2p[c], properties.q2p[g.target]) else {
                    continue;
                };
                if is_adjacent(oracle.distance(pc, pt), config.done_threshold_mode) {
                    properties.depth[pc] += config.depth_gate;
                    properties.depth[pt] += config.depth_gate;
                    properties.fidelity[pc] += config.fidelity_cnot;
                    properties.fidelity[pt] += config.fidelity_cnot;
                } else {
                    let advanced = properties.depth[pc].max(properties.depth[pt]) + config.depth_swap;
                    properties.depth[pc] = advanced;
                    properties.depth[pt] = advanced;
                    properties.fidelity[pc] += config.fidelity_swap;
                    properties.fidelity[pt] += config.fidelity_swap;
                }
            },
        }
    }
}
