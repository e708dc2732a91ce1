//! Lookahead (C7): a discounted penalty from upcoming layers.
//!
//! The original mapper only ever looks one CNOT-bearing layer ahead
//! (`mapping.cpp`'s `lookahead`, gated by the hardcoded
//! `N_LOOK_AHEADS = 1`). Spec §4.7 generalises that to
//! `MapperConfig::lookahead_layers` discounted terms; this module keeps
//! the original's per-gate special cases (both endpoints unmapped: no
//! penalty; one endpoint unmapped: nearest free position; both mapped:
//! plain oracle distance) and its layer-skipping search for the next
//! layer that actually contains a two-qubit gate.

use crate::cost::{fidelity_rms, heuristic_function, is_adjacent, max_depth};
use crate::node::MapNode;
use qmap_core::coupling::DistanceOracle;
use qmap_core::layering::Layer;
use qmap_core::MapperConfig;

/// Adds the discounted lookahead penalty for the layers after
/// `current_layer` into `node.lookahead_penalty` (spec §4.7).
pub fn apply_lookahead(
    node: &mut MapNode,
    layers: &[Layer],
    current_layer: usize,
    oracle: &DistanceOracle,
    config: &MapperConfig,
) {
    let mut penalty = 0.0;
    let mut factor = config.first_lookahead_factor;
    let mut search_from = current_layer + 1;
    let mut remaining = config.lookahead_layers;
    let mut first = true;

    while remaining > 0 {
        let Some(next_idx) = next_two_qubit_layer(layers, search_from) else {
            break;
        };

        let mut h_i = 0.0;
        for g in layers[next_idx].two_qubit_gates() {
            let c = g.control.expect("two_qubit_gates yields only two-qubit gates");
            let t = g.target;
            let term = per_gate_lookahead_term(node, oracle, c, t);
            h_i = heuristic_function(h_i, term, config.heuristic_mode);
        }
        penalty += factor * h_i;

        if first && config.depth_fidelity_enabled {
            let projected = project_depth_fidelity(node, layers, current_layer, next_idx, oracle, config);
            penalty += factor * projected;
        }

        factor *= config.general_lookahead_factor;
        search_from = next_idx + 1;
        remaining -= 1;
        first = false;
    }

    node.lookahead_penalty = penalty;
}

/// The index of the next layer at or after `from` containing a
/// two-qubit gate, if any (spec: "found by skipping single-qubit-only
/// layers").
fn next_two_qubit_layer(layers: &[Layer], from: usize) -> Option<usize> {
    (from..layers.len()).find(|&i| layers[i].has_two_qubit_gate())
}

/// The lookahead contribution of one future two-qubit gate `(c, t)`.
fn per_gate_lookahead_term(node: &MapNode, oracle: &DistanceOracle, c: usize, t: usize) -> f64 {
    match (node.q2p[c], node.q2p[t]) {
        (None, None) => 0.0,
        (None, Some(pt)) => nearest_free_distance(node, oracle, pt, true),
        (Some(pc), None) => nearest_free_distance(node, oracle, pc, false),
        (Some(pc), Some(pt)) => oracle.distance(pc, pt),
    }
}

/// Minimum oracle distance from `known` to any currently vacant
/// position, oriented per `known_is_target`.
fn nearest_free_distance(node: &MapNode, oracle: &DistanceOracle, known: usize, known_is_target: bool) -> f64 {
    (0..node.p2q.len())
        .filter(|&p| node.p2q[p].is_none())
        .map(|p| {
            if known_is_target {
                oracle.distance(p, known)
            } else {
                oracle.distance(known, p)
            }
        })
        .fold(f64::INFINITY, f64::min)
}

/// Projects depth/fidelity advances for every gate strictly after
/// `current_layer` up to and including `next_idx`, without mutating
/// `node`, and returns the resulting combined depth+fidelity term
/// (spec §4.7: "that projection contributes a combined depth+fidelity
/// term scaled by `factor_0`").
fn project_depth_fidelity(
    node: &MapNode,
    layers: &[Layer],
    current_layer: usize,
    next_idx: usize,
    oracle: &DistanceOracle,
    config: &MapperConfig,
) -> f64 {
    let mut depth = node.depth.clone();
    let mut fidelity = node.fidelity.clone();
    let q2p = &node.q2p;

    for layer in &layers[current_layer + 1..=next_idx] {
        for g in &layer.gates {
            match g.control {
                None => {
                    if let Some(p) = q2p[g.target] {
                        depth[p] += config.depth_gate;
                        fidelity[p] += config.fidelity_gate;
                    }
                },
                Some(c) => {
                    if let (Some(pc), Some(pt)) = (q2p[c], q2p[g.target]) {
                        if is_adjacent(oracle.distance(pc, pt), config.done_threshold_mode) {
                            depth[pc] += config.depth_gate;
                            depth[pt] += config.depth_gate;
                            fidelity[pc] += config.fidelity_cnot;
                            fidelity[pt] += config.fidelity_cnot;
                        } else {
                            let advanced = depth[pc].max(depth[pt]) + config.depth_swap;
                            depth[pc] = advanced;
                            depth[pt] = advanced;
                            fidelity[pc] += config.fidelity_swap;
                            fidelity[pt] += config.fidelity_swap;
                        }
                    }
                },
            }
        }
    }

    max_depth(&depth) / config.depth_swap * config.depth_percentage() + fidelity_rms(&fidelity) * config.fidelity_norm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::CircuitProperties;
    use qmap_core::coupling::{CouplingGraph, Edge};
    use qmap_core::types::Gate;

    fn linear_graph_oracle(n: usize, config: &MapperConfig) -> DistanceOracle {
        let edges = (0..n - 1).map(|i| Edge::new(i, i + 1)).collect();
        let g = CouplingGraph::from_edges(n, edges).unwrap();
        DistanceOracle::build(&g, config)
    }

    #[test]
    fn test_no_future_two_qubit_layer_yields_zero_penalty() {
        let config = MapperConfig::default();
        let oracle = linear_graph_oracle(3, &config);
        let mut props = CircuitProperties::new(2, 3);
        props.place(0, 0);
        props.place(1, 1);
        let mut node = MapNode::root(&props);
        apply_lookahead(&mut node, &[], 0, &oracle, &config);
        assert_eq!(node.lookahead_penalty, 0.0);
    }

    #[test]
    fn test_both_unmapped_adds_no_penalty() {
        let config = MapperConfig::default();
        let oracle = linear_graph_oracle(3, &config);
        let props = CircuitProperties::new(2, 3);
        let mut node = MapNode::root(&props);
        let layers = vec![Layer { gates: vec![] }, Layer {
            gates: vec![Gate::cx(0, 1)],
        }];
        apply_lookahead(&mut node, &layers, 0, &oracle, &config);
        assert_eq!(node.lookahead_penalty, 0.0);
    }

    #[test]
    fn test_both_mapped_adds_oracle_distance_scaled_by_first_factor() {
        let config = MapperConfig::default();
        let oracle = linear_graph_oracle(3, &config);
        let mut props = CircuitProperties::new(2, 3);
        props.place(0, 0);
        props.place(1, 2);
        let mut node = MapNode::root(&props);
        let layers = vec![Layer { gates: vec![] }, Layer {
            gates: vec![Gate::cx(0, 1)],
        }];
        apply_lookahead(&mut node, &layers, 0, &oracle, &config);
        let expected = config.first_lookahead_factor * oracle.distance(0, 2);
        assert!((node.lookahead_penalty - expected).abs() < 1e-9);
    }

    #[test]
    fn test_skips_single_qubit_only_layers() {
        let config = MapperConfig::default();
        let oracle = linear_graph_oracle(3, &config);
        let mut props = CircuitProperties::new(2, 3);
        props.place(0, 0);
        props.place(1, 1);
        let mut node = MapNode::root(&props);
        let layers = vec![
            Layer { gates: vec![] },
            Layer { gates: vec![Gate::h(0)] },
            Layer { gates: vec![Gate::cx(0, 1)] },
        ];
        apply_lookahead(&mut node, &layers, 0, &oracle, &config);
        let expected = config.first_lookahead_factor * oracle.distance(0, 1);
        assert!((node.lookahead_penalty - expected).abs() < 1e-9);
    }
}
