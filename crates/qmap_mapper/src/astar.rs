//! A* per-layer search (C6).
//!
//! Finds a cost-minimal sequence of single-SWAP successors that makes
//! every two-qubit gate of a layer land on a coupling-graph edge,
//! mirroring `mapping.cpp`'s `a_star_fixlayer`/`expand_node` but
//! generating successors iteratively over `Q × incident edges` instead
//! of the original's recursive subset enumeration (spec §4.6:
//! "Expansion generates only single-swap successors; deeper solutions
//! arise by repeated popping").

use crate::cost::{heuristic_function, is_adjacent, total_cost};
use crate::lookahead::apply_lookahead;
use crate::node::{CircuitProperties, MapNode};
use crate::queue::UniqueQueue;
use qmap_core::coupling::{CouplingGraph, DistanceOracle, Edge};
use qmap_core::layering::Layer;
use qmap_core::{MapError, MapperConfig, Result};
use std::collections::HashSet;

/// The outcome of searching one layer: the winning node plus the
/// logical qubits the search considered (for diagnostics/logging).
pub struct LayerSearch {
    pub winner: MapNode,
    pub considered_qubits: Vec<usize>,
}

/// Runs the A* search for `layer`, the layer at `layer_idx` within
/// `all_layers` (used by the lookahead pass to see subsequent layers).
///
/// `properties` is mutated in place by the incremental-placement step
/// (spec §4.6 step 1) so that still-unmapped logical qubits named by
/// this layer's gates get a position before the search starts.
pub fn search_layer(
    layer: &Layer,
    all_layers: &[Layer],
    layer_idx: usize,
    properties: &mut CircuitProperties,
    graph: &CouplingGraph,
    oracle: &DistanceOracle,
    config: &MapperConfig,
) -> Result<LayerSearch> {
    let considered_qubits = place_unmapped_endpoints(layer, properties, graph, oracle)?;

    let mut root = MapNode::root(properties);
    score_layer_heuristic(&mut root, layer, oracle, config);
    apply_lookahead(&mut root, all_layers, layer_idx, oracle, config);
    root.total_cost = total_cost(&root, config);

    let mut queue = UniqueQueue::new();
    queue.push(root);

    loop {
        let top = match queue.top() {
            Some(n) => n,
            None => return Err(MapError::SearchExhausted(layer_idx)),
        };
        if top.done {
            break;
        }
        let parent = queue.pop().expect("top() just confirmed a live entry exists");
        expand(
            &parent,
            &considered_qubits,
            layer,
            all_layers,
            layer_idx,
            graph,
            oracle,
            config,
            &mut queue,
        );
    }

    let winner = queue.pop().expect("a done node was confirmed at the top");
    Ok(LayerSearch {
        winner,
        considered_qubits,
    })
}

/// Incremental placement (spec §4.6 step 1): assigns a physical
/// position to every still-unmapped logical qubit named by a two-qubit
/// gate of `layer`. Returns the logical qubits named by the layer's
/// two-qubit gates, in encounter order (spec: "`Q` is ordered as
/// encountered in the layer").
fn place_unmapped_endpoints(
    layer: &Layer,
    properties: &mut CircuitProperties,
    graph: &CouplingGraph,
    oracle: &DistanceOracle,
) -> Result<Vec<usize>> {
    let mut considered = Vec::new();
    let mut seen = HashSet::new();

    for g in layer.two_qubit_gates() {
        let c = g.control.expect("two_qubit_gates yields only two-qubit gates");
        let t = g.target;
        for q in [c, t] {
            if seen.insert(q) {
                considered.push(q);
            }
        }

        match (properties.q2p[c], properties.q2p[t]) {
            (None, None) => {
                let edge = graph
                    .edges()
                    .iter()
                    .find(|e| properties.p2q[e.u].is_none() && properties.p2q[e.v].is_none())
                    .copied()
                    .ok_or(MapError::NoPlacementEdge)?;
                properties.place(c, edge.u);
                properties.place(t, edge.v);
            },
            (None, Some(known)) => {
                let pos = nearest_free_position(properties, oracle, known)
                    .ok_or(MapError::NoPlacementEdge)?;
                properties.place(c, pos);
            },
            (Some(known), None) => {
                let pos = nearest_free_position(properties, oracle, known)
                    .ok_or(MapError::NoPlacementEdge)?;
                properties.place(t, pos);
            },
            (Some(_), Some(_)) => {},
        }
    }

    Ok(considered)
}

/// The vacant physical position nearest `known` under the oracle's
/// distance (spec: "the free position minimising distance to the
/// mapped endpoint's current position"), first found wins ties.
fn nearest_free_position(properties: &CircuitProperties, oracle: &DistanceOracle, known: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for p in 0..properties.p2q.len() {
        if properties.p2q[p].is_some() {
            continue;
        }
        let d = oracle.distance(known, p);
        if best.map(|(_, bd)| d < bd).unwrap_or(true) {
            best = Some((p, d));
        }
    }
    best.map(|(p, _)| p)
}

/// Computes `node.cost_heur` and `node.done` for `layer`'s two-qubit
/// gates (spec §4.3/§4.4), given all endpoints are already mapped.
fn score_layer_heuristic(node: &mut MapNode, layer: &Layer, oracle: &DistanceOracle, config: &MapperConfig) {
    let mut heur = 0.0;
    let mut done = true;
    for g in layer.two_qubit_gates() {
        let c = g.control.expect("two_qubit_gates yields only two-qubit gates");
        let t = g.target;
        let pc = node.q2p[c].expect("placement step maps every layer endpoint");
        let pt = node.q2p[t].expect("placement step maps every layer endpoint");
        let d = oracle.distance(pc, pt);
        heur = heuristic_function(heur, d, config.heuristic_mode);
        done &= is_adjacent(d, config.done_threshold_mode);
    }
    node.cost_heur = heur;
    node.done = done;
}

/// Expands `parent` by generating every single-swap successor over
/// edges incident to a position holding a qubit in `considered_qubits`
/// (spec §4.6 step 4), scoring and pushing each onto `queue`.
#[allow(clippy::too_many_arguments)]
fn expand(
    parent: &MapNode,
    considered_qubits: &[usize],
    layer: &Layer,
    all_layers: &[Layer],
    layer_idx: usize,
    graph: &CouplingGraph,
    oracle: &DistanceOracle,
    config: &MapperConfig,
    queue: &mut UniqueQueue,
) {
    let mut tried: HashSet<(Option<usize>, Option<usize>)> = HashSet::new();

    for &q in considered_qubits {
        let Some(p) = parent.q2p[q] else { continue };
        for e in graph.edges() {
            if e.u != p && e.v != p {
                continue;
            }
            let a = parent.p2q[e.u];
            let b = parent.p2q[e.v];
            if a.is_some() && b.is_some() && tried.contains(&(a, b)) {
                continue;
            }
            tried.insert((a, b));
            tried.insert((b, a));

            let mut successor = parent.apply_swap(Edge::new(e.u, e.v), config);
            score_layer_heuristic(&mut successor, layer, oracle, config);
            apply_lookahead(&mut successor, all_layers, layer_idx, oracle, config);

            queue.push(successor);
            if config.max_queue_size != 0 && queue.len() > config.max_queue_size {
                tracing::warn!(layer = layer_idx, queue_len = queue.len(), "pruning search queue under memory pressure");
                queue.update(config);
            }
        }
    }
}
