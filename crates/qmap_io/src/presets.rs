//! Hard-coded architecture presets (spec §1: "out of scope ... treated
//! as external collaborators"), used when `--coupling_file` is empty
//! (spec §6: "empty ⇒ preset architecture").
//!
//! `linear` mirrors the original's `build_graph_linear`: a bidirectional
//! nearest-neighbour chain sized to the circuit's qubit count. `ibm_qx5`
//! is the fixed 16-position topology `build_graph_QX5` hard-codes.

use qmap_core::coupling::{CouplingGraph, Edge};

/// A bidirectional linear chain over `nqubits` positions.
pub fn linear(nqubits: usize) -> CouplingGraph {
    let mut edges = Vec::with_capacity(2 * nqubits.saturating_sub(1));
    for i in 0..nqubits.saturating_sub(1) {
        edges.push(Edge::new(i, i + 1));
        edges.push(Edge::new(i + 1, i));
    }
    CouplingGraph::from_edges(nqubits, edges).expect("linear preset edges are always in range")
}

/// The fixed 16-qubit IBM QX5 coupling graph.
pub fn ibm_qx5() -> CouplingGraph {
    const EDGES: &[(usize, usize)] = &[
        (1, 0),
        (1, 2),
        (2, 3),
        (3, 14),
        (3, 4),
        (5, 4),
        (6, 5),
        (6, 11),
        (6, 7),
        (7, 10),
        (8, 7),
        (9, 8),
        (9, 10),
        (11, 10),
        (12, 5),
        (12, 11),
        (12, 13),
        (13, 4),
        (13, 14),
        (15, 0),
        (15, 14),
        (15, 2),
    ];
    let edges = EDGES.iter().map(|&(u, v)| Edge::new(u, v)).collect();
    CouplingGraph::from_edges(16, edges).expect("IBM QX5 preset edges are always in range")
}
