//! End-to-end mapping scenarios, one per concrete example.

use qmap_core::coupling::{CouplingGraph, Edge};
use qmap_core::types::Gate;
use qmap_core::MapperConfig;
use qmap_mapper::map_circuit;

fn linear_graph(n: usize) -> CouplingGraph {
    let edges = (0..n - 1).map(|i| Edge::new(i, i + 1)).collect();
    CouplingGraph::from_edges(n, edges).unwrap()
}

fn bidirectional_graph(edges: &[(usize, usize)], positions: usize) -> CouplingGraph {
    let edges = edges.iter().map(|&(u, v)| Edge::new(u, v)).collect();
    CouplingGraph::from_edges(positions, edges).unwrap()
}

#[test]
fn trivial_adjacent_gate_needs_no_swaps() {
    let graph = bidirectional_graph(&[(0, 1), (1, 0), (1, 2), (2, 1), (2, 3), (3, 2)], 4);
    let config = MapperConfig::default();
    let gates = vec![Gate::cx(0, 1)];

    let result = map_circuit(&gates, 2, &graph, &config).unwrap();

    assert_eq!(result.total_swaps, 0);
    assert_eq!(result.depth(), 1);
    let emitted: Vec<_> = result.layers.iter().flat_map(|l| &l.gates).collect();
    assert_eq!(emitted.len(), 1);
    assert!(emitted[0].is_two_qubit());
}

#[test]
fn one_swap_wrong_direction_decomposes_with_final_cnot() {
    let graph = bidirectional_graph(&[(0, 1), (1, 0), (1, 2), (2, 1), (2, 3), (3, 2)], 4);
    let config = MapperConfig::default();
    let gates = vec![Gate::cx(0, 2)];

    let result = map_circuit(&gates, 3, &graph, &config).unwrap();

    assert_eq!(result.total_swaps, 1);
    assert!(result.depth() <= 6);
    let cx_count = result
        .layers
        .iter()
        .flat_map(|l| &l.gates)
        .filter(|g| g.is_two_qubit())
        .count();
    // Three CNOTs from the SWAP decomposition plus the final gate.
    assert_eq!(cx_count, 4);
}

#[test]
fn line_with_back_edge_needs_at_least_two_swaps() {
    let graph = linear_graph(5);
    let config = MapperConfig::default();
    let gates = vec![Gate::cx(0, 4)];

    let result = map_circuit(&gates, 5, &graph, &config).unwrap();

    assert!(result.total_swaps >= 2);
}

#[test]
fn unmapped_qubits_at_layer_start_place_onto_free_edges() {
    let graph = bidirectional_graph(&[(0, 1), (1, 0), (2, 3), (3, 2)], 4);
    let config = MapperConfig::default();
    let gates = vec![Gate::cx(0, 1), Gate::cx(2, 3)];

    let result = map_circuit(&gates, 4, &graph, &config).unwrap();

    assert_eq!(result.total_swaps, 0);
    let cx_count = result
        .layers
        .iter()
        .flat_map(|l| &l.gates)
        .filter(|g| g.is_two_qubit())
        .count();
    assert_eq!(cx_count, 2);
}

#[test]
fn memory_pruning_preserves_result_cost() {
    // A ring topology gives the A* search two equally-costed routing
    // directions (clockwise/counter-clockwise) around the far side,
    // producing many viable single-swap successors per layer -- enough
    // to trigger pruning at a very small `max_queue_size`. The pruned
    // and unpruned runs should still reach the same swap cost.
    let mut edges = Vec::new();
    for i in 0..8usize {
        let j = (i + 1) % 8;
        edges.push((i, j));
        edges.push((j, i));
    }
    let graph = bidirectional_graph(&edges, 8);
    let gates = vec![Gate::cx(0, 4)];

    let mut pruned_config = MapperConfig::default();
    pruned_config.max_queue_size = 4;
    pruned_config.queue_keep_fraction = 0.5;
    pruned_config.max_queue_keep = 2;
    let pruned = map_circuit(&gates, 8, &graph, &pruned_config).unwrap();

    let mut unpruned_config = MapperConfig::default();
    unpruned_config.max_queue_size = 1_000_000;
    let unpruned = map_circuit(&gates, 8, &graph, &unpruned_config).unwrap();

    assert_eq!(pruned.total_swaps, unpruned.total_swaps);
}
