//! Mapper benchmark: whole-circuit mapping time over a linear device.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qmap_core::coupling::{CouplingGraph, Edge};
use qmap_core::types::Gate;
use qmap_core::MapperConfig;
use qmap_mapper::map_circuit;

fn linear_graph(n: usize) -> CouplingGraph {
    let edges = (0..n - 1).map(|i| Edge::new(i, i + 1)).collect();
    CouplingGraph::from_edges(n, edges).unwrap()
}

fn random_cx_circuit(num_qubits: usize, num_gates: usize) -> Vec<Gate> {
    let mut gates = Vec::with_capacity(num_gates);
    for i in 0..num_gates {
        let c = i % num_qubits;
        let t = (i * 7 + 3) % num_qubits;
        if c == t {
            gates.push(Gate::h(c));
        } else {
            gates.push(Gate::cx(c, t));
        }
    }
    gates
}

fn bench_map_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_circuit_linear");

    for num_gates in [20, 50, 100] {
        let num_qubits = 8;
        let graph = linear_graph(num_qubits);
        let config = MapperConfig::default();
        let gates = random_cx_circuit(num_qubits, num_gates);

        group.bench_with_input(BenchmarkId::new("gates", num_gates), &gates, |b, gates| {
            b.iter(|| map_circuit(gates, num_qubits, &graph, &config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_map_circuit);
criterion_main!(benches);
