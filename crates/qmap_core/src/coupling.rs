//! Coupling graph and all-pairs distance oracle (C1).
//!
//! The coupling graph is a directed edge set over `P` physical
//! positions: an edge `u -> v` means a native two-qubit gate can be
//! issued with `u` as control and `v` as target. The distance oracle
//! runs a modified Dijkstra from every position, tracking whether the
//! shortest path so far used a forward (correctly directed) edge, and
//! breaking length ties in favour of paths that did. Distances are
//! reported as `path_length - 1`, plus `inverse_penalty` when no edge
//! of the path was taken in its native direction, matching the
//! convention the emitter and A* heuristic both build on.

use crate::config::MapperConfig;
use crate::error::MapError;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A directed edge between two physical positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Self { u, v }
    }
}

/// A directed coupling graph over `positions` physical qubits.
#[derive(Debug, Clone)]
pub struct CouplingGraph {
    positions: usize,
    /// Directed edges, kept sorted for deterministic expansion order
    /// (spec §4.9: "edges in the sorted order of `E`").
    edges: Vec<Edge>,
}

impl CouplingGraph {
    /// Creates a coupling graph with no edges.
    pub fn new(positions: usize) -> Self {
        Self {
            positions,
            edges: Vec::new(),
        }
    }

    /// Creates a coupling graph from an explicit edge list, validating
    /// that every endpoint is within range.
    pub fn from_edges(positions: usize, mut edges: Vec<Edge>) -> crate::Result<Self> {
        for e in &edges {
            if e.u >= positions || e.v >= positions {
                return Err(MapError::InvalidQubit(
                    e.u.max(e.v),
                    positions.saturating_sub(1),
                ));
            }
        }
        edges.sort();
        edges.dedup();
        Ok(Self { positions, edges })
    }

    /// Adds a directed edge `u -> v`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> crate::Result<()> {
        if u >= self.positions || v >= self.positions {
            return Err(MapError::InvalidQubit(
                u.max(v),
                self.positions.saturating_sub(1),
            ));
        }
        let e = Edge::new(u, v);
        if let Err(pos) = self.edges.binary_search(&e) {
            self.edges.insert(pos, e);
        }
        Ok(())
    }

    /// Number of physical positions.
    pub fn positions(&self) -> usize {
        self.positions
    }

    /// All directed edges, in sorted order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether the directed edge `u -> v` exists.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edges.binary_search(&Edge::new(u, v)).is_ok()
    }

    /// Whether `u` and `v` are connected by an edge in either
    /// direction.
    pub fn are_connected(&self, u: usize, v: usize) -> bool {
        self.has_edge(u, v) || self.has_edge(v, u)
    }

    /// Positions reachable from `pos` by a single directed or reversed
    /// edge, i.e. every position adjacent to `pos` in the underlying
    /// undirected graph.
    pub fn neighbors(&self, pos: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for e in &self.edges {
            if e.u == pos {
                out.push(e.v);
            } else if e.v == pos {
                out.push(e.u);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DijkstraState {
    pos: usize,
    length: u32,
    correct_edge: bool,
}

impl Eq for DijkstraState {}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on length; among equal lengths, prefer a path that
        // already contains a correctly-directed edge.
        other
            .length
            .cmp(&self.length)
            .then_with(|| self.correct_edge.cmp(&other.correct_edge))
    }
}

/// Precomputed all-pairs distances over a [`CouplingGraph`].
///
/// `distance(u, v)` is `path_length - 1` plus `inverse_penalty` when no
/// edge on the shortest `u -> v` path was traversed in its native
/// direction. `0` when `u == v`.
#[derive(Debug, Clone)]
pub struct DistanceOracle {
    positions: usize,
    dist: Vec<f64>,
}

impl DistanceOracle {
    /// Builds the all-pairs distance table for `graph`.
    pub fn build(graph: &CouplingGraph, config: &MapperConfig) -> Self {
        let positions = graph.positions();
        let mut dist = vec![0.0; positions * positions];

        for start in 0..positions {
            let row = Self::dijkstra_from(graph, start, config);
            for (j, d) in row.into_iter().enumerate() {
                dist[start * positions + j] = d;
            }
        }

        Self { positions, dist }
    }

    fn dijkstra_from(graph: &CouplingGraph, start: usize, config: &MapperConfig) -> Vec<f64> {
        let positions = graph.positions();
        let mut best_len: Vec<Option<u32>> = vec![None; positions];
        let mut best_correct: Vec<bool> = vec![false; positions];
        best_len[start] = Some(0);

        let mut heap = BinaryHeap::new();
        heap.push(DijkstraState {
            pos: start,
            length: 0,
            correct_edge: false,
        });

        while let Some(DijkstraState {
            pos,
            length,
            correct_edge,
        }) = heap.pop()
        {
            if let Some(known) = best_len[pos] {
                if length > known || (length == known && correct_edge <= best_correct[pos]) {
                    continue;
                }
            }

            for e in graph.edges() {
                let (next, forward) = if e.u == pos {
                    (e.v, true)
                } else if e.v == pos {
                    (e.u, false)
                } else {
                    continue;
                };

                let next_length = length + 1;
                // A forward edge always sets the flag, regardless of how
                // many hops in; a reverse edge just inherits the parent's
                // value unchanged (spec §4.1).
                let next_correct = forward || correct_edge;

                let better = match best_len[next] {
                    None => true,
                    Some(known) => {
                        next_length < known
                            || (next_length == known && next_correct && !best_correct[next])
                    },
                };

                if better {
                    best_len[next] = Some(next_length);
                    best_correct[next] = next_correct;
                    heap.push(DijkstraState {
                        pos: next,
                        length: next_length,
                        correct_edge: next_correct,
                    });
                }
            }
        }

        (0..positions)
            .map(|j| {
                if j == start {
                    0.0
                } else {
                    let length = best_len[j].unwrap_or(u32::MAX);
                    let path_length = length as f64 - 1.0;
                    if best_correct[j] {
                        path_length
                    } else {
                        path_length + config.inverse_penalty
                    }
                }
            })
            .collect()
    }

    /// Heuristic distance between physical positions `u` and `v`.
    pub fn distance(&self, u: usize, v: usize) -> f64 {
        self.dist[u * self.positions + v]
    }

    /// Number of physical positions this oracle covers.
    pub fn positions(&self) -> usize {
        self.positions
    }
}
