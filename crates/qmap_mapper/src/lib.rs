//! # qmap_mapper
//!
//! The layer-by-layer A* qubit mapping and routing engine: the node
//! model and ordering (C3), cost/heuristic aggregation (C4), the
//! unique-key priority queue (C5), the per-layer A* search (C6), the
//! lookahead penalty (C7), the circuit emitter (C8), and the
//! orchestrator that drives all of the above across a whole circuit
//! (C9).
//!
//! Downstream crates (adapters, CLI) call [`orchestrator::map_circuit`]
//! and otherwise treat this crate as opaque; the submodules are public
//! so unit tests and benchmarks can exercise each component in
//! isolation, mirroring how the original mapper's translation units
//! (`node_handling.cpp`, `cost.cpp`, `mapping.cpp`, ...) each owned one
//! piece of the same search.

pub mod astar;
pub mod cost;
pub mod emit;
pub mod lookahead;
pub mod node;
pub mod orchestrator;
pub mod queue;

pub use astar::{search_layer, LayerSearch};
pub use node::{CircuitProperties, MapNode};
pub use orchestrator::{map_circuit, MappingResult};
pub use queue::{PushOutcome, UniqueQueue};
