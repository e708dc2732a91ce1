//! # qmap_core
//!
//! Shared types and algorithmic building blocks for the layer-by-layer
//! A* qubit mapper:
//!
//! - [`types`]: `Circuit` and `Gate`, the logical-circuit representation.
//! - [`coupling`]: `CouplingGraph` and `DistanceOracle` (C1).
//! - [`layering`]: partitions a gate sequence into data-parallel layers (C2).
//! - [`config`]: `MapperConfig`, the tunables every other component reads.
//! - [`error`]: `MapError`, the crate-wide error type.
//!
//! ## Example
//!
//! ```rust
//! use qmap_core::prelude::*;
//!
//! let mut circuit = Circuit::new(3);
//! circuit.add_gate(Gate::h(0)).unwrap();
//! circuit.add_gate(Gate::cx(0, 1)).unwrap();
//!
//! let layers = partition_into_layers(circuit.gates(), circuit.num_qubits());
//! assert_eq!(layers.len(), 2);
//! ```

pub mod config;
pub mod coupling;
pub mod error;
pub mod layering;
pub mod prelude;
pub mod types;

pub use config::MapperConfig;
pub use coupling::{CouplingGraph, DistanceOracle, Edge};
pub use error::{MapError, Result};
pub use layering::{partition_into_layers, relayer_emitted, Layer};
pub use types::{Circuit, Gate, GateOp};
