//! Convenient re-exports for downstream crates.
//!
//! # Usage
//!
//! ```rust
//! use qmap_core::prelude::*;
//! ```

pub use crate::config::{DoneThresholdMode, HeuristicMode, MapperConfig};
pub use crate::coupling::{CouplingGraph, DistanceOracle, Edge};
pub use crate::error::{MapError, Result};
pub use crate::layering::{partition_into_layers, relayer_emitted, Layer};
pub use crate::types::{Circuit, Gate, GateOp};
