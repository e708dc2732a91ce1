//! Error types for the qubit mapper.

use thiserror::Error;

/// Unified error type for mapping operations.
#[derive(Error, Debug)]
pub enum MapError {
    // ============ Config Errors ============
    /// Malformed or missing coupling-graph file, or invalid CLI arguments.
    #[error("Configuration error: {0}")]
    Config(String),

    // ============ Capacity Errors ============
    /// More logical qubits than physical positions.
    #[error("Over capacity: circuit needs {0} qubits, device has {1} positions")]
    OverCapacity(usize, usize),

    /// Invalid physical or logical qubit index.
    #[error("Invalid qubit index {0}, maximum is {1}")]
    InvalidQubit(usize, usize),

    // ============ Invariant Errors ============
    /// An emitted two-qubit gate or SWAP resolves to an edge present in
    /// neither direction of the coupling graph. Signals a bug in the
    /// search or in the coupling graph, not a user error.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    // ============ Search Errors ============
    /// No legal edge was available to complete an incremental placement.
    #[error("No free coupling-graph edge available for placement")]
    NoPlacementEdge,

    /// The per-layer A* search drained its queue without ever reaching
    /// a `done` permutation: the layer has no legal single-swap path to
    /// an all-adjacent state on this coupling graph.
    #[error("Search for layer {0} exhausted its queue without finding a legal permutation")]
    SearchExhausted(usize),

    // ============ I/O Errors ============
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for mapper operations.
pub type Result<T> = std::result::Result<T, MapError>;

impl MapError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invariant-violation error with the given message.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
