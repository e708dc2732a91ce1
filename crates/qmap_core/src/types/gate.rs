//! Gate representation.
//!
//! A gate is a `(type, control, target)` triple where `control = None`
//! denotes a single-qubit gate and `type` is opaque to everything
//! except a handful of special cases the emitter interprets directly
//! (`CX`, the basis-change gate, and the internal `SWP` marker). No
//! sentinel integers: absence of a control qubit is `Option::None`,
//! not `-1`.

use serde::{Deserialize, Serialize};

/// The operation a [`Gate`] performs.
///
/// `Other` carries an arbitrary token plus parameters so that gates the
/// mapper does not special-case (single-qubit rotations on the input
/// circuit, arbitrary unitaries) pass through unmodified end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateOp {
    /// Controlled-NOT / CX, the only two-qubit gate the core mapper
    /// reasons about directly.
    Cx,
    /// A basis-change gate (Hadamard) the emitter inserts around a CNOT
    /// whose direction does not match the coupling graph.
    H,
    /// Internal marker recording a committed SWAP's `(control, target)`
    /// pair so the fix-up pass can track logical-qubit positions. Never
    /// written to the final output circuit.
    Swp,
    /// Any other single- or two-qubit gate type, passed through as an
    /// opaque token with its original parameters.
    Other(String, Vec<f64>),
}

impl GateOp {
    /// The textual token this operation renders as in `Gate::op_name`.
    pub fn name(&self) -> &str {
        match self {
            GateOp::Cx => "CX",
            GateOp::H => "H",
            GateOp::Swp => "SWP",
            GateOp::Other(name, _) => name,
        }
    }
}

/// A single gate in a circuit.
///
/// `control = None` marks a single-qubit gate, matching spec §3's
/// `control = -1` sentinel without the magic number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The operation this gate performs.
    pub op: GateOp,
    /// Control qubit, for two-qubit gates.
    pub control: Option<usize>,
    /// Target qubit.
    pub target: usize,
}

impl Gate {
    /// Creates a single-qubit gate.
    pub fn single(op: GateOp, target: usize) -> Self {
        Self {
            op,
            control: None,
            target,
        }
    }

    /// Creates a two-qubit gate.
    pub fn two_qubit(op: GateOp, control: usize, target: usize) -> Self {
        Self {
            op,
            control: Some(control),
            target,
        }
    }

    /// Creates a CX gate.
    pub fn cx(control: usize, target: usize) -> Self {
        Self::two_qubit(GateOp::Cx, control, target)
    }

    /// Creates a basis-change (H) gate.
    pub fn h(target: usize) -> Self {
        Self::single(GateOp::H, target)
    }

    /// Creates an internal SWP marker recording a committed swap.
    pub fn swp(control: usize, target: usize) -> Self {
        Self::two_qubit(GateOp::Swp, control, target)
    }

    /// Returns true if this gate operates on two qubits.
    pub fn is_two_qubit(&self) -> bool {
        self.control.is_some()
    }

    /// Returns true if this is the internal SWP marker.
    pub fn is_swp(&self) -> bool {
        matches!(self.op, GateOp::Swp)
    }

    /// Returns the qubit indices this gate names, control first.
    pub fn qubits(&self) -> Vec<usize> {
        match self.control {
            Some(c) => vec![c, self.target],
            None => vec![self.target],
        }
    }

    /// Remaps this gate's qubits through `mapping[logical] = physical`.
    pub fn map_qubits(&self, mapping: &[usize]) -> Gate {
        Gate {
            op: self.op.clone(),
            control: self.control.map(|c| mapping[c]),
            target: mapping[self.target],
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.control {
            Some(c) => write!(f, "{}({}, {})", self.op.name(), c, self.target),
            None => write!(f, "{}({})", self.op.name(), self.target),
        }
    }
}
