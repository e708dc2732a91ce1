//! Circuit emitter (C8).
//!
//! Translates each layer's winning permutation into physical gates
//! (`mapping.cpp`'s main loop): committed SWAPs expand to the canonical
//! 3-CNOT decomposition plus an internal `SWP` marker, direction
//! mismatches between a rewritten two-qubit gate and the coupling
//! graph are patched with basis-change `H`s, and single-qubit gates on
//! a logical qubit that has no location yet are deferred until the
//! reverse fix-up pass resolves them.
//!
//! Deferred single-qubit targets are encoded the way the original
//! encodes them as negative integers (`-target - 1`) without relying on
//! signed indices: a deferred gate's `target` is offset by the device's
//! position count (`positions + logical_qubit`), which is always out
//! of the valid `[0, positions)` physical range and is therefore
//! unambiguous. [`resolve_deferred_targets`] strips every such encoding
//! before the circuit is handed to a caller.

use crate::node::{CircuitProperties, MapNode};
use qmap_core::coupling::{CouplingGraph, Edge};
use qmap_core::layering::Layer;
use qmap_core::types::{Gate, GateOp};
use qmap_core::{MapError, Result};

/// Encodes a deferred single-qubit gate's logical target so it survives
/// until the fix-up pass, out of the valid physical-position range.
fn defer(logical_qubit: usize, positions: usize) -> usize {
    positions + logical_qubit
}

fn is_deferred(target: usize, positions: usize) -> bool {
    target >= positions
}

fn undefer(target: usize, positions: usize) -> usize {
    target - positions
}

/// Emits the physical gates for one layer given its winning node, and
/// appends them to `out`. The first layer (`layer_idx == 0`) never
/// emits SWAPs: its winning permutation *is* the initial placement.
pub fn emit_layer(layer_idx: usize, layer: &Layer, winner: &MapNode, graph: &CouplingGraph, out: &mut Vec<Gate>) -> Result<()> {
    let positions = winner.p2q.len();

    if layer_idx > 0 {
        for &e in &winner.swaps {
            emit_swap(e, graph, out)?;
        }
    }

    for gate in &layer.gates {
        match gate.control {
            None => {
                let target = match winner.q2p[gate.target] {
                    Some(p) => p,
                    None => defer(gate.target, positions),
                };
                out.push(Gate {
                    op: gate.op.clone(),
                    control: None,
                    target,
                });
            },
            Some(control) => {
                let c = winner.q2p[control].expect("layer placement maps every two-qubit gate endpoint");
                let t = winner.q2p[gate.target].expect("layer placement maps every two-qubit gate endpoint");
                emit_two_qubit_gate(gate, c, t, graph, out)?;
            },
        }
    }

    Ok(())
}

/// Decomposes one committed SWAP into the canonical `CX,H,H,CX,H,H,CX`
/// form plus a trailing `SWP` marker (spec §4.8 step 1).
fn emit_swap(e: Edge, graph: &CouplingGraph, out: &mut Vec<Gate>) -> Result<()> {
    let (ctrl, tgt) = canonical_direction(e.u, e.v, graph)?;
    for _ in 0..2 {
        out.push(Gate::cx(ctrl, tgt));
        out.push(Gate::h(e.u));
        out.push(Gate::h(e.v));
    }
    out.push(Gate::cx(ctrl, tgt));
    out.push(Gate::swp(ctrl, tgt));
    Ok(())
}

/// Rewrites a two-qubit gate's endpoints through the winning
/// permutation, flipping direction with basis-change `H`s when the
/// natural edge runs the other way (spec §4.8 step 2, scenario 5).
fn emit_two_qubit_gate(gate: &Gate, c: usize, t: usize, graph: &CouplingGraph, out: &mut Vec<Gate>) -> Result<()> {
    if graph.has_edge(c, t) {
        out.push(Gate {
            op: gate.op.clone(),
            control: Some(c),
            target: t,
        });
        return Ok(());
    }
    if !graph.has_edge(t, c) {
        return Err(MapError::invariant(format!(
            "two-qubit gate ({c}, {t}) is not an edge of the coupling graph in either direction"
        )));
    }

    if !matches!(gate.op, GateOp::Cx) {
        return Err(MapError::invariant(format!(
            "cannot flip direction of non-CX two-qubit gate {}",
            gate.op.name()
        )));
    }

    out.push(Gate::h(c));
    out.push(Gate::h(t));
    out.push(Gate::cx(t, c));
    out.push(Gate::h(c));
    out.push(Gate::h(t));
    Ok(())
}

/// The direction a SWAP's 3-CNOT decomposition should use: `(u, v)` if
/// that edge exists, `(v, u)` if only the reverse does.
fn canonical_direction(u: usize, v: usize, graph: &CouplingGraph) -> Result<(usize, usize)> {
    if graph.has_edge(u, v) {
        Ok((u, v))
    } else if graph.has_edge(v, u) {
        Ok((v, u))
    } else {
        Err(MapError::invariant(format!(
            "SWAP ({u}, {v}) is not an edge of the coupling graph in either direction"
        )))
    }
}

/// The reverse-scan fix-up pass (spec §4.8): walks the fully emitted
/// gate stream back to front, undoing `SWP` markers against a live
/// `(q2p, p2q)` pair seeded from the final circuit properties, and
/// resolving every deferred single-qubit target against that live
/// mapping (assigning a free position if the logical qubit never
/// appeared in a two-qubit gate at all).
pub fn resolve_deferred_targets(gates: &mut [Gate], final_properties: &CircuitProperties) {
    let positions = final_properties.p2q.len();
    let mut live_p2q = final_properties.p2q.clone();
    let mut live_q2p = final_properties.q2p.clone();

    for gate in gates.iter_mut().rev() {
        if gate.is_swp() {
            let u = gate.control.expect("SWP markers are two-qubit");
            let v = gate.target;
            let qu = live_p2q[u];
            let qv = live_p2q[v];
            live_p2q[u] = qv;
            live_p2q[v] = qu;
            if let Some(q) = qu {
                live_q2p[q] = Some(v);
            }
            if let Some(q) = qv {
                live_q2p[q] = Some(u);
            }
            continue;
        }

        if is_deferred(gate.target, positions) {
            let logical = undefer(gate.target, positions);
            let resolved = match live_q2p[logical] {
                Some(p) => p,
                None => {
                    let free = (0..positions)
                        .find(|&p| live_p2q[p].is_none())
                        .expect("fewer logical qubits than physical positions guarantees a free slot");
                    live_q2p[logical] = Some(free);
                    live_p2q[free] = Some(logical);
                    free
                },
            };
            gate.target = resolved;
        }
    }
}
