//! Configuration for the qubit mapper.

use serde::{Deserialize, Serialize};

/// How per-gate heuristic costs within a layer are aggregated.
///
/// See spec §4.3: `max` is "admissible" in the zero-lookahead case, but
/// the spec notes admissibility is unproven once lookahead is enabled.
/// Both are kept behind this switch rather than picking a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeuristicMode {
    /// Combine per-gate heuristics by `max`.
    Admissible,
    /// Combine per-gate heuristics by summation.
    Summed,
}

/// Which threshold decides a node is `done` for the current layer.
///
/// Source revisions disagree on whether the bound is `< 1` on the
/// `INVERSE`-penalised distance-minus-one, or `> 4` on a legacy integer
/// distance. Both are exposed; `Strict1` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoneThresholdMode {
    /// A two-qubit gate is adjacent once its heuristic distance is `< 1.0`.
    Strict1,
    /// Legacy integer mode: adjacent once the raw path length is `<= 4`.
    Legacy4,
}

/// Tunable constants and switches for the A* mapping engine.
///
/// Mirrors the constants the original mapper hardcodes as `#define`s
/// (`mapper.hpp`): SWAP/gate cost and depth/fidelity units, the
/// cost/depth percentage split, the lookahead discount factors, and the
/// two open-question switches of spec §9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Cost contributed by a single committed SWAP (3 CNOTs + 2 basis
    /// changes), in abstract cost units.
    pub cost_swap: f64,
    /// Depth units a SWAP advances the two swapped positions by.
    pub depth_swap: f64,
    /// Depth units a single gate advances its target position by.
    pub depth_gate: f64,
    /// Fidelity-cost units a SWAP accumulates on each swapped position.
    pub fidelity_swap: f64,
    /// Fidelity-cost units a single-qubit gate accumulates.
    pub fidelity_gate: f64,
    /// Fidelity-cost units a two-qubit gate accumulates on each endpoint.
    pub fidelity_cnot: f64,

    /// Weight of the committed-swap-cost term in the total-cost
    /// aggregate; the depth term gets `1 - cost_percentage`.
    pub cost_percentage: f64,
    /// Scale factor applied to the RMS fidelity-deviation term.
    pub fidelity_norm: f64,

    /// Extra distance penalty for a path whose first hop is not
    /// correctly directed (models the basis-change gates a "backwards"
    /// CNOT needs). Spec range: 0.2-0.6.
    pub inverse_penalty: f64,

    /// Discount applied to the nearest lookahead layer's heuristic.
    pub first_lookahead_factor: f64,
    /// Multiplicative decay applied to each subsequent lookahead layer.
    pub general_lookahead_factor: f64,
    /// Number of upcoming two-qubit layers considered by lookahead.
    pub lookahead_layers: usize,

    /// Combination rule for per-gate heuristics within a layer.
    pub heuristic_mode: HeuristicMode,
    /// Which threshold marks a permutation state `done`.
    pub done_threshold_mode: DoneThresholdMode,

    /// Whether depth/fidelity tracking feeds into total cost. When
    /// disabled, total cost reduces to `cost_fixed` and initial mapping
    /// is not forced on.
    pub depth_fidelity_enabled: bool,
    /// Whether to seed the first layer's mapping from its two-qubit
    /// gates before running A*. Forced on when `depth_fidelity_enabled`.
    pub use_initial_mapping: bool,

    /// Soft cap on the priority queue's live node count; `0` disables
    /// pruning. See spec §4.5.
    pub max_queue_size: usize,
    /// Fraction of the queue kept on a pruning pass.
    pub queue_keep_fraction: f64,
    /// Absolute cap on the number of nodes kept on a pruning pass.
    pub max_queue_keep: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        let cost_percentage = 1.0;
        Self {
            cost_swap: 7.0,
            depth_swap: 5.0,
            depth_gate: 1.0,
            fidelity_swap: 2.0 + 3.0 * 5.0,
            fidelity_gate: 1.0,
            fidelity_cnot: 5.0,

            cost_percentage,
            fidelity_norm: 0.0,

            inverse_penalty: 0.3,

            first_lookahead_factor: 0.9,
            general_lookahead_factor: 0.5,
            lookahead_layers: 1,

            heuristic_mode: HeuristicMode::Summed,
            done_threshold_mode: DoneThresholdMode::Strict1,

            depth_fidelity_enabled: false,
            use_initial_mapping: true,

            max_queue_size: 6_000_000,
            queue_keep_fraction: 1.0 / 6.0,
            max_queue_keep: 1_000_000,
        }
    }
}

impl MapperConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of the depth term in the total-cost aggregate.
    pub fn depth_percentage(&self) -> f64 {
        1.0 - self.cost_percentage
    }

    /// Enables depth/fidelity tracking, forcing initial mapping on too
    /// (spec §4.9: "forced on when depth/fidelity is on").
    pub fn with_depth_fidelity(mut self, enabled: bool) -> Self {
        self.depth_fidelity_enabled = enabled;
        if enabled {
            self.use_initial_mapping = true;
        }
        self
    }

    /// Loads configuration from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serializes configuration to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
