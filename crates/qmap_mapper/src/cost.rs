//! Cost and heuristic aggregation (C4).

use crate::node::MapNode;
use qmap_core::config::{DoneThresholdMode, HeuristicMode};
use qmap_core::MapperConfig;

/// Combines an accumulated heuristic with a freshly computed one,
/// per [`HeuristicMode`].
pub fn heuristic_function(old: f64, new: f64, mode: HeuristicMode) -> f64 {
    match mode {
        HeuristicMode::Admissible => old.max(new),
        HeuristicMode::Summed => old + new,
    }
}

/// Whether a two-qubit gate's raw oracle distance counts as adjacent
/// under the configured [`DoneThresholdMode`].
pub fn is_adjacent(distance: f64, mode: DoneThresholdMode) -> bool {
    match mode {
        DoneThresholdMode::Strict1 => distance < 1.0,
        DoneThresholdMode::Legacy4 => distance <= 4.0,
    }
}

/// The state-level total cost aggregate (spec §4.3).
///
/// Reduces to `cost_fixed` when depth/fidelity tracking is disabled.
pub fn total_cost(n: &MapNode, config: &MapperConfig) -> f64 {
    if !config.depth_fidelity_enabled {
        return n.cost_fixed;
    }

    let fidelity_term = fidelity_rms(&n.fidelity) * config.fidelity_norm;
    let depth_term =
        max_depth(&n.depth) / config.depth_swap * config.depth_percentage();
    let cost_term = n.cost_fixed / config.cost_swap * config.cost_percentage;

    fidelity_term + depth_term + cost_term
}

/// Maximum per-position depth.
pub(crate) fn max_depth(depths: &[f64]) -> f64 {
    depths.iter().cloned().fold(0.0, f64::max)
}

/// RMS deviation of the non-zero fidelity values.
pub(crate) fn fidelity_rms(fidelities: &[f64]) -> f64 {
    let nonzero: Vec<f64> = fidelities.iter().cloned().filter(|&f| f != 0.0).collect();
    if nonzero.is_empty() {
        return 0.0;
    }
    let mean = nonzero.iter().sum::<f64>() / nonzero.len() as f64;
    let variance =
        nonzero.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / nonzero.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_function_summed() {
        assert_eq!(heuristic_function(1.0, 2.0, HeuristicMode::Summed), 3.0);
    }

    #[test]
    fn test_heuristic_function_admissible() {
        assert_eq!(heuristic_function(1.0, 2.0, HeuristicMode::Admissible), 2.0);
    }

    #[test]
    fn test_is_adjacent_strict1() {
        assert!(is_adjacent(0.0, DoneThresholdMode::Strict1));
        assert!(!is_adjacent(1.0, DoneThresholdMode::Strict1));
    }

    #[test]
    fn test_is_adjacent_legacy4() {
        assert!(is_adjacent(4.0, DoneThresholdMode::Legacy4));
        assert!(!is_adjacent(4.01, DoneThresholdMode::Legacy4));
    }

    #[test]
    fn test_total_cost_reduces_to_fixed_when_disabled() {
        let config = MapperConfig::default();
        assert!(!config.depth_fidelity_enabled);
        let props = crate::node::CircuitProperties::new(1, 2);
        let mut n = MapNode::root(&props);
        n.cost_fixed = 14.0;
        assert_eq!(total_cost(&n, &config), 14.0);
    }

    #[test]
    fn test_total_cost_aggregates_when_enabled() {
        let config = MapperConfig::default().with_depth_fidelity(true);
        let props = crate::node::CircuitProperties::new(1, 2);
        let mut n = MapNode::root(&props);
        n.cost_fixed = config.cost_swap;
        n.depth = vec![config.depth_swap, 0.0];
        n.fidelity = vec![config.fidelity_swap, 0.0];
        let total = total_cost(&n, &config);
        assert!(total > 0.0);
    }

    #[test]
    fn test_fidelity_rms_ignores_zero_entries() {
        assert_eq!(fidelity_rms(&[0.0, 0.0]), 0.0);
        assert!(fidelity_rms(&[1.0, 3.0]) > 0.0);
    }
}
