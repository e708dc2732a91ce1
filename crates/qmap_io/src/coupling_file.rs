//! Coupling-graph file reader (spec §6, out of the core's scope).
//!
//! Parses the text format `generate_graph` reads from disk:
//!
//! ```text
//! Positions: 5
//! [0,1]
//! [1,0]
//! [1,2]
//! ```
//!
//! Line 1 declares the position count; every subsequent line is either
//! a `[u,v]` directed edge or is ignored (spec: "Lines not matching
//! either form are ignored. Trailing whitespace permitted.").

use qmap_core::coupling::{CouplingGraph, Edge};
use qmap_core::{MapError, Result};

/// Parses a coupling-graph file's contents into a [`CouplingGraph`].
///
/// A missing or malformed first line is a [`MapError::Config`]; a
/// malformed edge line is silently skipped per spec.
pub fn parse(contents: &str) -> Result<CouplingGraph> {
    let mut lines = contents.lines();

    let first = lines
        .next()
        .ok_or_else(|| MapError::config("coupling file is empty, expected 'Positions: <n>'"))?;
    let positions = parse_positions_line(first)
        .ok_or_else(|| MapError::config(format!("first line '{first}' is not 'Positions: <n>'")))?;

    let mut edges = Vec::new();
    for line in lines {
        if let Some(e) = parse_edge_line(line) {
            edges.push(e);
        }
    }

    CouplingGraph::from_edges(positions, edges)
}

fn parse_positions_line(line: &str) -> Option<usize> {
    let rest = line.trim_end().strip_prefix("Positions:")?;
    rest.trim().parse().ok()
}

/// Parses a `[u,v]` edge line, tolerating surrounding/internal
/// whitespace; returns `None` for anything else (ignored per spec).
fn parse_edge_line(line: &str) -> Option<Edge> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?;
    let (u, v) = inner.split_once(',')?;
    let u: usize = u.trim().parse().ok()?;
    let v: usize = v.trim().parse().ok()?;
    Some(Edge::new(u, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_positions_and_edges() {
        let text = "Positions: 4\n[0,1]\n[1,0]\n[1,2]\n[2,1]\n";
        let graph = parse(text).unwrap();
        assert_eq!(graph.positions(), 4);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 2));
        assert_eq!(graph.edges().len(), 4);
    }

    #[test]
    fn test_ignores_malformed_lines() {
        let text = "Positions: 2\n[0,1]\nnot an edge\n# comment\n[garbage]\n";
        let graph = parse(text).unwrap();
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_tolerates_trailing_whitespace() {
        let text = "Positions: 2   \n[0,1]   \n";
        let graph = parse(text).unwrap();
        assert!(graph.has_edge(0, 1));
    }

    #[test]
    fn test_missing_first_line_is_config_error() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_malformed_first_line_is_config_error() {
        let err = parse("not a positions line\n[0,1]\n").unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }
}
