//! # qmap_io
//!
//! Thin adapters around the mapper core: a coupling-graph file reader,
//! a minimal gate-source text reader, hard-coded architecture presets,
//! and an output circuit writer in both supported text formats. None
//! of this crate makes mapping decisions; it only gets data into and
//! out of [`qmap_core`]/[`qmap_mapper`] shapes, the way the original
//! kept `QASMparser` and the coupling-graph file logic separate from
//! `mapping.cpp`.

pub mod circuit_text;
pub mod coupling_file;
pub mod output;
pub mod presets;

pub use output::{render_openqasm, render_real, render_statistic_line};
