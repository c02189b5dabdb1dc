//! VLAN island analysis.
//!
//! This module builds the physical connectivity graph, projects it onto each
//! VLAN, and reports the connected components ("islands") of every VLAN along
//! with recommendations, bridge suggestions and path diagnostics.

pub mod types;
pub mod graph;
pub mod islands;
pub mod recommendations;
pub mod bridges;
pub mod paths;
pub mod analyzer;
pub mod report;

pub use types::*;
pub use graph::{EdgeAttrs, NodeAttrs, PhysicalGraph, Projection, VlanSubgraph};
pub use islands::{find_connected_components, rank_islands};
pub use recommendations::generate_recommendations;
pub use bridges::suggest_bridges;
pub use paths::find_simple_paths;
pub use analyzer::VlanIslandAnalyzer;
pub use report::{generate_json_report, generate_text_report, print_summary};
