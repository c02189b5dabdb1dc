//! # vlan-islands - VLAN island detection for network topologies
//!
//! This library finds VLANs whose member devices are split into several
//! physically disconnected groups ("islands").
//!
//! ## Overview
//!
//! A topology lists devices, the physical links between them and the VLANs
//! each device belongs to. For every VLAN the physical graph is restricted to
//! the VLAN's members and only links with both endpoints in the VLAN are
//! kept. Each connected component of that subgraph is an island; a healthy
//! VLAN has at most one.
//!
//! ## Key Features
//!
//! - **Island Detection**: Connected components per VLAN with a stable main island
//! - **Fragmentation Metrics**: Share of members outside the main island
//! - **Recommendations**: Ranked list of problematic VLANs and remediation steps
//! - **Bridge Suggestions**: One-hop devices that could join an island to the main one
//! - **Path Diagnostics**: Bounded simple paths between two members of a VLAN
//! - **Parallel Analysis**: Optional per-VLAN fan-out via rayon
//!
//! ## Architecture
//!
//! - `topology`: Devices, links and VLANs, plus JSON/YAML loading and validation
//! - `analysis`: Physical graph, island detection, recommendations and reports
//! - `config`: Analyzer settings (validation mode, path cutoff, parallelism)
//! - `config_loader`: YAML loading of analyzer settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vlan_islands::{analysis::VlanIslandAnalyzer, topology};
//!
//! let topology = topology::load_topology(Path::new("network.json"))?;
//! let analyzer = VlanIslandAnalyzer::new(topology);
//!
//! let report = analyzer.analyze_all_vlans();
//! for line in &report.recommendations {
//!     println!("{}", line);
//! }
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Topology Format
//!
//! ```yaml
//! devices:
//!   - id: sw1
//!     type: switch
//!     role: access
//!     location: Building-A
//! links:
//!   - source: sw1
//!     target: sw2
//!     type: ethernet
//!     speed: 1G
//! vlans:
//!   - id: 10
//!     name: Users
//!     devices: [sw1, sw2]
//! ```
//!
//! ## Error Handling
//!
//! Typed errors (`TopologyError`, `AnalysisError`, `ConfigError`) come from
//! `thiserror`. File loading returns `color_eyre::eyre::Result` with context
//! attached at each step.

pub mod config;
pub mod config_loader;
pub mod topology;
pub mod analysis;

pub use analysis::{NetworkAnalysisReport, VlanAnalysisResult, VlanIslandAnalyzer};
pub use config::{AnalyzerConfig, ValidationMode};
pub use topology::Topology;
