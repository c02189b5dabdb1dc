//! Network topology module.
//!
//! In-memory model of devices, physical links and VLAN membership, plus
//! loading, normalization and reference validation of topology files.

pub mod types;
pub mod loader;
pub mod summary;
pub mod validation;

// Re-export key types and functions for easier access
pub use types::{Device, DeviceKind, DeviceRole, Link, LinkKind, Metadata, Topology, Vlan};
pub use loader::{load_topology, load_topology_unchecked, parse_topology, save_topology, TopologyFormat};
pub use summary::{TopologySummary, VlanSummary};
pub use validation::{find_unresolved_references, normalize_topology, validate_references, TopologyError, UnresolvedReference};
