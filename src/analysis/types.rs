//! Core data types for VLAN island analysis.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::topology::{DeviceKind, TopologySummary};

/// Errors raised by invalid configuration or when strict validation finds
/// dangling references
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Link {link} references unknown device {device}")]
    UnknownLinkEndpoint { link: String, device: String },

    #[error("VLAN {vlan_id} references unknown devices: {}", .devices.join(", "))]
    UnresolvedVlanMembers { vlan_id: u16, devices: Vec<String> },

    #[error("Invalid analyzer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// A maximal set of same-VLAN devices that can reach each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Island {
    pub vlan_id: u16,
    /// 1-based, in ranked order (largest first)
    pub island_id: usize,
    pub devices: BTreeSet<String>,
    pub is_main_island: bool,
}

impl Island {
    pub fn size(&self) -> usize {
        self.devices.len()
    }

    pub fn contains_device(&self, device_id: &str) -> bool {
        self.devices.contains(device_id)
    }
}

/// Outcome of island detection for a single VLAN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanAnalysisResult {
    pub vlan_id: u16,
    pub vlan_name: String,
    /// Members present in the physical graph
    pub total_devices: usize,
    /// Largest first
    pub islands: Vec<Island>,
    pub has_islands: bool,
    pub main_island_size: usize,
    pub fragmentation_ratio: f64,
    /// Members dropped because no such device exists
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved_devices: Vec<String>,
}

impl VlanAnalysisResult {
    /// Result for a VLAN with no (resolvable) members
    pub fn empty(vlan_id: u16, vlan_name: impl Into<String>) -> Self {
        Self {
            vlan_id,
            vlan_name: vlan_name.into(),
            total_devices: 0,
            islands: Vec::new(),
            has_islands: false,
            main_island_size: 0,
            fragmentation_ratio: 0.0,
            unresolved_devices: Vec::new(),
        }
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Devices outside the main island
    pub fn isolated_devices(&self) -> usize {
        self.total_devices - self.main_island_size
    }

    pub fn main_island(&self) -> Option<&Island> {
        self.islands.iter().find(|i| i.is_main_island)
    }

    pub fn island_by_device(&self, device_id: &str) -> Option<&Island> {
        self.islands.iter().find(|i| i.contains_device(device_id))
    }
}

/// Network-wide analysis over every VLAN in the topology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkAnalysisReport {
    pub timestamp: DateTime<Utc>,
    pub topology_summary: TopologySummary,
    /// In topology VLAN order
    pub vlan_results: Vec<VlanAnalysisResult>,
    /// Results with more than one island, same order as `vlan_results`
    pub problematic_vlans: Vec<VlanAnalysisResult>,
    pub total_islands: usize,
    pub recommendations: Vec<String>,
}

impl NetworkAnalysisReport {
    pub fn healthy_vlans(&self) -> Vec<&VlanAnalysisResult> {
        self.vlan_results.iter().filter(|r| !r.has_islands).collect()
    }

    /// Problematic VLAN with the highest fragmentation ratio, first one on ties
    pub fn worst_fragmented_vlan(&self) -> Option<&VlanAnalysisResult> {
        worst_fragmented(&self.problematic_vlans)
    }
}

pub(crate) fn worst_fragmented(results: &[VlanAnalysisResult]) -> Option<&VlanAnalysisResult> {
    results.iter().fold(None, |worst: Option<&VlanAnalysisResult>, r| match worst {
        Some(w) if w.fragmentation_ratio >= r.fragmentation_ratio => Some(w),
        _ => Some(r),
    })
}

/// Reference to an isolated island inside a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandRef {
    pub island_id: usize,
    pub devices: Vec<String>,
    pub size: usize,
}

/// A device that could be reconfigured to join an isolated device to the main island
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeCandidate {
    pub isolated_device: String,
    pub bridge_device: String,
    /// None when the bridge device is not in the topology
    pub bridge_type: Option<DeviceKind>,
    pub action: String,
}

/// Bridge candidates for one isolated island
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOpportunity {
    pub isolated_island: IslandRef,
    pub bridge_candidates: Vec<BridgeCandidate>,
}

/// Suggestions for reconnecting the islands of a VLAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivitySuggestions {
    pub vlan_id: u16,
    pub vlan_name: String,
    pub island_count: usize,
    pub connection_opportunities: Vec<ConnectionOpportunity>,
}

impl ConnectivitySuggestions {
    pub fn candidate_count(&self) -> usize {
        self.connection_opportunities
            .iter()
            .map(|o| o.bridge_candidates.len())
            .sum()
    }
}
