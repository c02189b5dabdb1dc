//! VLAN island analyzer.
//!
//! Owns a topology, caches its physical graph, and runs island detection per
//! VLAN or across the whole network.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::Utc;
use rayon::prelude::*;

use crate::config::{AnalyzerConfig, ValidationMode};
use crate::topology::{Topology, Vlan};

use super::bridges::suggest_bridges;
use super::graph::{PhysicalGraph, Projection};
use super::islands::{find_connected_components, rank_islands};
use super::paths::find_simple_paths;
use super::recommendations::generate_recommendations;
use super::types::{AnalysisError, ConnectivitySuggestions, NetworkAnalysisReport, VlanAnalysisResult};

/// Detects VLAN islands in a topology
///
/// The physical graph is built on first use and reused until
/// [`invalidate_cache`](Self::invalidate_cache) or
/// [`replace_topology`](Self::replace_topology) is called.
#[derive(Debug)]
pub struct VlanIslandAnalyzer {
    topology: Topology,
    config: AnalyzerConfig,
    vlan_index: HashMap<u16, usize>,
    physical_graph: OnceLock<PhysicalGraph>,
}

impl VlanIslandAnalyzer {
    /// Analyzer with the default (permissive) configuration
    pub fn new(topology: Topology) -> Self {
        Self::unchecked(topology, AnalyzerConfig::default())
    }

    /// Analyzer with an explicit configuration.
    ///
    /// Fails if the configuration does not validate. In strict mode every
    /// link endpoint and VLAN member must resolve to a
    /// device, and the physical graph is built here rather than on first use.
    pub fn with_config(topology: Topology, config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let graph = checked_graph(&topology, config.validation_mode)?;
        let analyzer = Self::unchecked(topology, config);
        if let Some(graph) = graph {
            // a freshly created lock is always empty
            let _ = analyzer.physical_graph.set(graph);
        }
        Ok(analyzer)
    }

    fn unchecked(topology: Topology, config: AnalyzerConfig) -> Self {
        let vlan_index = index_vlans(&topology);
        Self {
            topology,
            config,
            vlan_index,
            physical_graph: OnceLock::new(),
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The cached physical graph, built on first access
    pub fn physical_graph(&self) -> &PhysicalGraph {
        // strict topologies were checked up front, so dropping is a no-op for them
        self.physical_graph
            .get_or_init(|| PhysicalGraph::build_permissive(&self.topology))
    }

    pub fn is_graph_cached(&self) -> bool {
        self.physical_graph.get().is_some()
    }

    /// Drop the cached physical graph so the next access rebuilds it
    pub fn invalidate_cache(&mut self) {
        self.physical_graph = OnceLock::new();
    }

    /// Swap in a new topology, re-running strict validation if configured
    ///
    /// On error the analyzer keeps its previous topology and cache.
    pub fn replace_topology(&mut self, topology: Topology) -> Result<(), AnalysisError> {
        let graph = checked_graph(&topology, self.config.validation_mode)?;
        self.vlan_index = index_vlans(&topology);
        self.topology = topology;
        self.invalidate_cache();
        if let Some(graph) = graph {
            let _ = self.physical_graph.set(graph);
        }
        Ok(())
    }

    pub fn vlan(&self, vlan_id: u16) -> Option<&Vlan> {
        self.vlan_index.get(&vlan_id).map(|&i| &self.topology.vlans[i])
    }

    /// Induced subgraph of a VLAN, `None` if the VLAN does not exist
    pub fn vlan_subgraph(&self, vlan_id: u16) -> Option<Projection<'_>> {
        let vlan = self.vlan(vlan_id)?;
        Some(self.physical_graph().project(&vlan.devices))
    }

    /// Analyze one VLAN, `None` if the VLAN does not exist
    pub fn analyze_vlan(&self, vlan_id: u16) -> Option<VlanAnalysisResult> {
        self.vlan(vlan_id).map(|vlan| self.analyze(vlan))
    }

    fn analyze(&self, vlan: &Vlan) -> VlanAnalysisResult {
        if vlan.devices.is_empty() {
            return VlanAnalysisResult::empty(vlan.id, vlan.name.clone());
        }

        let projection = self.physical_graph().project(&vlan.devices);
        if !projection.unresolved.is_empty() {
            log::warn!(
                "VLAN {} members not in topology, ignored: {}",
                vlan.id,
                projection.unresolved.join(", ")
            );
        }

        let components = find_connected_components(&projection.subgraph);
        let islands = rank_islands(vlan.id, components);

        let total_devices = projection.subgraph.node_count();
        let main_island_size = islands.first().map_or(0, |i| i.size());
        let fragmentation_ratio = if total_devices > 0 {
            (total_devices - main_island_size) as f64 / total_devices as f64
        } else {
            0.0
        };

        log::debug!(
            "VLAN {} ({}): {} devices, {} islands, main island {}",
            vlan.id,
            vlan.name,
            total_devices,
            islands.len(),
            main_island_size
        );

        VlanAnalysisResult {
            vlan_id: vlan.id,
            vlan_name: vlan.name.clone(),
            total_devices,
            has_islands: islands.len() > 1,
            islands,
            main_island_size,
            fragmentation_ratio,
            unresolved_devices: projection.unresolved,
        }
    }

    /// Analyze every VLAN in topology order and assemble the network report
    pub fn analyze_all_vlans(&self) -> NetworkAnalysisReport {
        let vlan_results: Vec<VlanAnalysisResult> = if self.config.parallel {
            // build before fan-out so workers only ever read the cache
            self.physical_graph();
            self.topology
                .vlans
                .par_iter()
                .map(|vlan| self.analyze(vlan))
                .collect()
        } else {
            self.topology.vlans.iter().map(|vlan| self.analyze(vlan)).collect()
        };

        let total_islands: usize = vlan_results.iter().map(|r| r.island_count()).sum();
        let problematic_vlans: Vec<VlanAnalysisResult> = vlan_results
            .iter()
            .filter(|r| r.has_islands)
            .cloned()
            .collect();

        let recommendations =
            generate_recommendations(&problematic_vlans, self.config.priority_threshold);

        log::info!(
            "Analyzed {} VLANs: {} islands total, {} VLANs fragmented",
            vlan_results.len(),
            total_islands,
            problematic_vlans.len()
        );

        NetworkAnalysisReport {
            timestamp: Utc::now(),
            topology_summary: self.topology.summary(),
            vlan_results,
            problematic_vlans,
            total_islands,
            recommendations,
        }
    }

    /// Bridge suggestions for a fragmented VLAN.
    ///
    /// `None` if the VLAN does not exist or forms at most one island.
    pub fn island_connectivity_suggestions(&self, vlan_id: u16) -> Option<ConnectivitySuggestions> {
        let result = self.analyze_vlan(vlan_id)?;
        suggest_bridges(self.physical_graph(), &result)
    }

    /// Simple paths between two members of a VLAN within the configured cutoff
    pub fn find_connection_paths(&self, source: &str, target: &str, vlan_id: u16) -> Vec<Vec<String>> {
        let Some(vlan) = self.vlan(vlan_id) else {
            return Vec::new();
        };
        if !vlan.has_device(source) || !vlan.has_device(target) {
            return Vec::new();
        }

        let projection = self.physical_graph().project(&vlan.devices);
        find_simple_paths(&projection.subgraph, source, target, self.config.max_path_hops)
    }
}

/// Strict mode: build the graph up front and require every VLAN member to
/// resolve. Permissive mode defers the build and returns `None`.
fn checked_graph(
    topology: &Topology,
    mode: ValidationMode,
) -> Result<Option<PhysicalGraph>, AnalysisError> {
    if mode != ValidationMode::Strict {
        return Ok(None);
    }

    let graph = PhysicalGraph::build(topology, ValidationMode::Strict)?;

    for vlan in &topology.vlans {
        let missing: Vec<String> = vlan
            .devices
            .iter()
            .filter(|d| !graph.contains(d))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(AnalysisError::UnresolvedVlanMembers {
                vlan_id: vlan.id,
                devices: missing,
            });
        }
    }

    Ok(Some(graph))
}

/// Topology normalization rejects repeated VLAN ids. If one slips through,
/// lookups by id answer with the first entry while whole-network analysis
/// still reports every entry.
fn index_vlans(topology: &Topology) -> HashMap<u16, usize> {
    let mut index = HashMap::with_capacity(topology.vlans.len());
    for (i, vlan) in topology.vlans.iter().enumerate() {
        if *index.entry(vlan.id).or_insert(i) != i {
            log::warn!("Duplicate VLAN id {}, lookups use the first entry", vlan.id);
        }
    }
    index
}
