//! Physical connectivity graph and per-VLAN projections.
//!
//! The physical graph is an undirected adjacency list over every device and
//! link in the topology. A VLAN subgraph is the subgraph induced by the
//! VLAN's members and borrows its identifiers from the physical graph.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ValidationMode;
use crate::topology::{DeviceKind, DeviceRole, LinkKind, Topology};

use super::types::AnalysisError;

/// Attributes carried by each device node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttrs {
    pub kind: DeviceKind,
    pub role: DeviceRole,
    pub location: String,
}

/// Attributes carried by each undirected edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttrs {
    pub kind: LinkKind,
    pub speed: String,
}

/// Undirected graph of all devices and physical links
#[derive(Debug, Clone, Default)]
pub struct PhysicalGraph {
    nodes: BTreeMap<String, NodeAttrs>,
    adjacency: BTreeMap<String, BTreeMap<String, EdgeAttrs>>,
    edge_count: usize,
}

impl PhysicalGraph {
    /// Build the graph from a topology.
    ///
    /// Links naming an unknown device fail in strict mode and are dropped in
    /// permissive mode. Repeated links between one pair collapse into a single
    /// edge carrying the last link's attributes.
    pub fn build(topology: &Topology, mode: ValidationMode) -> Result<Self, AnalysisError> {
        if mode == ValidationMode::Strict {
            let known: BTreeSet<&str> = topology.devices.iter().map(|d| d.id.as_str()).collect();
            for link in &topology.links {
                if let Some(device) = [&link.source, &link.target]
                    .into_iter()
                    .find(|id| !known.contains(id.as_str()))
                {
                    return Err(AnalysisError::UnknownLinkEndpoint {
                        link: format!("{} -> {}", link.source, link.target),
                        device: device.clone(),
                    });
                }
            }
        }

        Ok(Self::build_permissive(topology))
    }

    /// Build the graph, dropping links that name an unknown device
    pub fn build_permissive(topology: &Topology) -> Self {
        let mut graph = PhysicalGraph::default();

        for device in &topology.devices {
            graph.nodes.insert(
                device.id.clone(),
                NodeAttrs {
                    kind: device.kind,
                    role: device.role,
                    location: device.location.clone(),
                },
            );
            graph.adjacency.entry(device.id.clone()).or_default();
        }

        for link in &topology.links {
            let missing = [&link.source, &link.target]
                .into_iter()
                .find(|id| !graph.nodes.contains_key(id.as_str()));

            if let Some(device) = missing {
                log::warn!(
                    "Dropping link {} -> {}: unknown device {}",
                    link.source,
                    link.target,
                    device
                );
                continue;
            }

            let attrs = EdgeAttrs {
                kind: link.kind,
                speed: link.speed.clone(),
            };
            graph.add_edge(&link.source, &link.target, attrs);
        }

        log::debug!(
            "Built physical graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    fn add_edge(&mut self, a: &str, b: &str, attrs: EdgeAttrs) {
        let is_new = self
            .adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), attrs.clone())
            .is_none();

        if a != b {
            self.adjacency
                .entry(b.to_string())
                .or_default()
                .insert(a.to_string(), attrs);
        }

        if is_new {
            self.edge_count += 1;
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.nodes.contains_key(device_id)
    }

    pub fn node(&self, device_id: &str) -> Option<&NodeAttrs> {
        self.nodes.get(device_id)
    }

    /// Device identifiers in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Physical neighbors of a device in sorted order, empty if unknown
    pub fn neighbors<'a>(&'a self, device_id: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.adjacency
            .get(device_id)
            .into_iter()
            .flat_map(|n| n.keys().map(String::as_str))
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<&EdgeAttrs> {
        self.adjacency.get(a).and_then(|n| n.get(b))
    }

    pub fn degree(&self, device_id: &str) -> usize {
        self.adjacency.get(device_id).map_or(0, |n| n.len())
    }

    /// Induced subgraph over the given members.
    ///
    /// Members that are not nodes of the physical graph are returned in
    /// `unresolved` and left out of the subgraph.
    pub fn project<'a>(&'a self, members: &BTreeSet<String>) -> Projection<'a> {
        let mut adjacency: BTreeMap<&'a str, BTreeSet<&'a str>> = BTreeMap::new();
        let mut unresolved = Vec::new();

        for member in members {
            match self.nodes.get_key_value(member.as_str()) {
                Some((id, _)) => {
                    adjacency.insert(id.as_str(), BTreeSet::new());
                }
                None => unresolved.push(member.clone()),
            }
        }

        let kept: Vec<&'a str> = adjacency.keys().copied().collect();
        let mut edge_count = 0;
        for node in kept {
            let neighbors: BTreeSet<&'a str> = self
                .neighbors(node)
                .filter(|n| *n != node && adjacency.contains_key(n))
                .collect();
            edge_count += neighbors.len();
            if let Some(entry) = adjacency.get_mut(node) {
                *entry = neighbors;
            }
        }

        Projection {
            subgraph: VlanSubgraph {
                adjacency,
                edge_count: edge_count / 2,
            },
            unresolved,
        }
    }
}

/// Result of projecting a VLAN's members onto the physical graph
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub subgraph: VlanSubgraph<'a>,
    pub unresolved: Vec<String>,
}

/// Subgraph of the physical graph induced by one VLAN's members
#[derive(Debug, Clone, Default)]
pub struct VlanSubgraph<'a> {
    adjacency: BTreeMap<&'a str, BTreeSet<&'a str>>,
    edge_count: usize,
}

impl<'a> VlanSubgraph<'a> {
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.adjacency.contains_key(device_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn neighbors(&self, device_id: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.adjacency
            .get(device_id)
            .into_iter()
            .flat_map(|n| n.iter().copied())
    }
}
