//! One-hop bridge suggestions for isolated islands.
//!
//! For each device of a non-main island, look at its physical neighbors
//! outside the island. A neighbor is a bridge candidate when it is itself
//! physically adjacent to the main island. Only single intermediate devices
//! are found; deeper gaps yield no candidate.

use super::graph::PhysicalGraph;
use super::types::{
    BridgeCandidate, ConnectionOpportunity, ConnectivitySuggestions, Island, IslandRef,
    VlanAnalysisResult,
};

/// Bridge candidates linking `isolated` to `main`, in device then neighbor order
pub fn find_bridge_candidates(
    graph: &PhysicalGraph,
    vlan_id: u16,
    isolated: &Island,
    main: &Island,
) -> Vec<BridgeCandidate> {
    let mut candidates = Vec::new();

    for device_id in &isolated.devices {
        for bridge_device in graph.neighbors(device_id) {
            if isolated.contains_device(bridge_device) {
                continue;
            }

            let reaches_main = graph
                .neighbors(bridge_device)
                .any(|n| main.contains_device(n));

            if reaches_main {
                candidates.push(BridgeCandidate {
                    isolated_device: device_id.clone(),
                    bridge_device: bridge_device.to_string(),
                    bridge_type: graph.node(bridge_device).map(|n| n.kind),
                    action: format!(
                        "Configure VLAN {} on {} to bridge {} to main island",
                        vlan_id, bridge_device, device_id
                    ),
                });
            }
        }
    }

    candidates
}

/// Suggestions for every non-main island of a fragmented VLAN.
///
/// Returns `None` unless the result has more than one island. Islands without
/// any candidate are left out.
pub fn suggest_bridges(
    graph: &PhysicalGraph,
    result: &VlanAnalysisResult,
) -> Option<ConnectivitySuggestions> {
    if !result.has_islands {
        return None;
    }
    let main = result.main_island()?;

    let connection_opportunities = result
        .islands
        .iter()
        .filter(|island| !island.is_main_island)
        .filter_map(|island| {
            let bridge_candidates = find_bridge_candidates(graph, result.vlan_id, island, main);
            if bridge_candidates.is_empty() {
                return None;
            }
            Some(ConnectionOpportunity {
                isolated_island: IslandRef {
                    island_id: island.island_id,
                    devices: island.devices.iter().cloned().collect(),
                    size: island.size(),
                },
                bridge_candidates,
            })
        })
        .collect();

    Some(ConnectivitySuggestions {
        vlan_id: result.vlan_id,
        vlan_name: result.vlan_name.clone(),
        island_count: result.island_count(),
        connection_opportunities,
    })
}
