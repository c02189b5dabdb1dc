//! Island detection: connected components of a VLAN subgraph.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use super::graph::VlanSubgraph;
use super::types::Island;

/// Find connected components using an explicit-stack DFS.
///
/// Start nodes are taken in sorted order, so the output order is stable.
/// Every node of the subgraph lands in exactly one component.
pub fn find_connected_components(graph: &VlanSubgraph<'_>) -> Vec<BTreeSet<String>> {
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.node_count());
    let mut components: Vec<BTreeSet<String>> = Vec::new();

    for start_node in graph.nodes() {
        if visited.contains(start_node) {
            continue;
        }

        let mut component: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<&str> = vec![start_node];

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            component.insert(node.to_string());

            for neighbor in graph.neighbors(node) {
                if !visited.contains(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        components.push(component);
    }

    components
}

/// Order components largest first and turn them into islands.
///
/// Ties on size go to the component holding the lexicographically smallest
/// device id. Island ids start at 1 in that order and island 1 is main.
pub fn rank_islands(vlan_id: u16, mut components: Vec<BTreeSet<String>>) -> Vec<Island> {
    components.retain(|c| !c.is_empty());
    components.sort_by(compare_components);

    components
        .into_iter()
        .enumerate()
        .map(|(i, devices)| Island {
            vlan_id,
            island_id: i + 1,
            devices,
            is_main_island: i == 0,
        })
        .collect()
}

fn compare_components(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Ordering {
    b.len()
        .cmp(&a.len())
        .then_with(|| a.first().cmp(&b.first()))
}
