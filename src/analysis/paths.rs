//! Bounded simple-path enumeration inside a VLAN subgraph.

use std::collections::HashSet;

use super::graph::VlanSubgraph;

/// All simple paths from `source` to `target` with at most `max_hops` edges.
///
/// Neighbors are explored in sorted order, so the result order is stable.
/// Empty when either endpoint is outside the subgraph, when the endpoints
/// coincide, or when no path fits within the cutoff.
pub fn find_simple_paths(
    graph: &VlanSubgraph<'_>,
    source: &str,
    target: &str,
    max_hops: usize,
) -> Vec<Vec<String>> {
    let mut paths: Vec<Vec<String>> = Vec::new();

    if max_hops == 0 || source == target || !graph.contains(source) || !graph.contains(target) {
        return paths;
    }

    let children = |node: &str| graph.neighbors(node).collect::<Vec<_>>().into_iter();

    let mut path: Vec<&str> = vec![source];
    let mut on_path: HashSet<&str> = HashSet::from([source]);
    let mut stack = vec![children(source)];

    while let Some(frontier) = stack.last_mut() {
        let next = frontier.next();
        match next {
            None => {
                stack.pop();
                if let Some(node) = path.pop() {
                    on_path.remove(node);
                }
            }
            Some(child) if on_path.contains(child) => {}
            Some(child) if child == target => {
                let mut found: Vec<String> = path.iter().map(|n| n.to_string()).collect();
                found.push(child.to_string());
                paths.push(found);
            }
            Some(child) => {
                // one more edge is still needed to reach the target
                if path.len() < max_hops {
                    path.push(child);
                    on_path.insert(child);
                    stack.push(children(child));
                }
            }
        }
    }

    paths
}
