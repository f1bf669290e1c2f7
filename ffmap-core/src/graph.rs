// Pruning nodes and their links from graph.json
//
// Links address nodes by position, so removing a node shifts every later
// index. All targets are resolved against the untouched graph first, then
// nodes are dropped from the back and the surviving links are renumbered.

use crate::model::Graph;
use crate::report::{Change, EditLog, StoreOutcome};
use crate::store::edit_in_dir;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn remove(dest_dir: &Path, node_ids: &[String]) -> StoreOutcome {
    edit_in_dir(dest_dir, |graph: &mut Graph| apply_remove(graph, node_ids))
}

/// `node_id` of a graph vertex. Vertices seen only on the mesh have none.
pub fn vertex_node_id(vertex: &Value) -> Option<&str> {
    vertex.get("node_id").and_then(Value::as_str)
}

/// `(source, target)` of a link, `None` if either end is not an index.
pub fn link_ends(link: &Value) -> Option<(usize, usize)> {
    let end = |key: &str| {
        link.get(key)
            .and_then(Value::as_u64)
            .and_then(|ix| usize::try_from(ix).ok())
    };
    Some((end("source")?, end("target")?))
}

/// Index of the first graph node carrying `node_id`.
pub fn find_node(graph: &Graph, node_id: &str) -> Option<usize> {
    graph
        .nodes()
        .iter()
        .position(|vertex| vertex_node_id(vertex) == Some(node_id))
}

/// Indices of the links that start or end at node `index`.
pub fn incident_links(links: &[Value], index: usize) -> Vec<usize> {
    links
        .iter()
        .enumerate()
        .filter(|(_, link)| touches(link, |ix| ix == index))
        .map(|(ix, _)| ix)
        .collect()
}

pub fn apply_remove(graph: &mut Graph, node_ids: &[String]) -> EditLog {
    let mut log = EditLog::default();
    let mut targets = BTreeSet::new();

    for node_id in node_ids {
        match find_node(graph, node_id) {
            Some(index) if targets.insert(index) => {
                info!("Found {} in graph nodes at index {}", node_id, index);
                let links = incident_links(graph.links(), index);
                for &ix in &links {
                    if let Some((source, target)) = link_ends(&graph.links()[ix]) {
                        let peer = if source == index { target } else { source };
                        debug!(
                            "  link {} ({} -> {}) peer {:?}",
                            ix,
                            source,
                            target,
                            graph.nodes().get(peer).and_then(vertex_node_id)
                        );
                    }
                }
                log.changes.push(Change::GraphNodeRemoved {
                    node_id: node_id.clone(),
                    index,
                    links,
                });
            }
            _ => {
                warn!("Node {} not found in graph nodes", node_id);
                log.missing.push(node_id.clone());
            }
        }
    }

    if targets.is_empty() {
        return log;
    }

    if let Some(links) = graph.links_mut() {
        links.retain(|link| !touches(link, |ix| targets.contains(&ix)));
        for link in links.iter_mut() {
            renumber(link, &targets);
        }
    }
    if let Some(nodes) = graph.nodes_mut() {
        for &index in targets.iter().rev() {
            nodes.remove(index);
        }
    }

    log
}

fn touches(link: &Value, mut hit: impl FnMut(usize) -> bool) -> bool {
    link_ends(link).is_some_and(|(source, target)| hit(source) || hit(target))
}

// Only rewrites ends that actually move, untouched links keep their exact text.
fn renumber(link: &mut Value, removed: &BTreeSet<usize>) {
    let Some((source, target)) = link_ends(link) else {
        return;
    };
    let Some(link) = link.as_object_mut() else {
        return;
    };
    for (key, index) in [("source", source), ("target", target)] {
        let shifted = shifted_index(removed, index);
        if shifted != index {
            link.insert(key.to_string(), Value::from(shifted));
        }
    }
}

// New position of a surviving node once every index in `removed` is gone.
fn shifted_index(removed: &BTreeSet<usize>, index: usize) -> usize {
    index - removed.range(..index).count()
}
