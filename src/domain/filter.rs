//! Visibility filtering of the merged graph.

use petgraph::stable_graph::NodeIndex;
use tracing::debug;

use crate::domain::graph::MergedGraph;

/// A node is worth plotting when it is connected, declared by some record,
/// anchored to a source location, and not a structural container.
pub fn is_visible(graph: &MergedGraph, index: NodeIndex) -> bool {
    if graph.degree(index) == 0 {
        return false;
    }
    match graph.record(index) {
        Some(record) => record.location.is_some() && !record.kind.is_structural(),
        None => false,
    }
}

/// Remove every hidden node in one sweep over the current node listing.
///
/// The listing is snapshotted up front while each entry is judged against
/// the live graph: a removal can strand a later entry at degree zero and it
/// falls out in the same sweep, but entries already visited stay even if a
/// later removal strands them. Returns the number of nodes removed.
pub fn prune_hidden_nodes(graph: &mut MergedGraph) -> usize {
    let snapshot: Vec<NodeIndex> = graph.node_indices().collect();
    let mut removed = 0;
    for index in snapshot {
        if !is_visible(graph, index) {
            graph.remove_node(index);
            removed += 1;
        }
    }
    debug!("removed {} hidden nodes in one sweep", removed);
    removed
}

/// Apply [`prune_hidden_nodes`] until a sweep removes nothing, so no node
/// stranded by an earlier sweep survives. Returns the total removed.
pub fn prune_to_fixed_point(graph: &mut MergedGraph) -> usize {
    let mut total = 0;
    loop {
        let removed = prune_hidden_nodes(graph);
        if removed == 0 {
            break;
        }
        total += removed;
    }
    total
}
