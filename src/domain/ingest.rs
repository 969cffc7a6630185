//! Assembly of loaded records into one merged graph.

use tracing::{debug, info};

use crate::domain::graph::{GraphRecord, MergedGraph};

/// Fold every record into a single graph. Later records overwrite the
/// payloads of earlier ones that declared the same node id.
pub fn merge_records<I>(records: I) -> MergedGraph
where
    I: IntoIterator<Item = GraphRecord>,
{
    let mut graph = MergedGraph::new();
    let mut files = 0usize;
    for record in records {
        debug!(
            "merging {} nodes from {}",
            record.nodes.len(),
            record.source.display()
        );
        files += 1;
        for node in record.nodes {
            graph.insert_record(node);
        }
    }
    info!(
        "merged {} record files into {} nodes and {} edges",
        files,
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
