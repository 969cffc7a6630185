//! The merged semantic graph and the record types it is built from.

use std::collections::HashMap;
use std::path::PathBuf;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::domain::node_kind::NodeKind;

/// One node as declared by a record file.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub display_name: String,
    /// URI of the defining source; `None` when the record carried none.
    pub location: Option<String>,
    /// Outgoing edge targets, in declaration order.
    pub edges: Vec<String>,
}

/// All nodes decoded from a single `.semanticgraphdb` file.
#[derive(Debug, Clone)]
pub struct GraphRecord {
    pub source: PathBuf,
    pub nodes: Vec<NodeRecord>,
}

/// Payload attached to every graph node. Targets no record declares keep
/// `record: None`.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub record: Option<NodeRecord>,
}

/// Directed graph of code entities keyed by node identifier.
///
/// Backed by a stable graph so node indices stay valid across the removals
/// the visibility filter performs. Duplicate edges between the same
/// endpoints collapse to one.
#[derive(Debug, Clone)]
pub struct MergedGraph {
    graph: StableDiGraph<GraphNode, ()>,
    index_by_id: HashMap<String, NodeIndex>,
}

impl Default for MergedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MergedGraph {
    pub fn new() -> MergedGraph {
        MergedGraph {
            graph: StableDiGraph::new(),
            index_by_id: HashMap::new(),
        }
    }

    /// Insert a declared node, replacing any payload an earlier record
    /// attached to the same id, then add its outgoing edges. Edge targets
    /// that do not exist yet are created payload-less.
    pub fn insert_record(&mut self, record: NodeRecord) {
        let source = self.ensure_node(&record.id);
        let targets = record.edges.clone();
        self.graph[source].record = Some(record);
        for target in &targets {
            let target = self.ensure_node(target);
            if self.graph.find_edge(source, target).is_none() {
                self.graph.add_edge(source, target, ());
            }
        }
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.index_by_id.get(id) {
            return index;
        }
        let index = self.graph.add_node(GraphNode {
            id: id.to_string(),
            record: None,
        });
        self.index_by_id.insert(id.to_string(), index);
        index
    }

    /// Remove a node together with its incident edges.
    pub fn remove_node(&mut self, index: NodeIndex) -> Option<GraphNode> {
        let node = self.graph.remove_node(index)?;
        self.index_by_id.remove(&node.id);
        Some(node)
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    /// Payload of the node, `None` for implicitly created edge targets.
    pub fn record(&self, index: NodeIndex) -> Option<&NodeRecord> {
        self.graph
            .node_weight(index)
            .and_then(|node| node.record.as_ref())
    }

    /// Directed degree: incoming plus outgoing edges. A self-loop counts
    /// once in each direction.
    pub fn degree(&self, index: NodeIndex) -> usize {
        self.graph
            .edges_directed(index, Direction::Incoming)
            .count()
            + self
                .graph
                .edges_directed(index, Direction::Outgoing)
                .count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Directed edges as `(source, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(from), Some(to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }
}
