//! Degree statistics over the undirected view of the merged graph.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;

use crate::domain::graph::MergedGraph;

/// Default truncation of the rank sequence.
pub const DEFAULT_RANK_LIMIT: usize = 100;

/// Per-node degree on the undirected simple view of the graph: reciprocal
/// directed edges collapse into one, a self-loop counts twice.
pub fn undirected_degrees(graph: &MergedGraph) -> HashMap<NodeIndex, usize> {
    let mut degrees: HashMap<NodeIndex, usize> =
        graph.node_indices().map(|index| (index, 0)).collect();
    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    for (a, b) in graph.edges() {
        let key = if a <= b { (a, b) } else { (b, a) };
        if !seen.insert(key) {
            continue;
        }
        if a == b {
            *degrees.entry(a).or_default() += 2;
        } else {
            *degrees.entry(a).or_default() += 1;
            *degrees.entry(b).or_default() += 1;
        }
    }
    degrees
}

/// Nodes sorted by descending undirected degree. Ties keep insertion order.
pub fn ranked_by_degree(graph: &MergedGraph) -> Vec<(NodeIndex, usize)> {
    let degrees = undirected_degrees(graph);
    let mut ranked: Vec<(NodeIndex, usize)> = graph
        .node_indices()
        .map(|index| (index, degrees.get(&index).copied().unwrap_or(0)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Rank-ordered degree data behind both panels of the distribution figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeDistribution {
    /// Degrees in descending order, truncated to the rank limit.
    pub sequence: Vec<usize>,
    /// Distinct degree value to node count, ascending, over the truncated
    /// sequence.
    pub histogram: Vec<(usize, usize)>,
}

impl DegreeDistribution {
    /// Compute the distribution of the graph's top `limit` nodes.
    pub fn from_graph(graph: &MergedGraph, limit: usize) -> DegreeDistribution {
        let sequence: Vec<usize> = ranked_by_degree(graph)
            .into_iter()
            .map(|(_, degree)| degree)
            .take(limit)
            .collect();
        Self::from_sequence(sequence)
    }

    /// Build from an already rank-ordered sequence.
    pub fn from_sequence(sequence: Vec<usize>) -> DegreeDistribution {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for &degree in &sequence {
            *counts.entry(degree).or_default() += 1;
        }
        DegreeDistribution {
            sequence,
            histogram: counts.into_iter().collect(),
        }
    }

    pub fn max_degree(&self) -> usize {
        self.sequence.first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::NodeRecord;
    use crate::domain::node_kind::NodeKind;

    fn record(id: &str, edges: &[&str]) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            kind: NodeKind::Class,
            display_name: String::new(),
            location: Some(format!("{id}.rs")),
            edges: edges.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_reciprocal_edges_collapse() {
        let mut graph = MergedGraph::new();
        graph.insert_record(record("a", &["b"]));
        graph.insert_record(record("b", &["a"]));

        let degrees = undirected_degrees(&graph);
        let a = graph.node_index("a").unwrap();
        let b = graph.node_index("b").unwrap();
        assert_eq!(degrees[&a], 1);
        assert_eq!(degrees[&b], 1);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut graph = MergedGraph::new();
        graph.insert_record(record("a", &["a", "b"]));

        let degrees = undirected_degrees(&graph);
        let a = graph.node_index("a").unwrap();
        assert_eq!(degrees[&a], 3);
    }

    #[test]
    fn test_ranking_is_descending_with_stable_ties() {
        let mut graph = MergedGraph::new();
        // hub: 3, leaf1/leaf2: 2 each, mid: 1.
        graph.insert_record(record("hub", &["leaf1", "leaf2", "mid"]));
        graph.insert_record(record("mid", &["hub"]));
        graph.insert_record(record("leaf1", &["leaf2"]));

        let ranked = ranked_by_degree(&graph);
        let ids: Vec<&str> = ranked
            .iter()
            .map(|(index, _)| graph.node(*index).unwrap().id.as_str())
            .collect();
        let degrees: Vec<usize> = ranked.iter().map(|(_, degree)| *degree).collect();

        assert_eq!(degrees, vec![3, 2, 2, 1]);
        assert_eq!(ids, vec!["hub", "leaf1", "leaf2", "mid"]);
    }

    #[test]
    fn test_distribution_from_sequence() {
        let distribution = DegreeDistribution::from_sequence(vec![5, 3, 3, 1]);
        assert_eq!(distribution.sequence, vec![5, 3, 3, 1]);
        assert_eq!(distribution.histogram, vec![(1, 1), (3, 2), (5, 1)]);
        assert_eq!(distribution.max_degree(), 5);
    }

    #[test]
    fn test_truncation_limits_both_panels() {
        let mut graph = MergedGraph::new();
        graph.insert_record(record("hub", &["a", "b", "c"]));

        let distribution = DegreeDistribution::from_graph(&graph, 2);
        assert_eq!(distribution.sequence, vec![3, 1]);
        // The histogram covers only the truncated sequence.
        assert_eq!(distribution.histogram, vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn test_empty_graph_yields_empty_distribution() {
        let graph = MergedGraph::new();
        let distribution = DegreeDistribution::from_graph(&graph, DEFAULT_RANK_LIMIT);
        assert!(distribution.is_empty());
        assert_eq!(distribution.max_degree(), 0);
    }
}
