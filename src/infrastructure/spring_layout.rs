//! Force-directed placement of graph nodes.

use std::collections::HashMap;

use rand::Rng;

use crate::domain::graph::MergedGraph;
use crate::ports::{LayoutEngine, NodeLayout};

/// Distances are clamped at this floor before force evaluation.
const MIN_DISTANCE: f64 = 0.01;

/// Tuning knobs for [`SpringLayout`].
#[derive(Debug, Clone)]
pub struct SpringLayoutConfig {
    /// Number of force iterations.
    pub iterations: usize,
    /// Ideal edge length. Defaults to `1 / sqrt(node_count)`.
    pub optimal_distance: Option<f64>,
}

impl Default for SpringLayoutConfig {
    fn default() -> Self {
        SpringLayoutConfig {
            iterations: 50,
            optimal_distance: None,
        }
    }
}

/// Fruchterman-Reingold spring layout.
///
/// Nodes start at random positions in the unit square. Every pair repels
/// with `k^2 / d` while edges pull their endpoints together with `d^2 / k`.
/// Displacement per iteration is capped by a linearly cooling temperature
/// and the final positions are rescaled to `[-1, 1]` on both axes.
pub struct SpringLayout {
    config: SpringLayoutConfig,
}

impl SpringLayout {
    pub fn new() -> SpringLayout {
        Self::with_config(SpringLayoutConfig::default())
    }

    pub fn with_config(config: SpringLayoutConfig) -> SpringLayout {
        SpringLayout { config }
    }
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for SpringLayout {
    fn layout(&self, graph: &MergedGraph) -> NodeLayout {
        let indices: Vec<_> = graph.node_indices().collect();
        let count = indices.len();
        if count == 0 {
            return NodeLayout::new();
        }

        let slot_of: HashMap<_, _> = indices
            .iter()
            .enumerate()
            .map(|(slot, &index)| (index, slot))
            .collect();
        // Self-loops exert no force on their single endpoint.
        let springs: Vec<(usize, usize)> = graph
            .edges()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (slot_of[&a], slot_of[&b]))
            .collect();

        let mut rng = rand::thread_rng();
        let mut positions: Vec<(f64, f64)> = (0..count)
            .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
            .collect();

        let k = self
            .config
            .optimal_distance
            .unwrap_or_else(|| 1.0 / (count as f64).sqrt());
        let mut temperature = 0.1;
        let cooling = temperature / (self.config.iterations as f64 + 1.0);

        for _ in 0..self.config.iterations {
            let mut displacement = vec![(0.0f64, 0.0f64); count];

            for i in 0..count {
                for j in (i + 1)..count {
                    let dx = positions[i].0 - positions[j].0;
                    let dy = positions[i].1 - positions[j].1;
                    let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                    let repulsion = k * k / distance;
                    let (ux, uy) = (dx / distance, dy / distance);
                    displacement[i].0 += ux * repulsion;
                    displacement[i].1 += uy * repulsion;
                    displacement[j].0 -= ux * repulsion;
                    displacement[j].1 -= uy * repulsion;
                }
            }

            for &(a, b) in &springs {
                let dx = positions[a].0 - positions[b].0;
                let dy = positions[a].1 - positions[b].1;
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let attraction = distance * distance / k;
                let (ux, uy) = (dx / distance, dy / distance);
                displacement[a].0 -= ux * attraction;
                displacement[a].1 -= uy * attraction;
                displacement[b].0 += ux * attraction;
                displacement[b].1 += uy * attraction;
            }

            for (position, &(dx, dy)) in positions.iter_mut().zip(&displacement) {
                let length = (dx * dx + dy * dy).sqrt();
                if length > 0.0 {
                    let step = length.min(temperature);
                    position.0 += dx / length * step;
                    position.1 += dy / length * step;
                }
            }
            temperature -= cooling;
        }

        rescale(&mut positions);
        indices.into_iter().zip(positions).collect()
    }
}

/// Center on the mean and scale the largest axis extent to 1.
fn rescale(positions: &mut [(f64, f64)]) {
    let count = positions.len() as f64;
    let (mut center_x, mut center_y) = (0.0, 0.0);
    for &(x, y) in positions.iter() {
        center_x += x / count;
        center_y += y / count;
    }
    let mut max_abs = 0.0f64;
    for position in positions.iter_mut() {
        position.0 -= center_x;
        position.1 -= center_y;
        max_abs = max_abs.max(position.0.abs()).max(position.1.abs());
    }
    if max_abs > 0.0 {
        for position in positions.iter_mut() {
            position.0 /= max_abs;
            position.1 /= max_abs;
        }
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
    fn test_empty_graph_has_empty_layout() {
        let graph = MergedGraph::new();
        assert!(SpringLayout::new().layout(&graph).is_empty());
    }

    #[test]
    fn test_single_node_sits_at_the_origin() {
        let mut graph = MergedGraph::new();
        graph.insert_record(record("a", &[]));

        let layout = SpringLayout::new().layout(&graph);
        let a = graph.node_index("a").unwrap();
        assert_eq!(layout[&a], (0.0, 0.0));
    }

    #[test]
    fn test_positions_are_finite_and_bounded() {
        let mut graph = MergedGraph::new();
        graph.insert_record(record("hub", &["a", "b", "c", "hub"]));
        graph.insert_record(record("a", &["b"]));
        graph.insert_record(record("b", &["c"]));

        let layout = SpringLayout::new().layout(&graph);

        assert_eq!(layout.len(), graph.node_count());
        for &(x, y) in layout.values() {
            assert!(x.is_finite() && y.is_finite());
            assert!((-1.0..=1.0).contains(&x));
            assert!((-1.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_iteration_count_is_configurable() {
        let mut graph = MergedGraph::new();
        graph.insert_record(record("a", &["b"]));

        let layout = SpringLayout::with_config(SpringLayoutConfig {
            iterations: 0,
            ..SpringLayoutConfig::default()
        })
        .layout(&graph);

        assert_eq!(layout.len(), 2);
    }
}
