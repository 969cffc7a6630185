// Port traits that decouple the pipeline from layout and drawing backends.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use petgraph::stable_graph::NodeIndex;

use crate::domain::degree::DegreeDistribution;
use crate::domain::graph::MergedGraph;

/// 2D position per node, in layout coordinates.
pub type NodeLayout = HashMap<NodeIndex, (f64, f64)>;

/// Computes node positions for a merged graph.
pub trait LayoutEngine {
    fn layout(&self, graph: &MergedGraph) -> NodeLayout;
}

/// Draws the pipeline's two figures.
pub trait GraphRenderer {
    /// Plot nodes and edges at the given positions.
    fn render_graph(&self, graph: &MergedGraph, layout: &NodeLayout, path: &Path) -> Result<()>;

    /// Plot the degree rank sequence and its histogram.
    fn render_degree_distribution(
        &self,
        distribution: &DegreeDistribution,
        path: &Path,
    ) -> Result<()>;
}
