// Pipeline orchestration behind the layout and renderer ports.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::domain::degree::{self, DegreeDistribution, DEFAULT_RANK_LIMIT};
use crate::domain::filter;
use crate::domain::graph::MergedGraph;
use crate::domain::ingest;
use crate::infrastructure::record_loader::RecordLoader;
use crate::ports::{GraphRenderer, LayoutEngine};

/// How many node digests the run summary keeps.
const TOP_DIGEST_LIMIT: usize = 10;

/// Output paths and tuning for one pipeline run.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub graph_out: PathBuf,
    pub degree_out: PathBuf,
    /// Also write the run summary as pretty JSON when set.
    pub stats_out: Option<PathBuf>,
    /// Truncation of the degree rank sequence.
    pub rank_limit: usize,
    /// Re-apply the visibility filter until nothing more falls out.
    pub fixed_point: bool,
}

impl Default for RenderPlan {
    fn default() -> Self {
        RenderPlan {
            graph_out: PathBuf::from("scg-graph.png"),
            degree_out: PathBuf::from("scg-degrees.png"),
            stats_out: None,
            rank_limit: DEFAULT_RANK_LIMIT,
            fixed_point: false,
        }
    }
}

/// One high-degree node in the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDigest {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub degree: usize,
}

/// Counts describing one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub record_files: usize,
    pub merged_nodes: usize,
    pub merged_edges: usize,
    pub removed_nodes: usize,
    pub visible_nodes: usize,
    pub visible_edges: usize,
    pub top_nodes: Vec<NodeDigest>,
}

/// Load, merge, filter, lay out and render one workspace.
pub struct VisualizeUsecase<'a> {
    pub layout_engine: &'a dyn LayoutEngine,
    pub renderer: &'a dyn GraphRenderer,
}

impl<'a> VisualizeUsecase<'a> {
    pub fn run(&self, workspace_root: &Path, plan: &RenderPlan) -> Result<RunSummary> {
        let started = Instant::now();

        let records = RecordLoader::load_workspace(workspace_root)?;
        let record_files = records.len();

        let mut graph = ingest::merge_records(records);
        let merged_nodes = graph.node_count();
        let merged_edges = graph.edge_count();

        let removed_nodes = if plan.fixed_point {
            filter::prune_to_fixed_point(&mut graph)
        } else {
            filter::prune_hidden_nodes(&mut graph)
        };
        info!(
            "{} of {} nodes survive visibility filtering",
            graph.node_count(),
            merged_nodes
        );

        let layout = self.layout_engine.layout(&graph);
        self.renderer.render_graph(&graph, &layout, &plan.graph_out)?;

        let distribution = DegreeDistribution::from_graph(&graph, plan.rank_limit);
        self.renderer
            .render_degree_distribution(&distribution, &plan.degree_out)?;

        let summary = RunSummary {
            record_files,
            merged_nodes,
            merged_edges,
            removed_nodes,
            visible_nodes: graph.node_count(),
            visible_edges: graph.edge_count(),
            top_nodes: top_nodes(&graph, TOP_DIGEST_LIMIT),
        };
        if let Some(stats_out) = &plan.stats_out {
            write_summary(&summary, stats_out)?;
        }
        info!("pipeline finished in {:.2?}", started.elapsed());
        Ok(summary)
    }
}

fn top_nodes(graph: &MergedGraph, limit: usize) -> Vec<NodeDigest> {
    degree::ranked_by_degree(graph)
        .into_iter()
        .take(limit)
        .filter_map(|(index, degree)| {
            let record = graph.record(index)?;
            let name = if record.display_name.is_empty() {
                record.id.clone()
            } else {
                record.display_name.clone()
            };
            Some(NodeDigest {
                id: record.id.clone(),
                name,
                kind: record.kind.to_string(),
                degree,
            })
        })
        .collect()
}

fn write_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(summary).context("failed to serialize run summary")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write run summary {}", path.display()))?;
    info!("wrote run summary to {}", path.display());
    Ok(())
}
